//! Error types for the ledger RPC client.
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// This is an alias for the result type returned by the ledger client.
pub type ClientResult<T> = Result<T, ClientError>;

/// The error type for errors produced in this library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Network error, retry might help
    #[error("Network: {0}")]
    Network(String),

    /// RPC server returned an error
    #[error("RPC server returned error '{1}' (code {0})")]
    Server(i64, String),

    #[error("Error parsing rpc response: {0}")]
    Parse(String),

    /// HTTP status error, not retryable
    #[error("Obtained failure status({0}): {1}")]
    Status(String, String),

    /// Error decoding the response, retry might not help
    #[error("Malformed Response: {0}")]
    MalformedResponse(String),

    /// Connection error, retry might help
    #[error("Could not connect: {0}")]
    Connection(String),

    /// Timeout error, retry might help
    #[error("Timeout")]
    Timeout,

    /// Key material is malformed or unusable, not retryable
    #[error("Key: {0}")]
    Key(String),

    /// Unknown error, unlikely to be recoverable
    #[error("{0}")]
    Other(String),
}

impl From<SerdeJsonError> for ClientError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Parse(format!("Could not parse {}", value))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else if value.is_connect() {
            Self::Connection(value.to_string())
        } else if value.is_decode() {
            Self::MalformedResponse(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}
