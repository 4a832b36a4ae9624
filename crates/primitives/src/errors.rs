//! Error taxonomy surfaced to consumers of the bridge.
//!
//! Every failure an operation can raise is one of these variants; nothing
//! untyped escapes the crate boundary. The HTTP statuses are carried as
//! data for the consuming API layer, which owns the actual responses.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// This is an alias for the result type returned by bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Stable machine-readable codes, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Caller input failed local validation; the chain was never contacted.
    BadRequest,

    /// The requested entity does not exist.
    ///
    /// Reserved for the consuming API layer; the bridge itself never
    /// produces it.
    NotFound,

    /// Deployment configuration (contract id, source account or signing
    /// key) is missing. Not transient, not retried.
    BlockchainUnavailable,

    /// The chain rejected the call, the simulation failed, the submitted
    /// transaction failed or timed out, or the response was unusable.
    BlockchainCallFailed,

    /// Unexpected fault. Reserved for the consuming API layer.
    InternalError,
}

/// The error type for failures produced by the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Unavailable {
        message: String,
        /// Contract method the caller was trying to reach.
        method: &'static str,
    },

    #[error("`{method}` failed: {message}")]
    CallFailed {
        method: &'static str,
        message: String,
        details: Option<Value>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A submitted transaction never reached a terminal status within the
    /// confirmation budget. Finality is unknown at this point; whether to
    /// retry is the caller's decision.
    #[error("timed out waiting for transaction {hash}")]
    ConfirmationTimeout {
        method: &'static str,
        hash: String,
    },

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BridgeError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request_with(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn unavailable(method: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            method,
        }
    }

    pub fn call_failed(method: &'static str, message: impl Into<String>) -> Self {
        Self::CallFailed {
            method,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    pub fn call_failed_with(
        method: &'static str,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self::CallFailed {
            method,
            message: message.into(),
            details: Some(details),
            source: None,
        }
    }

    /// Wraps a lower-level fault, preserving it as [`std::error::Error::source`]
    /// for diagnostics without exposing it in the consumer-facing body.
    pub fn call_failed_from(
        method: &'static str,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::CallFailed {
            method,
            message: message.into(),
            details: None,
            source: Some(source.into()),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest { .. } => ErrorCode::BadRequest,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Unavailable { .. } => ErrorCode::BlockchainUnavailable,
            Self::CallFailed { .. } | Self::ConfirmationTimeout { .. } => {
                ErrorCode::BlockchainCallFailed
            }
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// The HTTP status the consuming layer should map this failure to.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Unavailable { .. } | Self::Internal { .. } => 500,
            Self::CallFailed { .. } => 502,
            Self::ConfirmationTimeout { .. } => 504,
        }
    }

    /// The `{code, message, status, details}` body handed to consumers.
    pub fn to_body(&self) -> ErrorBody {
        let details = match self {
            Self::BadRequest { details, .. } | Self::CallFailed { details, .. } => details.clone(),
            Self::ConfirmationTimeout { hash, .. } => Some(json!({ "hash": hash })),
            _ => None,
        };

        ErrorBody {
            code: self.code(),
            message: self.to_string(),
            status: self.http_status(),
            details,
        }
    }
}

/// Wire shape of a failed operation: `{code, message, status, details?}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}
