//! Wire types for the subset of the ledger RPC this bridge consumes.
//!
//! The RPC is an opaque collaborator; only the fields the bridge actually
//! reads are modeled here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account state as reported by the ledger; the only source of sequence
/// numbers (nothing is cached client-side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEntry {
    pub account_id: String,
    pub sequence: i64,
}

impl AccountEntry {
    /// A synthetic entry for simulate-only calls, which never consume a
    /// sequence number.
    pub fn synthetic(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            sequence: 0,
        }
    }
}

/// Outcome of `simulateTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransactionResponse {
    /// Present iff the simulation failed; the raw diagnostic string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<SimulationResult>,
    /// Resource fee estimate, decimal-as-string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resource_fee: Option<String>,
}

impl SimulateTransactionResponse {
    pub fn success(return_value: Value) -> Self {
        Self {
            error: None,
            result: Some(SimulationResult {
                return_value: Some(return_value),
            }),
            min_resource_fee: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            result: None,
            min_resource_fee: None,
        }
    }

    /// The simulated return value, or `Null` when the call returns nothing.
    pub fn return_value(&self) -> Value {
        self.result
            .as_ref()
            .and_then(|result| result.return_value.clone())
            .unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
}

/// Acknowledgement of `sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResponse {
    pub hash: String,
    pub status: String,
}

/// Status of a submitted transaction as reported by `getTransaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    NotFound,
    Success,
    Failed,
    /// Any other status the ledger reports; the transaction is still in
    /// flight from this client's perspective.
    #[serde(other)]
    Pending,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotFound => "NOT_FOUND",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Pending => "PENDING",
        })
    }
}

/// Outcome of `getTransaction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionResponse {
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
}

impl GetTransactionResponse {
    pub fn success(return_value: Option<Value>) -> Self {
        Self {
            status: TransactionStatus::Success,
            return_value,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: TransactionStatus::Failed,
            return_value: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: TransactionStatus::NotFound,
            return_value: None,
        }
    }
}
