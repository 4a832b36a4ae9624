//! Commitment records projected from the chain, and their mappers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    coerce::{field, number_field, optional_string_field, string_field},
    errors::{BridgeError, BridgeResult},
};

/// On-chain commitment lifecycle states.
///
/// This is a closed enumeration: a chain-side status this client does not
/// recognize degrades to [`CommitmentStatus::Unknown`] instead of failing
/// the read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitmentStatus {
    Active,
    Settled,
    Violated,
    EarlyExit,
    #[default]
    Unknown,
}

impl CommitmentStatus {
    /// Normalizes a raw chain value, case-insensitively.
    pub fn from_chain(value: Option<&Value>) -> Self {
        match crate::coerce::as_string(value, "").to_uppercase().as_str() {
            "ACTIVE" => Self::Active,
            "SETTLED" => Self::Settled,
            "VIOLATED" => Self::Violated,
            "EARLY_EXIT" => Self::EarlyExit,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for CommitmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Active => "ACTIVE",
            Self::Settled => "SETTLED",
            Self::Violated => "VIOLATED",
            Self::EarlyExit => "EARLY_EXIT",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// A commitment as projected from the ledger.
///
/// Monetary fields stay decimal-as-string end to end; they are coerced to
/// numbers only for display or aggregation downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCommitment {
    pub id: String,
    pub owner_address: String,
    pub asset: String,
    pub amount: String,
    pub status: CommitmentStatus,
    pub compliance_score: f64,
    pub current_value: String,
    pub fee_earned: String,
    pub violation_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl ChainCommitment {
    /// The minimal record a bare-id create result expands into.
    fn with_id(id: String) -> Self {
        Self {
            id,
            owner_address: String::new(),
            asset: String::new(),
            amount: "0".to_owned(),
            status: CommitmentStatus::Unknown,
            compliance_score: 0.0,
            current_value: "0".to_owned(),
            fee_earned: "0".to_owned(),
            violation_count: 0,
            created_at: None,
            expires_at: None,
        }
    }
}

/// Caller-supplied inputs for a commitment creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitmentParams {
    pub owner_address: String,
    pub asset: String,
    /// Decimal-as-string in the asset's native precision.
    pub amount: String,
    pub duration_days: u32,
    pub max_loss_bps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Result of a successful commitment creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitmentOutcome {
    pub commitment_id: String,
    pub commitment: ChainCommitment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// Maps a decoded chain value into a [`ChainCommitment`].
///
/// A commitment without a resolvable id is a protocol violation, not a
/// data-quality defect, and fails the call.
pub fn commitment_from_value(value: &Value) -> BridgeResult<ChainCommitment> {
    let obj = value.as_object();
    let id = string_field(obj, &["id", "commitmentId"], "");

    if id.is_empty() {
        return Err(BridgeError::call_failed_with(
            "decode_commitment",
            "chain returned a commitment without an id",
            value.clone(),
        ));
    }

    Ok(ChainCommitment {
        id,
        owner_address: string_field(obj, &["ownerAddress", "owner_address"], ""),
        asset: string_field(obj, &["asset"], ""),
        amount: string_field(obj, &["amount"], "0"),
        status: CommitmentStatus::from_chain(field(obj, &["status"])),
        compliance_score: number_field(obj, &["complianceScore", "compliance_score"], 0.0),
        current_value: string_field(obj, &["currentValue", "current_value", "amount"], "0"),
        fee_earned: string_field(obj, &["feeEarned", "fees_earned"], "0"),
        violation_count: number_field(obj, &["violationCount", "violation_count"], 0.0).max(0.0)
            as u64,
        created_at: optional_string_field(obj, &["createdAt", "created_at"]),
        expires_at: optional_string_field(obj, &["expiresAt", "expires_at"]),
    })
}

/// Maps a bulk read result. Non-arrays map to an empty list; a row without
/// an id fails the whole read.
pub fn commitment_list_from_value(value: &Value) -> BridgeResult<Vec<ChainCommitment>> {
    match value.as_array() {
        Some(items) => items.iter().map(commitment_from_value).collect(),
        None => Ok(Vec::new()),
    }
}

/// Maps a `create_commitment` return value.
///
/// Some deployments return just the new id as a bare string; that is a
/// valid minimal result.
pub fn create_outcome_from_value(
    value: &Value,
    tx_hash: Option<String>,
) -> BridgeResult<CreateCommitmentOutcome> {
    if let Value::String(id) = value {
        return Ok(CreateCommitmentOutcome {
            commitment_id: id.clone(),
            commitment: ChainCommitment::with_id(id.clone()),
            tx_hash,
        });
    }

    let obj = value.as_object();
    let commitment = commitment_from_value(field(obj, &["commitment"]).unwrap_or(value))?;
    let reported_hash = string_field(obj, &["txHash"], "");

    Ok(CreateCommitmentOutcome {
        commitment_id: commitment.id.clone(),
        commitment,
        tx_hash: if reported_hash.is_empty() {
            tx_hash
        } else {
            Some(reported_hash)
        },
    })
}
