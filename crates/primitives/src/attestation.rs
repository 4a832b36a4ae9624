//! Attestation records and their mapper.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    coerce::{field, number_field, string_field},
    errors::{BridgeError, BridgeResult},
};

/// Caller-supplied inputs for recording an attestation.
///
/// `compliance_score` is on the 0-100 scale used by the API surface; the
/// bridge rescales it to the 0-1 fraction the chain expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttestationParams {
    pub commitment_id: String,
    pub attestor_address: String,
    pub compliance_score: f64,
    pub violation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_earned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// An attestation as acknowledged by the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAttestation {
    pub attestation_id: String,
    pub commitment_id: String,
    pub compliance_score: f64,
    pub violation: bool,
    pub fee_earned: String,
    pub recorded_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// Maps a `record_attestation` return value.
///
/// Both identifiers are mandatory. `recorded_at` falls back to the
/// invocation time when the chain omits it.
pub fn attestation_from_value(
    value: &Value,
    tx_hash: Option<String>,
) -> BridgeResult<ChainAttestation> {
    let obj = value.as_object();
    let attestation_id = string_field(obj, &["attestationId", "id"], "");
    let commitment_id = string_field(obj, &["commitmentId", "commitment_id"], "");

    if attestation_id.is_empty() || commitment_id.is_empty() {
        return Err(BridgeError::call_failed_with(
            "decode_attestation",
            "chain returned an invalid attestation payload",
            value.clone(),
        ));
    }

    let recorded_at = string_field(obj, &["recordedAt", "recorded_at"], "");
    let reported_hash = string_field(obj, &["txHash"], "");

    Ok(ChainAttestation {
        attestation_id,
        commitment_id,
        compliance_score: number_field(obj, &["complianceScore", "compliance_score"], 0.0),
        violation: field(obj, &["violation"]).and_then(Value::as_bool).unwrap_or(false),
        fee_earned: string_field(obj, &["feeEarned", "fees_earned"], "0"),
        recorded_at: if recorded_at.is_empty() {
            Utc::now().to_rfc3339()
        } else {
            recorded_at
        },
        tx_hash: if reported_hash.is_empty() {
            tx_hash
        } else {
            Some(reported_hash)
        },
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn both_identifiers_are_mandatory() {
        let err = attestation_from_value(&json!({"attestationId": "ATT-1"}), None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BlockchainCallFailed);

        let err = attestation_from_value(&json!({"commitment_id": "CMT-1"}), None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BlockchainCallFailed);

        let err = attestation_from_value(&json!(null), None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BlockchainCallFailed);
    }

    #[test]
    fn maps_a_full_payload() {
        let mapped = attestation_from_value(
            &json!({
                "id": "ATT-42",
                "commitment_id": "CMT-7",
                "compliance_score": 0.91,
                "violation": true,
                "fees_earned": "3.25",
                "recorded_at": "2024-06-01T10:00:00Z"
            }),
            Some("submit-hash".to_owned()),
        )
        .unwrap();

        assert_eq!(mapped.attestation_id, "ATT-42");
        assert_eq!(mapped.commitment_id, "CMT-7");
        assert_eq!(mapped.compliance_score, 0.91);
        assert!(mapped.violation);
        assert_eq!(mapped.fee_earned, "3.25");
        assert_eq!(mapped.recorded_at, "2024-06-01T10:00:00Z");
        assert_eq!(mapped.tx_hash.as_deref(), Some("submit-hash"));
    }

    #[test]
    fn recorded_at_defaults_to_invocation_time() {
        let mapped = attestation_from_value(
            &json!({"attestationId": "ATT-1", "commitmentId": "CMT-1"}),
            None,
        )
        .unwrap();

        assert!(!mapped.recorded_at.is_empty());
        assert!(!mapped.violation);
        assert_eq!(mapped.fee_earned, "0");
        assert_eq!(mapped.tx_hash, None);
    }
}
