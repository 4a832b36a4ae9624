//! The public bridge operations.
//!
//! Each operation validates its identifying inputs before touching the
//! network, invokes exactly one contract method (plus the fallback
//! protocol for bulk reads), and maps the raw result into a typed record.

use std::sync::Arc;

use chrono::Utc;
use commitment_bridge_chainio::traits::LedgerRpc;
use commitment_bridge_primitives::{
    attestation_from_value, coerce, commitment_from_value, commitment_list_from_value,
    create_outcome_from_value, BridgeError, BridgeResult, ChainAttestation, ChainCommitment,
    CreateCommitmentOutcome, CreateCommitmentParams, RecordAttestationParams,
};
use futures_util::future::try_join_all;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::{
    config::{BridgeConfig, ContractKind},
    invoke::{CallMode, ContractInvoker},
};

/// The chain's attestation method takes a 0-1 fraction; the API surface
/// speaks 0-100.
const COMPLIANCE_SCALE: f64 = 100.0;

/// Minimum plausible owner-address length. A sanity check, not an
/// address-format validator.
const MIN_OWNER_ADDRESS_LEN: usize = 5;

/// The on-chain liquidity-commitment operations.
#[derive(Debug)]
pub struct CommitmentBridge<R> {
    invoker: ContractInvoker<R>,
}

impl<R: LedgerRpc> CommitmentBridge<R> {
    pub fn new(config: BridgeConfig, rpc: Arc<R>) -> Self {
        Self {
            invoker: ContractInvoker::new(config, rpc),
        }
    }

    /// Creates a commitment on chain. Write call; waits for confirmation.
    pub async fn create_commitment(
        &self,
        params: &CreateCommitmentParams,
    ) -> BridgeResult<CreateCommitmentOutcome> {
        validate_owner_address(&params.owner_address)?;

        let args = vec![
            json!(params.owner_address),
            json!(params.asset),
            json!(params.amount),
            json!(params.duration_days),
            json!(params.max_loss_bps),
            params.metadata.clone().unwrap_or_else(|| json!({})),
        ];

        let invocation = self
            .invoker
            .invoke(
                self.invoker.config().contract_id(ContractKind::CommitmentCore),
                "create_commitment",
                args,
                CallMode::Write,
            )
            .await?;

        let outcome = create_outcome_from_value(&invocation.value, invocation.tx_hash)?;
        info!(event = "commitment created", commitment_id = %outcome.commitment_id);
        Ok(outcome)
    }

    /// Fetches a single commitment. Simulate-only read.
    pub async fn get_commitment(&self, commitment_id: &str) -> BridgeResult<ChainCommitment> {
        if commitment_id.is_empty() {
            return Err(BridgeError::bad_request("missing commitment id"));
        }

        let invocation = self
            .invoker
            .invoke(
                self.invoker.config().contract_id(ContractKind::CommitmentCore),
                "get_commitment",
                vec![json!(commitment_id)],
                CallMode::Read,
            )
            .await?;

        commitment_from_value(&invocation.value)
    }

    /// Fetches every commitment owned by `owner_address`.
    ///
    /// Not every deployment exposes the bulk accessor, so an empty or
    /// failed bulk read falls back to enumerating ids and fetching each
    /// commitment concurrently. The returned collection follows the id
    /// order regardless of completion order. An owner with no commitments
    /// on either path yields an empty vec, not an error.
    pub async fn get_user_commitments(
        &self,
        owner_address: &str,
    ) -> BridgeResult<Vec<ChainCommitment>> {
        validate_owner_address(owner_address)?;
        let contract_id = self.invoker.config().contract_id(ContractKind::CommitmentCore);

        match self.bulk_user_commitments(contract_id, owner_address).await {
            Ok(commitments) if !commitments.is_empty() => return Ok(commitments),
            Ok(_) => {
                debug!(%owner_address, "bulk read returned no commitments, enumerating ids")
            }
            Err(e) => warn!(%owner_address, ?e, "bulk read unavailable, enumerating ids"),
        }

        let ids_result = self
            .invoker
            .invoke(
                contract_id,
                "get_user_commitment_ids",
                vec![json!(owner_address)],
                CallMode::Read,
            )
            .await?;

        let commitment_ids: Vec<String> = match ids_result.value.as_array() {
            Some(items) => items
                .iter()
                .map(|item| coerce::as_string(Some(item), ""))
                .filter(|id| !id.is_empty())
                .collect(),
            None => Vec::new(),
        };

        try_join_all(commitment_ids.iter().map(|id| self.get_commitment(id))).await
    }

    /// Records an attestation. Write call; waits for confirmation.
    pub async fn record_attestation(
        &self,
        params: &RecordAttestationParams,
    ) -> BridgeResult<ChainAttestation> {
        if params.commitment_id.is_empty() {
            return Err(BridgeError::bad_request("missing commitment id for attestation"));
        }

        let args = vec![
            json!(params.commitment_id),
            json!(params.attestor_address),
            json!(params.compliance_score / COMPLIANCE_SCALE),
            json!(params.violation),
            json!(params.fee_earned.clone().unwrap_or_else(|| "0".to_owned())),
            json!(params
                .timestamp
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339())),
            params.details.clone().unwrap_or_else(|| json!({})),
        ];

        let invocation = self
            .invoker
            .invoke(
                self.invoker
                    .config()
                    .contract_id(ContractKind::AttestationEngine),
                "record_attestation",
                args,
                CallMode::Write,
            )
            .await?;

        attestation_from_value(&invocation.value, invocation.tx_hash)
    }

    async fn bulk_user_commitments(
        &self,
        contract_id: &str,
        owner_address: &str,
    ) -> BridgeResult<Vec<ChainCommitment>> {
        let invocation = self
            .invoker
            .invoke(
                contract_id,
                "get_user_commitments",
                vec![json!(owner_address)],
                CallMode::Read,
            )
            .await?;
        commitment_list_from_value(&invocation.value)
    }
}

fn validate_owner_address(owner_address: &str) -> BridgeResult<()> {
    if owner_address.trim().len() < MIN_OWNER_ADDRESS_LEN {
        return Err(BridgeError::bad_request_with(
            "invalid owner address",
            json!({ "ownerAddress": owner_address }),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use commitment_bridge_chainio::types::GetTransactionResponse;
    use commitment_bridge_primitives::{CommitmentStatus, ErrorCode};
    use commitment_bridge_test_utils::MockLedger;
    use serde_json::json;

    use super::*;

    fn read_config() -> BridgeConfig {
        BridgeConfig {
            commitment_core_contract: "CCORE".to_owned(),
            attestation_engine_contract: "CATTEST".to_owned(),
            source_account: Some("GREADONLY".to_owned()),
            ..BridgeConfig::default()
        }
    }

    fn write_config() -> BridgeConfig {
        BridgeConfig {
            source_secret_key: Some(stellar_strkey::ed25519::PrivateKey([9u8; 32]).to_string()),
            source_account: None,
            ..read_config()
        }
    }

    fn bridge_with(config: BridgeConfig, ledger: &Arc<MockLedger>) -> CommitmentBridge<MockLedger> {
        CommitmentBridge::new(config, ledger.clone())
    }

    fn create_params(owner: &str) -> CreateCommitmentParams {
        CreateCommitmentParams {
            owner_address: owner.to_owned(),
            asset: "XLM".to_owned(),
            amount: "1000".to_owned(),
            duration_days: 90,
            max_loss_bps: 500,
            metadata: None,
        }
    }

    fn attestation_params(commitment_id: &str) -> RecordAttestationParams {
        RecordAttestationParams {
            commitment_id: commitment_id.to_owned(),
            attestor_address: "GATTESTOR".to_owned(),
            compliance_score: 87.0,
            violation: false,
            fee_earned: None,
            timestamp: Some("2024-06-01T00:00:00Z".to_owned()),
            details: None,
        }
    }

    #[tokio::test]
    async fn invalid_identifying_arguments_never_reach_the_rpc() {
        let ledger = Arc::new(MockLedger::new());
        let bridge = bridge_with(write_config(), &ledger);

        let err = bridge.create_commitment(&create_params("abcd")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err = bridge.create_commitment(&create_params("")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err = bridge.get_commitment("").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err = bridge.get_user_commitments("    ").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err = bridge
            .record_attestation(&attestation_params(""))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn get_commitment_maps_a_simulated_read() {
        let ledger = Arc::new(MockLedger::new().with_simulated_value(json!({
            "id": "CMT-001",
            "status": "active",
            "complianceScore": 92
        })));
        let bridge = bridge_with(read_config(), &ledger);

        let commitment = bridge.get_commitment("CMT-001").await.unwrap();

        assert_eq!(commitment.id, "CMT-001");
        assert_eq!(commitment.status, CommitmentStatus::Active);
        assert_eq!(commitment.compliance_score, 92.0);
        assert_eq!(commitment.amount, "0");

        let calls = ledger.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].rpc, "simulateTransaction");
        assert_eq!(calls[0].detail, "get_commitment");
    }

    #[tokio::test]
    async fn create_accepts_a_bare_string_id() {
        let ledger = Arc::new(
            MockLedger::new()
                .with_send_hash("txhash-1")
                .with_transaction_status(GetTransactionResponse::success(Some(json!("CMT-XYZ")))),
        );
        let bridge = bridge_with(write_config(), &ledger);

        let outcome = bridge
            .create_commitment(&create_params("GOWNER12345"))
            .await
            .unwrap();

        assert_eq!(outcome.commitment_id, "CMT-XYZ");
        assert_eq!(outcome.commitment.id, "CMT-XYZ");
        assert_eq!(outcome.commitment.amount, "0");
        assert_eq!(outcome.commitment.status, CommitmentStatus::Unknown);
        assert_eq!(outcome.tx_hash.as_deref(), Some("txhash-1"));

        // the submitted args carry the caller's inputs plus default metadata
        let envelope = &ledger.simulated_envelopes()[0];
        assert_eq!(envelope.operation.args[0], json!("GOWNER12345"));
        assert_eq!(envelope.operation.args[5], json!({}));
    }

    #[tokio::test]
    async fn compliance_score_is_rescaled_for_the_chain() {
        let ledger = Arc::new(
            MockLedger::new()
                .with_send_hash("txhash-2")
                .with_transaction_status(GetTransactionResponse::success(Some(json!({
                    "attestationId": "ATT-1",
                    "commitmentId": "CMT-1",
                    "complianceScore": 0.87,
                    "violation": false
                })))),
        );
        let bridge = bridge_with(write_config(), &ledger);

        let attestation = bridge
            .record_attestation(&attestation_params("CMT-1"))
            .await
            .unwrap();

        assert_eq!(attestation.attestation_id, "ATT-1");
        assert_eq!(attestation.tx_hash.as_deref(), Some("txhash-2"));

        let envelope = &ledger.simulated_envelopes()[0];
        assert_eq!(envelope.operation.contract_id, "CATTEST");
        assert_eq!(envelope.operation.args[2], json!(0.87));
        assert_eq!(envelope.operation.args[4], json!("0"));
        assert_eq!(envelope.operation.args[5], json!("2024-06-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn bulk_read_with_rows_skips_the_fallback() {
        let ledger = Arc::new(MockLedger::new().with_simulated_value(json!([
            {"id": "CMT-1", "status": "ACTIVE"},
            {"id": "CMT-2", "status": "SETTLED"}
        ])));
        let bridge = bridge_with(read_config(), &ledger);

        let commitments = bridge.get_user_commitments("GOWNER12345").await.unwrap();

        assert_eq!(commitments.len(), 2);
        assert_eq!(ledger.simulated_methods(), vec!["get_user_commitments"]);
    }

    #[tokio::test]
    async fn empty_bulk_read_falls_back_to_id_enumeration() {
        let ledger = Arc::new(
            MockLedger::new()
                .with_simulated_value(json!([]))
                .with_simulated_value(json!(["CMT-1", "CMT-2"]))
                .with_simulated_value(json!({"id": "CMT-1"}))
                .with_simulated_value(json!({"id": "CMT-2"})),
        );
        let bridge = bridge_with(read_config(), &ledger);

        let commitments = bridge.get_user_commitments("GOWNER12345").await.unwrap();

        let ids: Vec<_> = commitments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["CMT-1", "CMT-2"]);
        assert_eq!(
            ledger.simulated_methods(),
            vec![
                "get_user_commitments",
                "get_user_commitment_ids",
                "get_commitment",
                "get_commitment"
            ]
        );
    }

    #[tokio::test]
    async fn failed_bulk_read_falls_back_to_id_enumeration() {
        let ledger = Arc::new(
            MockLedger::new()
                .with_simulation_error("unknown function: get_user_commitments")
                .with_simulated_value(json!([])),
        );
        let bridge = bridge_with(read_config(), &ledger);

        let commitments = bridge.get_user_commitments("GOWNER12345").await.unwrap();

        assert!(commitments.is_empty());
        assert_eq!(
            ledger.simulated_methods(),
            vec!["get_user_commitments", "get_user_commitment_ids"]
        );
    }

    #[tokio::test]
    async fn missing_contract_configuration_is_unavailable() {
        let ledger = Arc::new(MockLedger::new());
        let config = BridgeConfig {
            source_account: Some("GREADONLY".to_owned()),
            ..BridgeConfig::default()
        };
        let bridge = bridge_with(config, &ledger);

        let err = bridge.get_commitment("CMT-1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BlockchainUnavailable);
        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn an_unconfirmed_write_times_out_with_the_hash() {
        let ledger = Arc::new(
            MockLedger::new()
                .with_send_hash("txhash-stuck")
                .with_transaction_status(GetTransactionResponse::not_found()),
        );
        let bridge = bridge_with(write_config(), &ledger);

        let err = bridge
            .create_commitment(&create_params("GOWNER12345"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::BlockchainCallFailed);
        assert_eq!(err.http_status(), 504);
        match err {
            BridgeError::ConfirmationTimeout { hash, .. } => assert_eq!(hash, "txhash-stuck"),
            other => panic!("expected a confirmation timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn a_commitment_row_without_an_id_fails_the_read() {
        let ledger =
            Arc::new(MockLedger::new().with_simulated_value(json!({"status": "ACTIVE"})));
        let bridge = bridge_with(read_config(), &ledger);

        let err = bridge.get_commitment("CMT-1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BlockchainCallFailed);

        let body = err.to_body();
        assert_eq!(body.status, 502);
    }

    #[tokio::test]
    async fn ids_path_tolerates_non_array_and_junk_ids() {
        let ledger = Arc::new(
            MockLedger::new()
                .with_simulated_value(json!([]))
                .with_simulated_value(json!(["CMT-1", "", 17, null]))
                .with_simulated_value(json!({"id": "CMT-1"}))
                .with_simulated_value(json!({"id": "17"})),
        );
        let bridge = bridge_with(read_config(), &ledger);

        let commitments = bridge.get_user_commitments("GOWNER12345").await.unwrap();

        // "" and null are dropped; 17 is stringified
        let ids: Vec<_> = commitments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["CMT-1", "17"]);
    }
}
