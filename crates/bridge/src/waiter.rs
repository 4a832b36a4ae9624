//! Converts an asynchronous submit into a synchronous outcome by polling.

use std::time::Duration;

use commitment_bridge_chainio::{traits::LedgerRpc, types::TransactionStatus};
use commitment_bridge_primitives::{BridgeError, BridgeResult};
use serde_json::{json, Value};
use tracing::{debug, trace};

/// Fixed polling cadence; ledger close times are on this order.
pub const POLL_INTERVAL: Duration = Duration::from_millis(600);

/// Default budget for a submitted transaction to reach a terminal status.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Polls `hash` until SUCCESS, FAILED, or the timeout elapses.
///
/// SUCCESS yields the decoded return value (`Null` when the transaction
/// returns nothing). FAILED is final and fails immediately. Any other
/// status keeps the poll running.
pub async fn wait_for_transaction<R: LedgerRpc>(
    rpc: &R,
    method: &'static str,
    hash: &str,
    timeout: Duration,
) -> BridgeResult<Value> {
    let started = tokio::time::Instant::now();

    while started.elapsed() < timeout {
        let tx = rpc.get_transaction(hash).await.map_err(|e| {
            BridgeError::call_failed_from(method, format!("could not poll transaction {hash}"), e)
        })?;

        match tx.status {
            TransactionStatus::Success => {
                debug!(%hash, "transaction confirmed");
                return Ok(tx.return_value.unwrap_or(Value::Null));
            }
            TransactionStatus::Failed => {
                return Err(BridgeError::call_failed_with(
                    method,
                    format!("transaction {hash} failed on chain"),
                    json!({ "hash": hash, "txStatus": tx.status.to_string() }),
                ));
            }
            status => {
                trace!(%hash, %status, "transaction not yet terminal");
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        }
    }

    Err(BridgeError::ConfirmationTimeout {
        method,
        hash: hash.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use commitment_bridge_chainio::types::GetTransactionResponse;
    use commitment_bridge_primitives::ErrorCode;
    use commitment_bridge_test_utils::MockLedger;
    use serde_json::json;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn success_yields_the_return_value() {
        let ledger = MockLedger::new()
            .with_transaction_status(GetTransactionResponse::not_found())
            .with_transaction_status(GetTransactionResponse::success(Some(json!("CMT-1"))));

        let value = wait_for_transaction(&ledger, "create_commitment", "abc", CONFIRMATION_TIMEOUT)
            .await
            .unwrap();

        assert_eq!(value, json!("CMT-1"));
        assert_eq!(ledger.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn success_without_a_return_value_yields_null() {
        let ledger =
            MockLedger::new().with_transaction_status(GetTransactionResponse::success(None));

        let value = wait_for_transaction(&ledger, "create_commitment", "abc", CONFIRMATION_TIMEOUT)
            .await
            .unwrap();

        assert_eq!(value, Value::Null);
    }

    #[tokio::test(start_paused = true)]
    async fn ledger_failure_is_terminal() {
        let ledger = MockLedger::new().with_transaction_status(GetTransactionResponse::failed());

        let err = wait_for_transaction(&ledger, "create_commitment", "abc", CONFIRMATION_TIMEOUT)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::BlockchainCallFailed);
        assert_eq!(err.http_status(), 502);
        assert_eq!(ledger.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn a_poll_that_never_terminates_times_out_with_the_hash() {
        let ledger = MockLedger::new().with_transaction_status(GetTransactionResponse::not_found());

        let err = wait_for_transaction(&ledger, "create_commitment", "abc123", CONFIRMATION_TIMEOUT)
            .await
            .unwrap_err();

        match &err {
            BridgeError::ConfirmationTimeout { hash, .. } => assert_eq!(hash, "abc123"),
            other => panic!("expected a confirmation timeout, got {other:?}"),
        }
        assert_eq!(err.code(), ErrorCode::BlockchainCallFailed);
        assert_eq!(err.http_status(), 504);
        assert!(ledger.call_count() > 1);
    }
}
