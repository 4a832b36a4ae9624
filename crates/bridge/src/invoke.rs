//! Builds, simulates and (for writes) submits a single contract call.

use std::sync::Arc;

use commitment_bridge_chainio::{
    traits::LedgerRpc, types::AccountEntry, Invocation, TransactionEnvelope,
};
use commitment_bridge_primitives::{BridgeError, BridgeResult};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    config::BridgeConfig,
    waiter::{wait_for_transaction, CONFIRMATION_TIMEOUT},
};

/// Whether an invocation is a dry-run read or a submitted write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    /// Simulate only: no signature, no submission, no chain-visible side
    /// effect.
    Read,
    /// Prepare, sign, submit and await confirmation. Consumes one sequence
    /// number on the source account and one ledger-write fee.
    Write,
}

/// A decoded invocation result, plus the submitted hash for writes.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationOutcome {
    pub value: Value,
    pub tx_hash: Option<String>,
}

/// Executes single contract calls against an injected ledger.
#[derive(Debug)]
pub struct ContractInvoker<R> {
    config: BridgeConfig,
    rpc: Arc<R>,
}

impl<R: LedgerRpc> ContractInvoker<R> {
    pub fn new(config: BridgeConfig, rpc: Arc<R>) -> Self {
        Self { config, rpc }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Runs `method` with `args` against `contract_id`.
    ///
    /// Every call simulates first. Simulation failures are not retried;
    /// the raw simulation error travels with the failure.
    pub async fn invoke(
        &self,
        contract_id: &str,
        method: &'static str,
        args: Vec<Value>,
        mode: CallMode,
    ) -> BridgeResult<InvocationOutcome> {
        if contract_id.is_empty() {
            return Err(BridgeError::unavailable(
                method,
                "missing contract configuration",
            ));
        }

        let source = self.config.source_public_key(method)?.ok_or_else(|| {
            BridgeError::unavailable(method, "missing source account configuration")
        })?;

        // Sequence numbers are never cached: writes re-fetch the account
        // each call, reads use a synthetic entry and skip the fetch.
        let account = match mode {
            CallMode::Write => self.rpc.get_account(&source).await.map_err(|e| {
                BridgeError::call_failed_from(method, "could not fetch source account", e)
            })?,
            CallMode::Read => AccountEntry::synthetic(source),
        };

        let envelope = TransactionEnvelope::new(
            account.account_id,
            account.sequence + 1,
            self.config.network_passphrase.clone(),
            Invocation {
                contract_id: contract_id.to_owned(),
                method: method.to_owned(),
                args,
            },
        );

        let simulation = self
            .rpc
            .simulate_transaction(&envelope)
            .await
            .map_err(|e| BridgeError::call_failed_from(method, "could not simulate", e))?;
        if let Some(error) = simulation.error {
            return Err(BridgeError::call_failed_with(
                method,
                format!("simulation failed for {method}"),
                json!({ "error": error }),
            ));
        }

        if mode == CallMode::Read {
            return Ok(InvocationOutcome {
                value: simulation.return_value(),
                tx_hash: None,
            });
        }

        let signer = self
            .config
            .signer(method)?
            .ok_or_else(|| BridgeError::unavailable(method, "missing signing key for write calls"))?;

        let prepared = self
            .rpc
            .prepare_transaction(&envelope)
            .await
            .map_err(|e| BridgeError::call_failed_from(method, "could not prepare transaction", e))?;
        let signed = signer
            .sign(prepared)
            .map_err(|e| BridgeError::call_failed_from(method, "could not sign transaction", e))?;
        let sent = self
            .rpc
            .send_transaction(&signed)
            .await
            .map_err(|e| BridgeError::call_failed_from(method, "could not submit transaction", e))?;

        info!(event = "transaction submitted", %method, hash = %sent.hash);

        let value =
            wait_for_transaction(self.rpc.as_ref(), method, &sent.hash, CONFIRMATION_TIMEOUT)
                .await?;

        Ok(InvocationOutcome {
            value,
            tx_hash: Some(sent.hash),
        })
    }
}
