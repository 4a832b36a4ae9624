//! A scripted in-memory ledger for exercising the bridge without a chain.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use commitment_bridge_chainio::{
    error::ClientResult,
    traits::LedgerRpc,
    types::{
        AccountEntry, GetTransactionResponse, SendTransactionResponse,
        SimulateTransactionResponse,
    },
    SignedEnvelope, TransactionEnvelope,
};
use serde_json::Value;
use tracing::trace;

/// One observed RPC call: the remote procedure plus the interesting part of
/// its argument (contract method, account id, or transaction hash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub rpc: &'static str,
    pub detail: String,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    account_sequence: i64,
    simulations: VecDeque<SimulateTransactionResponse>,
    send_results: VecDeque<SendTransactionResponse>,
    statuses: VecDeque<GetTransactionResponse>,
    simulated_envelopes: Vec<TransactionEnvelope>,
}

/// A scripted [`LedgerRpc`] that records every call it receives.
///
/// Queued responses are consumed front to back. The final queued
/// transaction status repeats forever, so polling loops can be driven to
/// timeout by queueing a single non-terminal status.
#[derive(Debug, Default)]
pub struct MockLedger {
    state: Mutex<MockState>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account_sequence(self, sequence: i64) -> Self {
        self.lock().account_sequence = sequence;
        self
    }

    /// Queues a successful simulation returning `value`.
    pub fn with_simulated_value(self, value: Value) -> Self {
        self.lock()
            .simulations
            .push_back(SimulateTransactionResponse::success(value));
        self
    }

    /// Queues a failed simulation carrying `error`.
    pub fn with_simulation_error(self, error: &str) -> Self {
        self.lock()
            .simulations
            .push_back(SimulateTransactionResponse::failure(error));
        self
    }

    /// Queues a submission acknowledgement for `hash`.
    pub fn with_send_hash(self, hash: &str) -> Self {
        self.lock().send_results.push_back(SendTransactionResponse {
            hash: hash.to_owned(),
            status: "PENDING".to_owned(),
        });
        self
    }

    /// Queues a `getTransaction` response.
    pub fn with_transaction_status(self, response: GetTransactionResponse) -> Self {
        self.lock().statuses.push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Every envelope that reached simulation, in order, args included.
    pub fn simulated_envelopes(&self) -> Vec<TransactionEnvelope> {
        self.lock().simulated_envelopes.clone()
    }

    /// The contract methods that reached simulation, in order.
    pub fn simulated_methods(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.rpc == "simulateTransaction")
            .map(|call| call.detail.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock ledger state poisoned")
    }

    fn record(&self, rpc: &'static str, detail: &str) {
        trace!(%rpc, %detail, "mock ledger call");
        self.lock().calls.push(RecordedCall {
            rpc,
            detail: detail.to_owned(),
        });
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn get_account(&self, account_id: &str) -> ClientResult<AccountEntry> {
        self.record("getAccount", account_id);
        let sequence = self.lock().account_sequence;
        Ok(AccountEntry {
            account_id: account_id.to_owned(),
            sequence,
        })
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> ClientResult<SimulateTransactionResponse> {
        self.record("simulateTransaction", &envelope.operation.method);
        let mut state = self.lock();
        state.simulated_envelopes.push(envelope.clone());
        Ok(state
            .simulations
            .pop_front()
            .unwrap_or_else(|| SimulateTransactionResponse::success(Value::Null)))
    }

    async fn prepare_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> ClientResult<TransactionEnvelope> {
        self.record("prepareTransaction", &envelope.operation.method);
        Ok(envelope.clone())
    }

    async fn send_transaction(
        &self,
        envelope: &SignedEnvelope,
    ) -> ClientResult<SendTransactionResponse> {
        self.record("sendTransaction", &envelope.envelope.operation.method);
        Ok(self.lock().send_results.pop_front().unwrap_or_else(|| {
            SendTransactionResponse {
                hash: "MOCKTXHASH".to_owned(),
                status: "PENDING".to_owned(),
            }
        }))
    }

    async fn get_transaction(&self, hash: &str) -> ClientResult<GetTransactionResponse> {
        self.record("getTransaction", hash);
        let mut state = self.lock();
        let response = if state.statuses.len() > 1 {
            state.statuses.pop_front().expect("length checked above")
        } else if let Some(last) = state.statuses.front() {
            last.clone()
        } else {
            GetTransactionResponse::not_found()
        };
        Ok(response)
    }
}
