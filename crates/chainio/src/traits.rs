//! Trait seam over the ledger RPC, so callers stay generic and testable.

use async_trait::async_trait;

use crate::{
    envelope::{SignedEnvelope, TransactionEnvelope},
    error::ClientResult,
    types::{
        AccountEntry, GetTransactionResponse, SendTransactionResponse,
        SimulateTransactionResponse,
    },
};

/// The five remote procedures the bridge consumes.
///
/// Implementations are opaque collaborators; the bridge never inspects
/// anything beyond the typed fields in [`crate::types`].
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Fetches live account state. Called once per write, never cached.
    async fn get_account(&self, account_id: &str) -> ClientResult<AccountEntry>;

    /// Dry-runs an envelope without submitting it.
    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> ClientResult<SimulateTransactionResponse>;

    /// Refreshes fee and resource estimates ahead of submission.
    async fn prepare_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> ClientResult<TransactionEnvelope>;

    /// Broadcasts a signed envelope.
    async fn send_transaction(
        &self,
        envelope: &SignedEnvelope,
    ) -> ClientResult<SendTransactionResponse>;

    /// Looks up the status of a submitted transaction.
    async fn get_transaction(&self, hash: &str) -> ClientResult<GetTransactionResponse>;
}
