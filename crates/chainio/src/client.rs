//! JSON-RPC 2.0 client for a Soroban RPC endpoint.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::*;

use crate::{
    envelope::{SignedEnvelope, TransactionEnvelope},
    error::{ClientError, ClientResult},
    traits::LedgerRpc,
    types::{
        AccountEntry, GetTransactionResponse, SendTransactionResponse,
        SimulateTransactionResponse,
    },
};

#[derive(Debug, Clone)]
pub struct SorobanClient {
    client: reqwest::Client,
    base_url: String,
}

impl SorobanClient {
    pub fn new(base_url: String) -> Self {
        trace!(%base_url, "creating soroban rpc client");
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> ClientResult<R> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        trace!(%method, "dispatching rpc request");

        let response = self.client.post(&self.base_url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status(status.to_string(), body));
        }

        let envelope: RpcResponse<R> = response.json().await?;
        if let Some(error) = envelope.error {
            return Err(ClientError::Server(error.code, error.message));
        }

        envelope.result.ok_or_else(|| {
            ClientError::MalformedResponse(format!("{method} returned neither result nor error"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[async_trait]
impl LedgerRpc for SorobanClient {
    async fn get_account(&self, account_id: &str) -> ClientResult<AccountEntry> {
        self.call("getAccount", json!({ "accountId": account_id })).await
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> ClientResult<SimulateTransactionResponse> {
        self.call("simulateTransaction", json!({ "transaction": envelope })).await
    }

    async fn prepare_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> ClientResult<TransactionEnvelope> {
        self.call("prepareTransaction", json!({ "transaction": envelope })).await
    }

    async fn send_transaction(
        &self,
        envelope: &SignedEnvelope,
    ) -> ClientResult<SendTransactionResponse> {
        let response: SendTransactionResponse = self
            .call("sendTransaction", json!({ "transaction": envelope }))
            .await?;
        debug!(hash = %response.hash, status = %response.status, "transaction submitted");
        Ok(response)
    }

    async fn get_transaction(&self, hash: &str) -> ClientResult<GetTransactionResponse> {
        self.call("getTransaction", json!({ "hash": hash })).await
    }
}
