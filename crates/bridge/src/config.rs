//! Bridge configuration, resolved once and injected at construction.

use commitment_bridge_chainio::EnvelopeSigner;
use commitment_bridge_primitives::{BridgeError, BridgeResult};

pub const DEFAULT_RPC_URL: &str = "https://soroban-testnet.stellar.org:443";
pub const DEFAULT_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Which deployed contract an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    CommitmentCore,
    AttestationEngine,
}

/// Everything the bridge needs to reach a deployment.
///
/// An empty contract address or absent key material only becomes an error
/// at invocation time, so read-only deployments stay usable.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub rpc_url: String,
    pub network_passphrase: String,
    pub commitment_core_contract: String,
    pub attestation_engine_contract: String,
    /// S... seed enabling write calls.
    pub source_secret_key: Option<String>,
    /// G... account for read-only deployments without a seed.
    pub source_account: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_owned(),
            network_passphrase: DEFAULT_NETWORK_PASSPHRASE.to_owned(),
            commitment_core_contract: String::new(),
            attestation_engine_contract: String::new(),
            source_secret_key: None,
            source_account: None,
        }
    }
}

impl BridgeConfig {
    /// Reads the configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            rpc_url: env_or("SOROBAN_RPC_URL", DEFAULT_RPC_URL),
            network_passphrase: env_or("SOROBAN_NETWORK_PASSPHRASE", DEFAULT_NETWORK_PASSPHRASE),
            commitment_core_contract: env_or("SOROBAN_COMMITMENT_CORE_CONTRACT", ""),
            attestation_engine_contract: env_or("SOROBAN_ATTESTATION_ENGINE_CONTRACT", ""),
            source_secret_key: non_empty_env("SOROBAN_SERVER_SECRET_KEY"),
            source_account: non_empty_env("SOROBAN_SOURCE_ACCOUNT"),
        }
    }

    pub fn contract_id(&self, kind: ContractKind) -> &str {
        match kind {
            ContractKind::CommitmentCore => &self.commitment_core_contract,
            ContractKind::AttestationEngine => &self.attestation_engine_contract,
        }
    }

    /// The signer for write calls, if a seed is configured.
    ///
    /// A malformed seed is a deployment defect, surfaced as unavailable
    /// rather than a call failure.
    pub(crate) fn signer(&self, method: &'static str) -> BridgeResult<Option<EnvelopeSigner>> {
        match &self.source_secret_key {
            None => Ok(None),
            Some(secret) => EnvelopeSigner::from_secret(secret).map(Some).map_err(|e| {
                BridgeError::unavailable(method, format!("unusable signing key: {e}"))
            }),
        }
    }

    /// The account envelopes are sourced from: the seed's address when a
    /// seed is configured, else the configured read-only account.
    pub(crate) fn source_public_key(&self, method: &'static str) -> BridgeResult<Option<String>> {
        if let Some(signer) = self.signer(method)? {
            return Ok(Some(signer.public_key().to_owned()));
        }
        Ok(self.source_account.clone())
    }
}

fn env_or(key: &str, default: &str) -> String {
    non_empty_env(key).unwrap_or_else(|| default.to_owned())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
