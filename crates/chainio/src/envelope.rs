//! Transaction envelopes and their ed25519 signing.
//!
//! The signature commits to the SHA-256 of the envelope's canonical JSON
//! encoding; the signer is derived from the source account's S... seed.

use ed25519_dalek::{Signer as _, SigningKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::{
    constants::{BASE_FEE, TX_VALIDITY_WINDOW_SECS},
    error::{ClientError, ClientResult},
};

/// A single contract invocation: one method with ordered native args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub contract_id: String,
    pub method: String,
    pub args: Vec<Value>,
}

/// An unsigned single-operation transaction envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEnvelope {
    pub source_account: String,
    pub sequence: i64,
    /// Fee in stroops, fixed at construction.
    pub fee: u64,
    pub network_passphrase: String,
    /// Envelope validity window in seconds.
    pub valid_for_secs: u64,
    pub operation: Invocation,
}

impl TransactionEnvelope {
    pub fn new(
        source_account: impl Into<String>,
        sequence: i64,
        network_passphrase: impl Into<String>,
        operation: Invocation,
    ) -> Self {
        Self {
            source_account: source_account.into(),
            sequence,
            fee: BASE_FEE,
            network_passphrase: network_passphrase.into(),
            valid_for_secs: TX_VALIDITY_WINDOW_SECS,
            operation,
        }
    }

    /// The digest a signer commits to.
    pub fn signature_base(&self) -> ClientResult<[u8; 32]> {
        let bytes = serde_json::to_vec(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

/// An envelope plus the source account's signature over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedEnvelope {
    pub envelope: TransactionEnvelope,
    /// G... address of the signer.
    pub public_key: String,
    /// Hex-encoded ed25519 signature over [`TransactionEnvelope::signature_base`].
    pub signature: String,
}

/// Holds the source account's signing key.
pub struct EnvelopeSigner {
    signing_key: SigningKey,
    public_key: String,
}

impl EnvelopeSigner {
    /// Decodes an S... secret seed into a signer.
    pub fn from_secret(secret: &str) -> ClientResult<Self> {
        let seed = stellar_strkey::ed25519::PrivateKey::from_string(secret)
            .map_err(|e| ClientError::Key(format!("invalid secret seed: {e:?}")))?;
        Ok(Self::from_seed_bytes(seed.0))
    }

    /// Builds a signer directly from raw seed bytes.
    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        let public_key =
            stellar_strkey::ed25519::PublicKey(signing_key.verifying_key().to_bytes()).to_string();
        Self {
            signing_key,
            public_key,
        }
    }

    /// The signer's G... address.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn sign(&self, envelope: TransactionEnvelope) -> ClientResult<SignedEnvelope> {
        let digest = envelope.signature_base()?;
        let signature = self.signing_key.sign(&digest);
        Ok(SignedEnvelope {
            envelope,
            public_key: self.public_key.clone(),
            signature: hex::encode(signature.to_bytes()),
        })
    }
}

impl std::fmt::Debug for EnvelopeSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeSigner")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
