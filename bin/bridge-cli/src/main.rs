//! Operator CLI for the liquidity-commitment bridge.
//!
//! Drives the on-chain operations against a configured deployment and
//! prints results as pretty JSON; failures print the normalized error body
//! on stderr.

mod cli;
mod logging;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use commitment_bridge::{BridgeConfig, CommitmentBridge};
use commitment_bridge_chainio::SorobanClient;
use commitment_bridge_primitives::{BridgeError, CreateCommitmentParams, RecordAttestationParams};
use serde_json::Value;
use tracing::info;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init();

    let cli = Cli::parse();

    let mut config = BridgeConfig::from_env();
    if let Some(rpc_url) = cli.rpc_url.clone() {
        config.rpc_url = rpc_url;
    }

    info!(event = "bridge configured", rpc_url = %config.rpc_url);

    let rpc = Arc::new(SorobanClient::new(config.rpc_url.clone()));
    let bridge = CommitmentBridge::new(config, rpc);

    match run(&bridge, cli.command).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_body())?);
            std::process::exit(1);
        }
    }
}

async fn run(
    bridge: &CommitmentBridge<SorobanClient>,
    command: Commands,
) -> Result<Value, BridgeError> {
    match command {
        Commands::CreateCommitment(args) => {
            let metadata = parse_json_flag(args.metadata.as_deref())?;
            let params = CreateCommitmentParams {
                owner_address: args.owner,
                asset: args.asset,
                amount: args.amount,
                duration_days: args.duration_days,
                max_loss_bps: args.max_loss_bps,
                metadata,
            };
            encode(&bridge.create_commitment(&params).await?)
        }
        Commands::GetCommitment(args) => {
            encode(&bridge.get_commitment(&args.commitment_id).await?)
        }
        Commands::UserCommitments(args) => {
            encode(&bridge.get_user_commitments(&args.owner).await?)
        }
        Commands::RecordAttestation(args) => {
            let details = parse_json_flag(args.details.as_deref())?;
            let params = RecordAttestationParams {
                commitment_id: args.commitment_id,
                attestor_address: args.attestor,
                compliance_score: args.compliance_score,
                violation: args.violation,
                fee_earned: args.fee_earned,
                timestamp: args.timestamp,
                details,
            };
            encode(&bridge.record_attestation(&params).await?)
        }
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, BridgeError> {
    serde_json::to_value(value).map_err(|e| BridgeError::Internal {
        message: "could not encode result".to_owned(),
        source: Some(Box::new(e)),
    })
}

fn parse_json_flag(raw: Option<&str>) -> Result<Option<Value>, BridgeError> {
    match raw {
        None => Ok(None),
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| BridgeError::bad_request(format!("invalid JSON argument: {e}"))),
    }
}
