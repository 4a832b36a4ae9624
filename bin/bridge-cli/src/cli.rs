use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bridge-cli",
    about = "Liquidity-commitment bridge CLI for the Soroban contracts",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    #[arg(long, global = true, help = "URL of the Soroban RPC endpoint")]
    pub(crate) rpc_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    CreateCommitment(CreateCommitmentArgs),

    GetCommitment(GetCommitmentArgs),

    UserCommitments(UserCommitmentsArgs),

    RecordAttestation(RecordAttestationArgs),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Create a commitment on chain", version)]
pub(crate) struct CreateCommitmentArgs {
    #[arg(long, help = "owner address the commitment belongs to")]
    pub(crate) owner: String,

    #[arg(long, help = "asset ticker, e.g. XLM")]
    pub(crate) asset: String,

    #[arg(long, help = "amount in the asset's native precision")]
    pub(crate) amount: String,

    #[arg(long, help = "commitment duration in days")]
    pub(crate) duration_days: u32,

    #[arg(long, help = "maximum tolerated loss in basis points")]
    pub(crate) max_loss_bps: u32,

    #[arg(long, help = "optional metadata as a JSON object")]
    pub(crate) metadata: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Fetch a single commitment", version)]
pub(crate) struct GetCommitmentArgs {
    #[arg(long, help = "commitment id to fetch")]
    pub(crate) commitment_id: String,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Fetch every commitment an owner holds", version)]
pub(crate) struct UserCommitmentsArgs {
    #[arg(long, help = "owner address to enumerate")]
    pub(crate) owner: String,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Record an attestation against a commitment", version)]
pub(crate) struct RecordAttestationArgs {
    #[arg(long, help = "commitment the attestation applies to")]
    pub(crate) commitment_id: String,

    #[arg(long, help = "address of the attesting party")]
    pub(crate) attestor: String,

    #[arg(long, help = "compliance score on the 0-100 scale")]
    pub(crate) compliance_score: f64,

    #[arg(long, help = "whether this attestation reports a violation")]
    pub(crate) violation: bool,

    #[arg(long, help = "fee earned since the last attestation")]
    pub(crate) fee_earned: Option<String>,

    #[arg(long, help = "ISO-8601 timestamp; defaults to now")]
    pub(crate) timestamp: Option<String>,

    #[arg(long, help = "optional details as a JSON object")]
    pub(crate) details: Option<String>,
}
