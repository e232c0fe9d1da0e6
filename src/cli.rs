// src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Command-line interface options for billing-sim.
#[derive(Parser, Debug)]
#[command(
    name = "billing-sim",
    version,
    about = "Replay billing provider calls against a simulated customer and subscription",
    long_about = None
)]
pub struct Cli {
    /// Path to the domain seed (YAML or JSON)
    #[arg(short, long, env = "BILLING_SIM_SEED")]
    pub seed: PathBuf,

    /// Path to harness config; built-in defaults when omitted
    #[arg(short, long, env = "BILLING_SIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Script of provider calls to replay
    #[arg(short = 'S', long)]
    pub script: Option<PathBuf>,

    /// Print full resident resources instead of the snapshot
    #[arg(short, long)]
    pub full: bool,

    #[arg(short, long, help = "turn on debug logging")]
    pub debug: bool,
}
