pub mod config;
pub mod preview;
pub mod reconcile;

use clap::{Args, Parser, Subcommand};

use crate::models::MatchStatus;
use crate::similarity::Algorithm;

#[derive(Parser)]
#[command(name = "matchbook", about = "Reconcile a bank statement against an accounting ledger.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match bank and ledger feeds and summarize the result.
    Reconcile(ReconcileArgs),
    /// Show the header and first rows of a feed.
    Preview {
        /// Path to a delimited file with a header row
        file: String,
        /// Number of rows to show (default from settings)
        #[arg(long)]
        rows: Option<usize>,
        /// Field separator (default from settings)
        #[arg(long)]
        delimiter: Option<String>,
    },
    /// Inspect or initialize settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
pub struct ReconcileArgs {
    /// Bank statement file
    pub bank: String,
    /// Accounting ledger file
    pub ledger: String,
    /// Days two dates may differ and still count as the same day
    #[arg(long = "date-tolerance")]
    pub date_tolerance: Option<u32>,
    /// Allowed amount difference, percent of the bank amount (0 = exact)
    #[arg(long = "amount-tolerance")]
    pub amount_tolerance: Option<u32>,
    /// Description similarity: word-overlap, edit-distance, combined
    #[arg(long, value_enum)]
    pub algorithm: Option<Algorithm>,
    /// Seed for reproducible randomized confidences
    #[arg(long, conflicts_with = "random")]
    pub seed: Option<u64>,
    /// Draw exact/unmatched confidences from fresh entropy
    #[arg(long)]
    pub random: bool,
    /// Field separator for both files (default from settings)
    #[arg(long)]
    pub delimiter: Option<String>,
    /// Only list transactions with this status
    #[arg(long, value_enum)]
    pub status: Option<MatchStatus>,
    /// Maximum transaction rows to list (default from settings)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Write the report to this path
    #[arg(long)]
    pub output: Option<String>,
    /// Write JSON instead of CSV (with --output) or print it to stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings.
    Show,
    /// Write default settings if no settings file exists.
    Init,
}
