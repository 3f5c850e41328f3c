mod analysis;
mod cli;
mod confidence;
mod error;
mod fmt;
mod importer;
mod matcher;
mod models;
mod normalize;
mod report;
mod settings;
mod similarity;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MATCHBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reconcile(args) => cli::reconcile::run(args),
        Commands::Preview {
            file,
            rows,
            delimiter,
        } => cli::preview::run(&file, rows, delimiter.as_deref()),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Init => cli::config::init(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
