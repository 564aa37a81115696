//! CLI tool for schema-change log inspection.
//!
//! Provides commands for:
//! - Dumping records in debug or canonical JSON form
//! - Verifying that a log replays without loss
//! - Encoding JSON records into log entries

mod cli;
mod log_file;

use anyhow::Result;
use clap::Parser;
use schema_change_core::config::PersistConfig;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = PersistConfig {
        max_record_bytes: cli.max_record_bytes,
    };

    match cli.command {
        Commands::Dump { file, format } => {
            let count = log_file::dump(&file, &config, format, &mut std::io::stdout().lock())?;
            tracing::info!("Dumped {} records from {}", count, file.display());
        }
        Commands::Verify { file } => {
            let count = log_file::verify(&file, &config)?;
            tracing::info!("Verified {} records in {}", count, file.display());
        }
        Commands::Encode { input, output } => {
            let count = log_file::encode(&input, &output)?;
            tracing::info!("Appended {} records to {}", count, output.display());
        }
    }

    Ok(())
}
