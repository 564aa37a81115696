use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use schema_change_core::config::DEFAULT_MAX_RECORD_BYTES;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Largest record payload accepted when reading, in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RECORD_BYTES)]
    pub max_record_bytes: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every record in a schema-change log
    Dump {
        /// Log file to read
        file: PathBuf,

        /// Output form
        #[arg(short, long, value_enum, default_value_t = Format::Debug)]
        format: Format,
    },

    /// Check that every record decodes and re-encodes without loss
    Verify {
        /// Log file to read
        file: PathBuf,
    },

    /// Append records given as one JSON document per line
    Encode {
        /// Input file with canonical JSON records, one per line
        input: PathBuf,

        /// Log file to append to (created if missing)
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable summary
    Debug,
    /// Canonical JSON, as stored in the log
    Json,
}
