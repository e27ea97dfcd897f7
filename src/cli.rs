//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BenchSync - combine benchmark result files and upload them to Firestore
///
/// Merges per-category benchmark JSON files scattered across a directory
/// tree into one combined document, and uploads flat directories of JSON
/// files to a Firestore collection.
///
/// Examples:
///   benchsync combine
///   benchsync combine --input .benchmarks --output benchmarks.json
///   benchsync upload --collection benchmarks
///   benchsync init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .benchsync.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge per-category benchmark files into one combined JSON document
    Combine {
        /// Root directory to walk for benchmark files
        ///
        /// Defaults to `.benchmarks` (or the config file value).
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        /// Output file for the combined document
        ///
        /// Defaults to `benchmarks.json` (or the config file value).
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Upload a flat directory of JSON files as one Firestore document
    ///
    /// Requires a service-account key in the FIRESTORE_CREDENTIALS
    /// environment variable.
    Upload {
        /// Directory of JSON files to upload (non-recursive)
        ///
        /// Defaults to `.benchmarks` (or the config file value).
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        /// Remote collection to create the document in
        ///
        /// Defaults to `benchmarks` (or the config file value).
        #[arg(long, value_name = "NAME")]
        collection: Option<String>,
    },

    /// Generate a default .benchsync.toml configuration file
    InitConfig,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate explicitly provided input directories
        let input = match &self.command {
            Command::Combine { input, .. } => input,
            Command::Upload { input, .. } => input,
            Command::InitConfig => &None,
        };
        if let Some(input) = input {
            if !input.exists() {
                return Err(format!("Input directory does not exist: {}", input.display()));
            }
            if !input.is_dir() {
                return Err(format!("Input path is not a directory: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
