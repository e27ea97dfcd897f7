//! BenchSync - benchmark result aggregation and upload
//!
//! A CLI tool that merges per-category benchmark result files into one
//! combined JSON document, and uploads flat directories of JSON files
//! to a Firestore collection.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad input, credentials, network failure, etc.)

mod cli;
mod combine;
mod config;
mod models;
mod upload;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, Command};
use config::{CombineConfig, Config, UploadConfig};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use upload::firestore::{FirestoreStore, ServiceAccountKey};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("BenchSync v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .benchsync.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".benchsync.toml");

    if path.exists() {
        eprintln!("⚠️  .benchsync.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .benchsync.toml")?;

    println!("✅ Created .benchsync.toml with default settings.");
    println!("   Edit it to customize input directories, output path, and collection.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the selected subcommand.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    match args.command {
        Command::Combine { .. } => run_combine(&config.combine),
        Command::Upload { .. } => run_upload(&config.upload).await,
        Command::InitConfig => Ok(()), // handled in main
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .benchsync.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Run the combine workflow: walk, merge, write.
fn run_combine(config: &CombineConfig) -> Result<()> {
    println!("📊 Combining benchmark files from: {}", config.input.display());

    // Captured once; aggregation itself takes it as an explicit input.
    let default_meta = models::default_meta(Utc::now());

    let (document, stats) = combine::merge_benchmarks(&config.input, default_meta);
    combine::write_combined(&document, &config.output)?;

    println!("\n📈 Combine Summary:");
    println!("   Benchmarks: {}", document.frameworks.len());
    println!("   Files merged: {}", stats.merged);
    if stats.skipped > 0 {
        println!("   Files skipped: {} (see warnings above)", stats.skipped);
    }
    if stats.meta_found {
        println!("   Metadata: taken from meta.json");
    } else {
        println!("   Metadata: default (lastUpdated timestamp)");
    }
    println!(
        "\n✅ Combined data saved to: {}",
        config.output.display()
    );

    Ok(())
}

/// Run the upload workflow: collect, authenticate, write one document.
async fn run_upload(config: &UploadConfig) -> Result<()> {
    println!("☁️  Uploading JSON files from: {}", config.input.display());
    println!("   Collection: {}", config.collection);

    let key = ServiceAccountKey::from_env()?;
    let store = FirestoreStore::new(key)?;

    let name = upload::upload_directory(&store, &config.input, &config.collection).await?;

    println!("\n✅ Successfully uploaded to Firestore: {}", name);
    Ok(())
}
