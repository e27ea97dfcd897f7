//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.benchsync.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Combine settings.
    #[serde(default)]
    pub combine: CombineConfig,

    /// Upload settings.
    #[serde(default)]
    pub upload: UploadConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Settings for the combine subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineConfig {
    /// Root directory to walk for benchmark files.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Output file for the combined document.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

/// Settings for the upload subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory of JSON files to upload.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Remote collection to create the document in.
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            collection: default_collection(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from(".benchmarks")
}

fn default_output() -> PathBuf {
    PathBuf::from("benchmarks.json")
}

fn default_collection() -> String {
    "benchmarks".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".benchsync.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        match &args.command {
            crate::cli::Command::Combine { input, output } => {
                if let Some(input) = input {
                    self.combine.input = input.clone();
                }
                if let Some(output) = output {
                    self.combine.output = output.clone();
                }
            }
            crate::cli::Command::Upload { input, collection } => {
                if let Some(input) = input {
                    self.upload.input = input.clone();
                }
                if let Some(collection) = collection {
                    self.upload.collection = collection.clone();
                }
            }
            crate::cli::Command::InitConfig => {}
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, Command};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.combine.input, PathBuf::from(".benchmarks"));
        assert_eq!(config.combine.output, PathBuf::from("benchmarks.json"));
        assert_eq!(config.upload.collection, "benchmarks");
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[combine]
input = "results"
output = "combined.json"

[upload]
collection = "nightly-benchmarks"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.combine.input, PathBuf::from("results"));
        assert_eq!(config.combine.output, PathBuf::from("combined.json"));
        assert_eq!(config.upload.collection, "nightly-benchmarks");
        // Unspecified fields keep their defaults
        assert_eq!(config.upload.input, PathBuf::from(".benchmarks"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config: Config = toml::from_str(
            r#"
[combine]
input = "from-config"
output = "from-config.json"
"#,
        )
        .unwrap();

        let args = Args {
            command: Command::Combine {
                input: Some(PathBuf::from("from-cli")),
                output: None,
            },
            config: None,
            verbose: false,
            quiet: false,
        };

        config.merge_with_args(&args);
        assert_eq!(config.combine.input, PathBuf::from("from-cli"));
        // Not provided on the CLI, so the config file value survives
        assert_eq!(config.combine.output, PathBuf::from("from-config.json"));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[combine]"));
        assert!(toml_str.contains("[upload]"));

        // Must round-trip
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.combine.output, PathBuf::from("benchmarks.json"));
    }
}
