//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, an
//! explicit config file, then `DIRMERGE_*` environment variables. CLI flags
//! are applied on top by the binary.

use crate::error::MergeError;
use crate::fingerprint::DEFAULT_BLOCK_SIZE;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to do with clean or keep entries that are not regular files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NonFilePolicy {
    /// Leave the entry in place and report it
    #[default]
    Skip,
    /// Abort the run
    Fail,
}

impl std::str::FromStr for NonFilePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(NonFilePolicy::Skip),
            "fail" => Ok(NonFilePolicy::Fail),
            other => Err(format!("Invalid non-file policy: {} (must be 'skip' or 'fail')", other)),
        }
    }
}

/// Merge engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Read block size used when fingerprinting
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    #[serde(default)]
    pub on_non_file: NonFilePolicy,

    /// Fail the run when deleted + moved != seen
    #[serde(default)]
    pub strict_consistency: bool,

    /// Plan outcomes without touching the filesystem
    #[serde(default)]
    pub dry_run: bool,

    /// Inserted between stem and collision counter (`report_1.txt`)
    #[serde(default = "default_suffix_separator")]
    pub suffix_separator: String,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

fn default_suffix_separator() -> String {
    "_".to_string()
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            on_non_file: NonFilePolicy::default(),
            strict_consistency: false,
            dry_run: false,
            suffix_separator: default_suffix_separator(),
        }
    }
}

impl MergeOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.block_size == 0 {
            return Err("Block size must be greater than zero".to_string());
        }
        if self.suffix_separator.is_empty() {
            return Err("Suffix separator cannot be empty".to_string());
        }
        if self.suffix_separator.contains(['/', '\\']) {
            return Err(format!(
                "Suffix separator cannot contain a path separator: {:?}",
                self.suffix_separator
            ));
        }
        Ok(())
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    #[serde(default)]
    pub merge: MergeOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MergeConfig {
    pub fn validate(&self) -> Result<(), MergeError> {
        self.merge.validate().map_err(MergeError::ConfigError)?;
        self.logging.validate().map_err(MergeError::ConfigError)
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String, MergeError> {
        toml::to_string_pretty(self).map_err(|e| MergeError::ConfigError(e.to_string()))
    }
}

/// Path to the global config file: `$XDG_CONFIG_HOME/dirmerge/config.toml`
/// or the platform equivalent.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "dirmerge")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, and the environment
    pub fn load() -> Result<MergeConfig, MergeError> {
        Self::load_with(None)
    }

    /// Load with an explicit config file that must exist
    pub fn load_from_file(path: &Path) -> Result<MergeConfig, MergeError> {
        Self::load_with(Some(path))
    }

    fn load_with(explicit: Option<&Path>) -> Result<MergeConfig, MergeError> {
        let mut builder = Config::builder();

        if let Some(global) = global_config_path() {
            builder = add_file(builder, &global, false);
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(MergeError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = add_file(builder, path, true);
        }

        builder = builder.add_source(
            Environment::with_prefix("DIRMERGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: MergeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> ConfigBuilder<DefaultState> {
    debug!(config_path = %path.display(), required, "Adding config file source");
    builder.add_source(File::from(path).required(required))
}
