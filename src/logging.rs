//! Logging System
//!
//! Structured logging using the `tracing` crate. Logs go to stderr by default so
//! that stdout only carries the merge summary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::MergeError;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (required when output is "file")
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            other => return Err(format!("Invalid log level: {}", other)),
        }
        if self.format != "json" && self.format != "text" {
            return Err(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.format
            ));
        }
        match self.output.as_str() {
            "stderr" | "stdout" => Ok(()),
            "file" if self.file.is_some() => Ok(()),
            "file" => Err("Log output 'file' requires logging.file".to_string()),
            other => Err(format!(
                "Invalid log output: {} (must be 'stderr', 'stdout', or 'file')",
                other
            )),
        }
    }
}

/// Initialize the global tracing subscriber
///
/// `DIRMERGE_LOG` takes precedence over the configured level and module filters.
pub fn init_logging(config: &LoggingConfig) -> Result<(), MergeError> {
    config.validate().map_err(MergeError::ConfigError)?;

    let filter = build_env_filter(config)?;
    let (writer, ansi) = build_writer(config)?;
    let base_subscriber = Registry::default().with(filter);

    let result = if config.format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| MergeError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

fn build_writer(config: &LoggingConfig) -> Result<(BoxMakeWriter, bool), MergeError> {
    match config.output.as_str() {
        "stdout" => Ok((BoxMakeWriter::new(std::io::stdout), config.color)),
        "file" => {
            let path = config
                .file
                .as_ref()
                .ok_or_else(|| MergeError::ConfigError("Log file path not set".to_string()))?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    MergeError::ConfigError(format!("Failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    MergeError::ConfigError(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            Ok((BoxMakeWriter::new(Mutex::new(file)), false))
        }
        _ => Ok((BoxMakeWriter::new(std::io::stderr), config.color)),
    }
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, MergeError> {
    if let Ok(filter) = EnvFilter::try_from_env("DIRMERGE_LOG") {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| MergeError::ConfigError(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}
