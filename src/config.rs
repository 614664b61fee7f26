//! Configuration Module
//!
//! This module defines the configuration for the bulk tool.
//! Configuration is loaded from an optional TOML file and then overridden
//! by command line arguments.

use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Every section may be omitted from the file.
///
/// # Example TOML
/// ```toml
/// [bulk]
/// capacity = 3
///
/// [report]
/// directory = "."
/// extension = "log"
///
/// [input]
/// pacing_ms = 0
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bulk: BulkConfig,
    pub report: ReportConfig,
    pub input: InputConfig,
}

/// Static bulk configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    /// Commands per static bulk; must be set here or on the command line
    pub capacity: Option<usize>,
}

/// Report output configuration
///
/// # Fields
/// - `directory`: where report files are created (default: working directory)
/// - `extension`: report file extension without the dot (default: `log`)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub directory: PathBuf,
    pub extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            extension: "log".to_string(),
        }
    }
}

/// Input reading configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Delay after each line read, in milliseconds
    pub pacing_ms: u64,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The static bulk capacity, checked to be present and positive
    pub fn capacity(&self) -> anyhow::Result<NonZeroUsize> {
        match self.bulk.capacity {
            None => bail!("bulk capacity is not set"),
            Some(n) => NonZeroUsize::new(n).context("bulk capacity must be greater than zero"),
        }
    }
}
