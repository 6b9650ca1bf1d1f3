//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the path in `EXPLORER_CONFIG`) and deserializes
//! into strongly-typed structs. Defaults mirror the explorer page: three
//! legs, multiple-game parlay, the built-in NFL slate.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::types::{ExplorerError, ParlayMode};

/// Config file used when `EXPLORER_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExplorerConfig {
    /// Legs per parlay. The page offers 3, 4 or 5; anything >= 1 works.
    pub leg_count: usize,
    #[serde(default)]
    pub parlay_mode: ParlayMode,
    /// Raw stake text, parsed the same way as user input.
    #[serde(default)]
    pub default_stake: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            leg_count: 3,
            parlay_mode: ParlayMode::MultipleGame,
            default_stake: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Static,
    File,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { enabled: true, port: 8080 }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config file: {path}"))
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// The config path to use: `EXPLORER_CONFIG` if set, else `config.toml`.
    pub fn resolve_path() -> String {
        std::env::var("EXPLORER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    pub fn validate(&self) -> Result<(), ExplorerError> {
        if self.explorer.leg_count == 0 {
            return Err(ExplorerError::Config("explorer.leg_count must be at least 1".into()));
        }
        if self.source.kind == SourceKind::File && self.source.path.is_none() {
            return Err(ExplorerError::Config(
                "source.path is required when source.kind = \"file\"".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
