//! JSON file bet source.
//!
//! The file holds a JSON array of bets and is re-read on every fetch,
//! so edits show up on the next request without a restart.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ensure_unique_ids, BetSource};
use crate::types::Bet;

pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Bet>> {
        let shown = self.path.display();
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read bets from {shown}"))?;
        let bets: Vec<Bet> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse bets from {shown}"))?;
        ensure_unique_ids(self.name(), &bets)?;

        debug!(path = %shown, count = bets.len(), "Bets loaded from file");
        Ok(bets)
    }
}

#[async_trait]
impl BetSource for JsonFileSource {
    async fn fetch_candidate_bets(&self) -> Result<Vec<Bet>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || JsonFileSource { path }.load())
            .await
            .context("Bet file loader task panicked")?
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
