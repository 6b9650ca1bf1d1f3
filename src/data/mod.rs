//! Bet sources.
//!
//! Defines the `BetSource` trait and the two built-in pools: the static
//! week-one NFL slate and a JSON file loaded on every fetch.

pub mod file;
pub mod static_pool;

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

use crate::config::{SourceConfig, SourceKind};
use crate::types::{Bet, ExplorerError};

pub use file::JsonFileSource;
pub use static_pool::StaticBetSource;

/// Abstraction over wherever candidate bets come from.
///
/// The odds engine never calls this itself; callers fetch a fresh pool
/// and hand it to the pure functions in `parlay`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BetSource: Send + Sync {
    /// Current candidate pool, in source order.
    async fn fetch_candidate_bets(&self) -> Result<Vec<Bet>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

/// Build the source selected in config.
pub fn from_config(cfg: &SourceConfig) -> Result<Box<dyn BetSource>> {
    match cfg.kind {
        SourceKind::Static => Ok(Box::new(StaticBetSource::new())),
        SourceKind::File => {
            let path = cfg.path.as_deref().ok_or_else(|| {
                ExplorerError::Config("source.path is required when source.kind = \"file\"".into())
            })?;
            Ok(Box::new(JsonFileSource::new(path)))
        }
    }
}

/// Reject pools where two bets share an id (parlay legs must be distinct).
pub fn ensure_unique_ids(source_name: &str, bets: &[Bet]) -> Result<(), ExplorerError> {
    let mut seen = HashSet::with_capacity(bets.len());
    for bet in bets {
        if !seen.insert(bet.id) {
            return Err(ExplorerError::DataSource {
                source_name: source_name.to_string(),
                message: format!("duplicate bet id {}", bet.id),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_static() {
        let source = from_config(&SourceConfig { kind: SourceKind::Static, path: None }).unwrap();
        assert_eq!(source.name(), "static");
    }

    #[test]
    fn test_from_config_file_requires_path() {
        let result = from_config(&SourceConfig { kind: SourceKind::File, path: None });
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config_file() {
        let source = from_config(&SourceConfig {
            kind: SourceKind::File,
            path: Some("data/bets.json".into()),
        })
        .unwrap();
        assert_eq!(source.name(), "file");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut bets = static_pool::nfl_week_one();
        bets[1].id = bets[0].id;
        let err = ensure_unique_ids("test", &bets).unwrap_err();
        assert!(err.to_string().contains("duplicate bet id 1"));
        assert!(ensure_unique_ids("test", &static_pool::nfl_week_one()).is_ok());
    }

    #[test]
    fn test_mock_source_is_object_safe() {
        let mut mock = MockBetSource::new();
        mock.expect_name().return_const("mock");
        mock.expect_fetch_candidate_bets()
            .returning(|| Ok(static_pool::nfl_week_one()));

        let source: Box<dyn BetSource> = Box::new(mock);
        let bets = tokio_test::block_on(source.fetch_candidate_bets()).unwrap();
        assert_eq!(bets.len(), 5);
        assert_eq!(source.name(), "mock");
    }
}
