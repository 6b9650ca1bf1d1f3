//! In-memory bet source for integration testing.
//!
//! Returns a controllable pool, counts fetches, and can be told to fail,
//! all with no files or network involved.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use parlay_explorer::data::BetSource;
use parlay_explorer::types::{AmericanOdds, Bet};

/// A swappable pool behind a lock, so tests can change it between requests.
#[derive(Clone)]
pub struct MockSource {
    bets: Arc<Mutex<Vec<Bet>>>,
    fetches: Arc<AtomicUsize>,
    /// If set, every fetch returns this error.
    force_error: Arc<Mutex<Option<String>>>,
}

impl MockSource {
    pub fn with_odds(odds: &[i32]) -> Self {
        Self {
            bets: Arc::new(Mutex::new(Self::bets_from_odds(odds))),
            fetches: Arc::new(AtomicUsize::new(0)),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// One bet per odds value, ids starting at 1, kickoffs an hour apart.
    pub fn bets_from_odds(odds: &[i32]) -> Vec<Bet> {
        let first_kickoff = Utc.with_ymd_and_hms(2023, 9, 10, 17, 0, 0).unwrap();
        odds.iter()
            .enumerate()
            .map(|(i, &o)| Bet {
                id: i as u32 + 1,
                game: format!("Home {i} vs Away {i}"),
                description: format!("Player {i} over 0.5 touchdowns"),
                american_odds: AmericanOdds::new(o).unwrap(),
                commence_time: first_kickoff + Duration::hours(i as i64),
                streak: if i % 2 == 0 { Some(i as u32 + 1) } else { None },
            })
            .collect()
    }

    pub fn replace_bets(&self, bets: Vec<Bet>) {
        *self.bets.lock().unwrap() = bets;
    }

    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    pub fn clear_error(&self) {
        *self.force_error.lock().unwrap() = None;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BetSource for MockSource {
    async fn fetch_candidate_bets(&self) -> Result<Vec<Bet>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.force_error.lock().unwrap().clone() {
            return Err(anyhow!(msg));
        }
        Ok(self.bets.lock().unwrap().clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
