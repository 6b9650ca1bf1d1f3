//! Built-in candidate pool: five NFL week-one player props.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use super::{ensure_unique_ids, BetSource};
use crate::types::{AmericanOdds, Bet};

struct PropSeed {
    id: u32,
    game: &'static str,
    description: &'static str,
    odds: i32,
    /// (year, month, day, hour, minute) UTC
    kickoff: (i32, u32, u32, u32, u32),
    streak: Option<u32>,
}

const WEEK_ONE: &[PropSeed] = &[
    PropSeed { id: 1, game: "Packers vs Bears", description: "Aaron Rodgers over 2.5 TD passes", odds: 140, kickoff: (2023, 9, 10, 20, 0), streak: Some(3) },
    PropSeed { id: 2, game: "Chiefs vs Raiders", description: "Patrick Mahomes over 300.5 passing yards", odds: -115, kickoff: (2023, 9, 10, 20, 30), streak: None },
    PropSeed { id: 3, game: "Cowboys vs Eagles", description: "Ezekiel Elliott over 75.5 rushing yards", odds: 105, kickoff: (2023, 9, 10, 21, 0), streak: Some(2) },
    PropSeed { id: 4, game: "Rams vs 49ers", description: "Cooper Kupp over 7.5 receptions", odds: -130, kickoff: (2023, 9, 11, 0, 20), streak: None },
    PropSeed { id: 5, game: "Bills vs Patriots", description: "Josh Allen over 40.5 rushing yards", odds: 100, kickoff: (2023, 9, 11, 17, 0), streak: Some(4) },
];

fn kickoff((y, mo, d, h, mi): (i32, u32, u32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// The week-one slate as `Bet` values. Odds in the table are all nonzero.
pub fn nfl_week_one() -> Vec<Bet> {
    WEEK_ONE
        .iter()
        .filter_map(|seed| {
            let american_odds = AmericanOdds::new(seed.odds).ok()?;
            Some(Bet {
                id: seed.id,
                game: seed.game.to_string(),
                description: seed.description.to_string(),
                american_odds,
                commence_time: kickoff(seed.kickoff),
                streak: seed.streak,
            })
        })
        .collect()
}

/// An in-memory pool, fixed at construction.
pub struct StaticBetSource {
    bets: Vec<Bet>,
}

impl StaticBetSource {
    /// The built-in NFL week-one slate.
    pub fn new() -> Self {
        Self { bets: nfl_week_one() }
    }

    /// A caller-supplied pool. Bet ids must be unique.
    pub fn with_bets(bets: Vec<Bet>) -> Result<Self> {
        ensure_unique_ids("static", &bets)?;
        Ok(Self { bets })
    }
}

impl Default for StaticBetSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BetSource for StaticBetSource {
    async fn fetch_candidate_bets(&self) -> Result<Vec<Bet>> {
        Ok(self.bets.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
