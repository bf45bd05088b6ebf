//! Data models returned by the player store

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gamification::{AccrualError, AccrualResult, PlayerState};

/// A committed accrual
#[derive(Debug, Clone)]
pub struct AwardOutcome {
    /// Snapshot after the accrual, as persisted
    pub player: PlayerState,
    pub result: AccrualResult,
}

/// Why an accrual was not committed
#[derive(Debug, Error)]
pub enum AwardError {
    /// The engine refused the event; nothing was written
    #[error("accrual rejected: {0}")]
    Rejected(#[from] AccrualError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for AwardError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.into())
    }
}

/// One row of a leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based
    pub rank: usize,
    pub player_id: String,
    pub amal_score: u64,
    pub level: u32,
    /// Lifetime count, or the count inside the room for room boards
    pub zikir_count: u64,
}
