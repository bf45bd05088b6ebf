//! Player progress storage for the gamification engine
//!
//! Tracks player currencies, levels, unlocked badges and an accrual history
//! in a SQLite database (`~/.zikir/zikir.db` by default).
//!
//! # Usage
//!
//! ```ignore
//! let store = PlayerStore::open(&config.database_path())?;
//! let engine = config.build_engine()?;
//!
//! // Apply a counted batch for a player
//! let outcome = store.award(&engine, "player-1", &AccrualEvent::new(33))?;
//!
//! // Read the profile projection
//! let view = store.gamification_view(&engine, "player-1", 10)?;
//! ```

mod accrual;
mod db;
mod models;
mod queries;

pub use db::{GamificationDb, SCHEMA_VERSION};
pub use models::{AwardError, AwardOutcome, LeaderboardEntry};

use std::path::Path;

use anyhow::Result;

/// Reads and writes player progress.
///
/// Cheap to clone; all clones share one connection, and every accrual runs
/// inside a single transaction while holding it.
#[derive(Clone)]
pub struct PlayerStore {
    db: GamificationDb,
}

impl PlayerStore {
    pub fn new(db: GamificationDb) -> Self {
        Self { db }
    }

    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(GamificationDb::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(GamificationDb::open_in_memory()?))
    }
}
