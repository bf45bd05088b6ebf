//! SQLite database connection and schema management for player progress

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result, anyhow, bail};
use rusqlite::Connection;

/// Schema version written by this build
pub const SCHEMA_VERSION: i32 = 1;

/// Database wrapper shared by the store and the HTTP handlers
#[derive(Clone)]
pub struct GamificationDb {
    conn: Arc<Mutex<Connection>>,
}

impl GamificationDb {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        // WAL lets the CLI read while the server writes
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// Private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Lock the connection. Holding the guard serializes all writers.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database lock poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(SCHEMA_SQL)?;

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        if version > SCHEMA_VERSION {
            bail!(
                "database schema version {} is newer than this build supports ({})",
                version,
                SCHEMA_VERSION
            );
        }
        if version < SCHEMA_VERSION {
            conn.execute(
                "INSERT OR REPLACE INTO schema_version VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
        }

        Ok(())
    }
}

/// SQL schema for the gamification database
const SCHEMA_SQL: &str = r#"
-- Player progress (one row per player)
CREATE TABLE IF NOT EXISTS players (
    id TEXT PRIMARY KEY,
    amal_score INTEGER NOT NULL DEFAULT 0,
    barakah_coins INTEGER NOT NULL DEFAULT 0,
    noor_tokens INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    total_lifetime_count INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_players_amal ON players(amal_score DESC);

-- Unlocked badges (never deleted by accruals)
CREATE TABLE IF NOT EXISTS player_badges (
    player_id TEXT NOT NULL REFERENCES players(id),
    badge_id TEXT NOT NULL,
    unlocked_at INTEGER NOT NULL,
    PRIMARY KEY (player_id, badge_id)
);

-- One row per applied accrual event
CREATE TABLE IF NOT EXISTS accrual_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id TEXT NOT NULL REFERENCES players(id),
    room_id INTEGER,
    zikir_count INTEGER NOT NULL,
    amal_awarded INTEGER NOT NULL,
    barakah_awarded INTEGER NOT NULL,
    noor_awarded INTEGER NOT NULL,
    leveled_up INTEGER NOT NULL DEFAULT 0,
    milestone INTEGER,
    created_at INTEGER NOT NULL,
    day_bucket TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_accrual_player ON accrual_log(player_id);
CREATE INDEX IF NOT EXISTS idx_accrual_room ON accrual_log(room_id);
CREATE INDEX IF NOT EXISTS idx_accrual_day ON accrual_log(day_bucket);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
"#;
