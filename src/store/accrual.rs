//! Accrual writes - applies engine results to stored player progress

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info};

use super::PlayerStore;
use super::models::{AwardError, AwardOutcome};
use crate::gamification::{AccrualEngine, AccrualEvent, PlayerState};

impl PlayerStore {
    /// Load a player snapshot. Unknown players start from the default state.
    pub fn load_player(&self, player_id: &str) -> Result<PlayerState> {
        let conn = self.db.conn()?;
        Ok(read_player(&conn, player_id)?.unwrap_or_default())
    }

    /// Apply one event for a player and persist the outcome.
    ///
    /// Read, apply and write happen in one IMMEDIATE transaction while the
    /// connection lock is held, so concurrent accruals for the same player
    /// are serialized. A rejected event or a failed write leaves the stored
    /// state untouched.
    pub fn award(
        &self,
        engine: &AccrualEngine,
        player_id: &str,
        event: &AccrualEvent,
    ) -> Result<AwardOutcome, AwardError> {
        let mut conn = self.db.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = read_player(&tx, player_id)?.unwrap_or_default();
        let (next, result) = engine.apply(&current, event)?;

        let now = Utc::now();
        let now_ms = now.timestamp_millis();

        tx.execute(
            r#"INSERT INTO players
               (id, amal_score, barakah_coins, noor_tokens, level, total_lifetime_count, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
               ON CONFLICT(id) DO UPDATE SET
                   amal_score = ?2, barakah_coins = ?3, noor_tokens = ?4, level = ?5,
                   total_lifetime_count = ?6, updated_at = ?7"#,
            rusqlite::params![
                player_id,
                to_sql(next.amal_score, "amal_score")?,
                to_sql(next.barakah_coins, "barakah_coins")?,
                to_sql(next.noor_tokens, "noor_tokens")?,
                next.level,
                to_sql(next.total_lifetime_count, "total_lifetime_count")?,
                now_ms,
            ],
        )?;

        for badge in &result.new_badges {
            tx.execute(
                "INSERT OR IGNORE INTO player_badges (player_id, badge_id, unlocked_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![player_id, badge.id, now_ms],
            )?;
        }

        let awarded = result.points_awarded;
        tx.execute(
            r#"INSERT INTO accrual_log
               (player_id, room_id, zikir_count, amal_awarded, barakah_awarded, noor_awarded,
                leveled_up, milestone, created_at, day_bucket)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            rusqlite::params![
                player_id,
                event.room_id,
                event.zikir_count,
                to_sql(awarded.amal_score, "amal_awarded")?,
                to_sql(awarded.barakah_coins, "barakah_awarded")?,
                to_sql(awarded.noor_tokens, "noor_awarded")?,
                result.leveled_up as i32,
                result
                    .milestone
                    .as_ref()
                    .map(|m| to_sql(m.trigger_count, "milestone"))
                    .transpose()?,
                now_ms,
                now.format("%Y-%m-%d").to_string(),
            ],
        )?;

        tx.commit().context("Failed to commit accrual")?;

        debug!(
            "[zikir:store] {} +{} counts -> total={}, amal={}",
            player_id, event.zikir_count, next.total_lifetime_count, next.amal_score
        );
        if result.leveled_up {
            info!("[zikir:store] {} reached level {}", player_id, next.level);
        }

        Ok(AwardOutcome {
            player: next,
            result,
        })
    }
}

/// Read a stored snapshot, validating every column at the boundary
pub(super) fn read_player(conn: &Connection, player_id: &str) -> Result<Option<PlayerState>> {
    let row = conn
        .query_row(
            r#"SELECT amal_score, barakah_coins, noor_tokens, level, total_lifetime_count
               FROM players WHERE id = ?1"#,
            [player_id],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, i64>(2)?,
                    r.get::<_, i64>(3)?,
                    r.get::<_, i64>(4)?,
                ))
            },
        )
        .optional()?;

    let Some((amal, barakah, noor, level, total)) = row else {
        return Ok(None);
    };

    let mut stmt = conn.prepare("SELECT badge_id FROM player_badges WHERE player_id = ?1")?;
    let unlocked_badge_ids = stmt
        .query_map([player_id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<_>>()?;

    Ok(Some(PlayerState {
        amal_score: from_sql(amal, "amal_score", player_id)?,
        barakah_coins: from_sql(barakah, "barakah_coins", player_id)?,
        noor_tokens: from_sql(noor, "noor_tokens", player_id)?,
        level: u32::try_from(level)
            .ok()
            .filter(|l| *l >= 1)
            .ok_or_else(|| anyhow!("player {player_id} has invalid level {level}"))?,
        unlocked_badge_ids,
        total_lifetime_count: from_sql(total, "total_lifetime_count", player_id)?,
    }))
}

fn to_sql(value: u64, column: &str) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("{column} value {value} does not fit in the database"))
}

pub(super) fn from_sql(value: i64, column: &str, player_id: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("player {player_id} has negative {column}: {value}"))
}
