//! Read-only queries: profile projection and leaderboards

use anyhow::{Result, anyhow};

use super::PlayerStore;
use super::accrual::{from_sql, read_player};
use super::models::LeaderboardEntry;
use crate::gamification::{AccrualEngine, GamificationView};

impl PlayerStore {
    /// Profile projection for `GET /api/user/gamification`
    pub fn gamification_view(
        &self,
        engine: &AccrualEngine,
        player_id: &str,
        special_status_level: u32,
    ) -> Result<GamificationView> {
        let conn = self.db.conn()?;
        let player = read_player(&conn, player_id)?.unwrap_or_default();

        let mut stmt = conn.prepare(
            r#"SELECT badge_id, unlocked_at FROM player_badges
               WHERE player_id = ?1
               ORDER BY unlocked_at ASC, rowid ASC"#,
        )?;
        let unlocked: Vec<(String, i64)> = stmt
            .query_map([player_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<_>>()?;

        Ok(GamificationView::project(
            &player,
            engine,
            &unlocked,
            special_status_level,
        ))
    }

    /// Players by Amal Score, ties broken by lifetime count then id
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT id, amal_score, level, total_lifetime_count FROM players
               ORDER BY amal_score DESC, total_lifetime_count DESC, id ASC
               LIMIT ?1"#,
        )?;
        let rows: Vec<(String, i64, i64, i64)> = stmt
            .query_map([sql_limit(limit)], |r| {
                Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
            })?
            .collect::<rusqlite::Result<_>>()?;

        rank_rows(rows)
    }

    /// Players by zikir counted inside one room
    pub fn room_leaderboard(&self, room_id: i64, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT l.player_id, p.amal_score, p.level, SUM(l.zikir_count) AS room_total
               FROM accrual_log l
               JOIN players p ON p.id = l.player_id
               WHERE l.room_id = ?1
               GROUP BY l.player_id
               ORDER BY room_total DESC, l.player_id ASC
               LIMIT ?2"#,
        )?;
        let rows: Vec<(String, i64, i64, i64)> = stmt
            .query_map(rusqlite::params![room_id, sql_limit(limit)], |r| {
                Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
            })?
            .collect::<rusqlite::Result<_>>()?;

        rank_rows(rows)
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn rank_rows(rows: Vec<(String, i64, i64, i64)>) -> Result<Vec<LeaderboardEntry>> {
    rows.into_iter()
        .enumerate()
        .map(|(i, (player_id, amal, level, count))| -> Result<LeaderboardEntry> {
            Ok(LeaderboardEntry {
                rank: i + 1,
                amal_score: from_sql(amal, "amal_score", &player_id)?,
                level: u32::try_from(level)
                    .map_err(|_| anyhow!("player {player_id} has invalid level {level}"))?,
                zikir_count: from_sql(count, "zikir_count", &player_id)?,
                player_id,
            })
        })
        .collect()
}
