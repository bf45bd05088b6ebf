//! Leaderboard command implementation

use std::path::Path;

use anyhow::Result;

use zikir::server::LeaderboardResponse;

use super::http::ServerClient;

pub async fn leaderboard_command(
    config_override: Option<&Path>,
    room: Option<i64>,
    limit: usize,
) -> Result<()> {
    let client = ServerClient::from_config(config_override)?;
    let path = match room {
        Some(room) => format!("/api/leaderboard?roomId={room}&limit={limit}"),
        None => format!("/api/leaderboard?limit={limit}"),
    };
    let board: LeaderboardResponse = client.get_json(&path, None)?;

    if board.entries.is_empty() {
        println!("No players yet.");
        return Ok(());
    }

    match board.room_id {
        Some(room) => println!("Room {} leaderboard:\n", room),
        None => println!("Leaderboard:\n"),
    }

    for entry in &board.entries {
        println!(
            "  {:>3}. {:<24} {:>8} Amal  level {:<3} {:>8} zikir",
            entry.rank, entry.player_id, entry.amal_score, entry.level, entry.zikir_count
        );
    }

    Ok(())
}
