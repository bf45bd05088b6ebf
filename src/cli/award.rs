//! Award command - sends one counted batch to a running server

use std::path::Path;

use anyhow::Result;

use zikir::gamification::AccrualEvent;
use zikir::server::AwardPointsResponse;

use super::http::ServerClient;

pub async fn award_command(
    config_override: Option<&Path>,
    player: &str,
    count: i64,
    room: Option<i64>,
) -> Result<()> {
    let client = ServerClient::from_config(config_override)?;
    let event = AccrualEvent {
        zikir_count: count,
        room_id: room,
    };
    let response: AwardPointsResponse =
        client.post_json("/api/user/award-points", Some(player), &event)?;

    let points = response.result.points_awarded;
    println!(
        "+{} Amal  +{} Barakah  +{} Noor",
        points.amal_score, points.barakah_coins, points.noor_tokens
    );

    if let Some(level) = &response.result.new_level {
        let marker = if response.result.leveled_up { " (level up!)" } else { "" };
        println!("Level {} - {}{}", level.level, level.title, marker);
    }

    for badge in &response.result.new_badges {
        println!("Badge unlocked: {} (+{} Amal)", badge.name, badge.points);
    }

    if let Some(milestone) = &response.result.milestone {
        println!("Milestone reached: {}", milestone.title);
    }

    if let Some(achievement) = &response.notification {
        println!("\n[{}] {}", achievement.kind.label(), achievement.title);
        if !achievement.description.is_empty() {
            println!("  {}", achievement.description);
        }
    }

    Ok(())
}
