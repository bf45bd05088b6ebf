//! Status command implementation

use std::path::Path;

use anyhow::Result;

use zikir::gamification::GamificationView;

use super::http::ServerClient;

/// Show a player's currencies, level progress and badges
pub async fn status_command(config_override: Option<&Path>, player: &str, json: bool) -> Result<()> {
    let client = ServerClient::from_config(config_override)?;
    let view: GamificationView = client.get_json("/api/user/gamification", Some(player))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Player: {}\n", player);
    println!(
        "  Level {} - {}{}",
        view.current_level.level,
        view.current_level.title,
        if view.has_special_status { " *" } else { "" }
    );
    println!("  Amal Score:    {}", view.amal_score);
    println!("  Barakah Coins: {}", view.barakah_coins);
    println!("  Noor Tokens:   {}", view.noor_tokens);
    println!("  Lifetime zikir: {}", view.total_lifetime_count);

    match &view.next_level {
        Some(next) => println!(
            "  Next: level {} - {} at {} ({:.1}%)",
            next.level, next.title, next.required_points, next.progress_percentage
        ),
        None => println!("  Max level reached"),
    }

    println!("\nBadges ({}/{}):", view.badges.len(), view.total_badges);
    for badge in &view.badges {
        println!("  {} - {}", badge.name, badge.description);
    }

    Ok(())
}
