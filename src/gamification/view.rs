//! Read-only projection of a player for the gamification profile endpoint

use serde::{Deserialize, Serialize};

use super::engine::AccrualEngine;
use super::levels::LevelDefinition;
use super::player::PlayerState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextLevelView {
    pub level: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ar: Option<String>,
    pub required_points: u64,
    pub progress_percentage: f64,
}

/// A badge the player holds, with display metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedBadge {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub points: u64,
    /// ms since epoch
    pub unlocked_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationView {
    pub amal_score: u64,
    pub barakah_coins: u64,
    pub noor_tokens: u64,
    pub total_lifetime_count: u64,
    pub current_level: LevelDefinition,
    pub next_level: Option<NextLevelView>,
    pub badges: Vec<UnlockedBadge>,
    /// Number of badges that can be earned
    pub total_badges: usize,
    pub has_special_status: bool,
}

impl GamificationView {
    /// Compose a snapshot with level table output.
    ///
    /// `unlocked` carries (badge id, unlocked_at) in display order. Ids no
    /// longer present in the rule set are still listed, under their id.
    pub fn project(
        player: &PlayerState,
        engine: &AccrualEngine,
        unlocked: &[(String, i64)],
        special_status_level: u32,
    ) -> Self {
        let progress = engine.levels().progress(player.amal_score);

        let next_level = progress.next.map(|next| NextLevelView {
            level: next.level,
            title: next.title,
            title_ar: next.title_ar,
            required_points: next.required_points,
            progress_percentage: progress.progress_percentage,
        });

        let badges = unlocked
            .iter()
            .map(|(id, unlocked_at)| match engine.badges().get(id) {
                Some(rule) => UnlockedBadge {
                    id: rule.id.clone(),
                    name: rule.name.clone(),
                    name_ar: rule.name_ar.clone(),
                    description: rule.description.clone(),
                    icon: rule.icon.clone(),
                    points: rule.points,
                    unlocked_at: *unlocked_at,
                },
                None => UnlockedBadge {
                    id: id.clone(),
                    name: id.clone(),
                    name_ar: None,
                    description: String::new(),
                    icon: None,
                    points: 0,
                    unlocked_at: *unlocked_at,
                },
            })
            .collect();

        Self {
            amal_score: player.amal_score,
            barakah_coins: player.barakah_coins,
            noor_tokens: player.noor_tokens,
            total_lifetime_count: player.total_lifetime_count,
            has_special_status: progress.current.level >= special_status_level,
            current_level: progress.current,
            next_level,
            badges,
            total_badges: engine.badges().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::{
        BadgeCondition, BadgeRule, BadgeRuleSet, LevelTable, MilestoneRuleSet, RewardRates,
    };

    fn engine() -> AccrualEngine {
        let levels = [(1, 0), (2, 200), (3, 400), (4, 800)]
            .into_iter()
            .map(|(level, required_points)| LevelDefinition {
                level,
                title: format!("Level {level}"),
                title_ar: None,
                required_points,
            })
            .collect();
        let badges = vec![BadgeRule {
            id: "room".to_string(),
            name: "Room Companion".to_string(),
            name_ar: None,
            description: "Count inside a room".to_string(),
            icon: Some("🕌".to_string()),
            points: 20,
            condition: BadgeCondition::InRoom,
        }];
        AccrualEngine::new(
            LevelTable::new(levels).unwrap(),
            BadgeRuleSet::new(badges).unwrap(),
            MilestoneRuleSet::default(),
            RewardRates::default(),
        )
    }

    #[test]
    fn test_project_mid_level() {
        let player = PlayerState {
            amal_score: 500,
            level: 3,
            ..Default::default()
        };
        let view = GamificationView::project(&player, &engine(), &[("room".to_string(), 42)], 4);

        assert_eq!(view.current_level.level, 3);
        let next = view.next_level.unwrap();
        assert_eq!(next.level, 4);
        assert!((next.progress_percentage - 25.0).abs() < 0.001);
        assert_eq!(view.badges[0].name, "Room Companion");
        assert_eq!(view.badges[0].unlocked_at, 42);
        assert_eq!(view.total_badges, 1);
        assert!(!view.has_special_status);
    }

    #[test]
    fn test_project_max_level_and_unknown_badge() {
        let player = PlayerState {
            amal_score: 900,
            level: 4,
            ..Default::default()
        };
        let view = GamificationView::project(&player, &engine(), &[("retired".to_string(), 1)], 4);

        assert!(view.next_level.is_none());
        assert!(view.has_special_status);
        assert_eq!(view.badges[0].name, "retired");
        assert_eq!(view.badges[0].points, 0);
    }
}
