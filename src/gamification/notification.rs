//! Notification Selector - picks the one celebration shown for an accrual
//!
//! At most one achievement is surfaced per event. Whatever loses the
//! priority contest is dropped, not queued.

use serde::{Deserialize, Serialize};

use super::player::{AccrualResult, CurrencyDelta};

/// Kind of achievement handed to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    LevelUp,
    Badge,
    Milestone,
    /// Plain points toast
    Points,
}

impl AchievementKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LevelUp => "Level Up",
            Self::Badge => "Badge",
            Self::Milestone => "Milestone",
            Self::Points => "Points",
        }
    }
}

/// Plain data object rendered by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ar: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<CurrencyDelta>,
}

/// Explicit priority list, highest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSelector {
    priority: Vec<AchievementKind>,
}

impl Default for NotificationSelector {
    fn default() -> Self {
        Self {
            priority: vec![
                AchievementKind::LevelUp,
                AchievementKind::Badge,
                AchievementKind::Milestone,
                AchievementKind::Points,
            ],
        }
    }
}

impl NotificationSelector {
    /// Custom ordering. Kinds left out of the list are never shown.
    pub fn with_priority(priority: Vec<AchievementKind>) -> Self {
        Self { priority }
    }

    pub fn priority(&self) -> &[AchievementKind] {
        &self.priority
    }

    /// First kind in priority order that the result qualifies for
    pub fn select(&self, result: &AccrualResult) -> Option<Achievement> {
        self.priority
            .iter()
            .find_map(|kind| Self::candidate(*kind, result))
    }

    fn candidate(kind: AchievementKind, result: &AccrualResult) -> Option<Achievement> {
        match kind {
            AchievementKind::LevelUp => {
                if !result.leveled_up {
                    return None;
                }
                let level = result.new_level.as_ref()?;
                Some(Achievement {
                    kind,
                    title: level.title.clone(),
                    title_ar: level.title_ar.clone(),
                    description: format!("You reached level {}", level.level),
                    reward: None,
                })
            }
            AchievementKind::Badge => {
                let badge = result.new_badges.first()?;
                Some(Achievement {
                    kind,
                    title: badge.name.clone(),
                    title_ar: badge.name_ar.clone(),
                    description: badge.description.clone(),
                    reward: (badge.points > 0).then_some(CurrencyDelta {
                        amal_score: badge.points,
                        ..Default::default()
                    }),
                })
            }
            AchievementKind::Milestone => {
                let milestone = result.milestone.as_ref()?;
                Some(Achievement {
                    kind,
                    title: milestone.title.clone(),
                    title_ar: milestone.title_ar.clone(),
                    description: milestone.description.clone(),
                    reward: None,
                })
            }
            AchievementKind::Points => {
                let points = result.points_awarded;
                if points.is_empty() {
                    return None;
                }
                Some(Achievement {
                    kind,
                    title: format!("+{} Amal", points.amal_score),
                    title_ar: None,
                    description: format!(
                        "+{} Barakah Coins, +{} Noor Tokens",
                        points.barakah_coins, points.noor_tokens
                    ),
                    reward: Some(points),
                })
            }
        }
    }
}
