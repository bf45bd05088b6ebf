//! Badge rules and their unlock conditions
//!
//! Rules are evaluated in declaration order so that the same snapshot always
//! yields the same sequence of new badges.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::{AccrualEvent, PlayerState};

/// Unlock condition, checked against the post-accrual snapshot and the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BadgeCondition {
    /// Lifetime zikir count reached
    TotalCountAtLeast(u64),
    AmalScoreAtLeast(u64),
    BarakahCoinsAtLeast(u64),
    NoorTokensAtLeast(u64),
    LevelAtLeast(u32),
    /// A single event counted at least this many
    SingleEventAtLeast(u64),
    /// The event was counted inside a room
    InRoom,
    /// Badges held, counting ones unlocked earlier in the same event
    BadgeCountAtLeast(u64),
}

impl BadgeCondition {
    pub fn is_met(&self, player: &PlayerState, event: &AccrualEvent) -> bool {
        match *self {
            Self::TotalCountAtLeast(n) => player.total_lifetime_count >= n,
            Self::AmalScoreAtLeast(n) => player.amal_score >= n,
            Self::BarakahCoinsAtLeast(n) => player.barakah_coins >= n,
            Self::NoorTokensAtLeast(n) => player.noor_tokens >= n,
            Self::LevelAtLeast(n) => player.level >= n,
            Self::SingleEventAtLeast(n) => event.zikir_count > 0 && event.zikir_count as u64 >= n,
            Self::InRoom => event.room_id.is_some(),
            Self::BadgeCountAtLeast(n) => player.unlocked_badge_ids.len() as u64 >= n,
        }
    }

    /// A zero threshold would unlock for everyone and is treated as a typo
    fn has_zero_threshold(&self) -> bool {
        match *self {
            Self::TotalCountAtLeast(n)
            | Self::AmalScoreAtLeast(n)
            | Self::BarakahCoinsAtLeast(n)
            | Self::NoorTokensAtLeast(n)
            | Self::SingleEventAtLeast(n)
            | Self::BadgeCountAtLeast(n) => n == 0,
            Self::LevelAtLeast(n) => n == 0,
            Self::InRoom => false,
        }
    }
}

/// Badge definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRule {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Amal Score credited on unlock
    pub points: u64,
    pub condition: BadgeCondition,
}

/// All configured badges, in declaration order
#[derive(Debug, Clone, Default)]
pub struct BadgeRuleSet {
    rules: Vec<BadgeRule>,
}

impl BadgeRuleSet {
    pub fn new(rules: Vec<BadgeRule>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.id.trim().is_empty() {
                return Err(ConfigError::EmptyBadgeId);
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(ConfigError::DuplicateBadgeId(rule.id.clone()));
            }
            if rule.condition.has_zero_threshold() {
                return Err(ConfigError::ZeroThreshold(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// Badges that qualify now and are not unlocked yet
    pub fn evaluate<'a>(&'a self, player: &PlayerState, event: &AccrualEvent) -> Vec<&'a BadgeRule> {
        self.rules
            .iter()
            .filter(|rule| !player.has_badge(&rule.id))
            .filter(|rule| rule.condition.is_met(player, event))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&BadgeRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BadgeRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
