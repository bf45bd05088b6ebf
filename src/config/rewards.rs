//! Reward tables as they appear in config.toml
//!
//! These mirror the gamification types with snake_case keys and are
//! converted (and validated) when the engine is built.

use serde::{Deserialize, Serialize};

use crate::gamification::{BadgeCondition, BadgeRule, LevelDefinition, MilestoneRule};

/// Currency conversion rates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardSettings {
    /// Amal Score per counted zikir
    #[serde(default = "default_amal_per_count")]
    pub amal_per_count: u64,

    /// Barakah Coins per counted zikir
    #[serde(default = "default_barakah_per_count")]
    pub barakah_per_count: u64,

    /// One Noor Token per completed round of this many counts (0 disables)
    #[serde(default = "default_counts_per_noor")]
    pub counts_per_noor: u64,

    /// Players at or above this level get special status
    #[serde(default = "default_special_status_level")]
    pub special_status_level: u32,
}

fn default_amal_per_count() -> u64 {
    10
}

fn default_barakah_per_count() -> u64 {
    1
}

fn default_counts_per_noor() -> u64 {
    33
}

fn default_special_status_level() -> u32 {
    10
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            amal_per_count: default_amal_per_count(),
            barakah_per_count: default_barakah_per_count(),
            counts_per_noor: default_counts_per_noor(),
            special_status_level: default_special_status_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelToml {
    pub level: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ar: Option<String>,
    pub required_points: u64,
}

impl From<LevelToml> for LevelDefinition {
    fn from(toml: LevelToml) -> Self {
        Self {
            level: toml.level,
            title: toml.title,
            title_ar: toml.title_ar,
            required_points: toml.required_points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeToml {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub points: u64,
    pub condition: BadgeCondition,
}

impl From<BadgeToml> for BadgeRule {
    fn from(toml: BadgeToml) -> Self {
        Self {
            id: toml.id,
            name: toml.name,
            name_ar: toml.name_ar,
            description: toml.description,
            icon: toml.icon,
            points: toml.points,
            condition: toml.condition,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneToml {
    pub trigger_count: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ar: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl From<MilestoneToml> for MilestoneRule {
    fn from(toml: MilestoneToml) -> Self {
        Self {
            trigger_count: toml.trigger_count,
            title: toml.title,
            title_ar: toml.title_ar,
            description: toml.description,
        }
    }
}

/// Built-in level table
pub(super) fn default_levels() -> Vec<LevelToml> {
    [
        (1, "Seeker", "طالب", 0),
        (2, "Rememberer", "ذاكر", 200),
        (3, "Devoted", "عابد", 400),
        (4, "Steadfast", "ثابت", 800),
        (5, "Grateful", "شاكر", 1_500),
        (6, "Patient", "صابر", 3_000),
        (7, "Humble", "خاشع", 5_000),
        (8, "Repentant", "تائب", 8_000),
        (9, "Sincere", "مخلص", 12_000),
        (10, "Righteous", "صالح", 20_000),
        (11, "Beloved", "حبيب", 35_000),
        (12, "Illuminated", "منير", 50_000),
    ]
    .into_iter()
    .map(|(level, title, title_ar, required_points)| LevelToml {
        level,
        title: title.to_string(),
        title_ar: Some(title_ar.to_string()),
        required_points,
    })
    .collect()
}

fn badge(
    id: &str,
    name: &str,
    name_ar: &str,
    description: &str,
    icon: &str,
    points: u64,
    condition: BadgeCondition,
) -> BadgeToml {
    BadgeToml {
        id: id.to_string(),
        name: name.to_string(),
        name_ar: Some(name_ar.to_string()),
        description: description.to_string(),
        icon: Some(icon.to_string()),
        points,
        condition,
    }
}

/// Built-in badge rules
pub(super) fn default_badges() -> Vec<BadgeToml> {
    vec![
        badge(
            "first_zikir",
            "First Remembrance",
            "الذكر الأول",
            "Count your first zikir",
            "🌱",
            10,
            BadgeCondition::TotalCountAtLeast(1),
        ),
        badge(
            "full_tasbih",
            "Full Tasbih",
            "تسبيحة كاملة",
            "Count 33 in a single session",
            "📿",
            15,
            BadgeCondition::SingleEventAtLeast(33),
        ),
        badge(
            "room_companion",
            "Room Companion",
            "رفيق المجلس",
            "Count zikir inside a room",
            "🕌",
            20,
            BadgeCondition::InRoom,
        ),
        badge(
            "hundredfold",
            "Hundredfold",
            "مئة ذكر",
            "Reach 100 lifetime counts",
            "💯",
            25,
            BadgeCondition::TotalCountAtLeast(100),
        ),
        badge(
            "grand_session",
            "Grand Session",
            "مجلس عظيم",
            "Count 100 in a single session",
            "✨",
            50,
            BadgeCondition::SingleEventAtLeast(100),
        ),
        badge(
            "thousand_praises",
            "Thousand Praises",
            "ألف تسبيحة",
            "Reach 1,000 lifetime counts",
            "🏅",
            100,
            BadgeCondition::TotalCountAtLeast(1_000),
        ),
        badge(
            "noor_collector",
            "Noor Collector",
            "جامع النور",
            "Hold 10 Noor Tokens",
            "🌙",
            30,
            BadgeCondition::NoorTokensAtLeast(10),
        ),
        badge(
            "rising_star",
            "Rising Star",
            "نجم صاعد",
            "Reach level 5",
            "⭐",
            50,
            BadgeCondition::LevelAtLeast(5),
        ),
        badge(
            "badge_hunter",
            "Badge Hunter",
            "صائد الأوسمة",
            "Unlock 5 other badges",
            "🎖️",
            75,
            BadgeCondition::BadgeCountAtLeast(5),
        ),
        badge(
            "ocean_of_dhikr",
            "Ocean of Dhikr",
            "بحر الذكر",
            "Reach 10,000 lifetime counts",
            "🌊",
            500,
            BadgeCondition::TotalCountAtLeast(10_000),
        ),
    ]
}

/// Built-in milestones
pub(super) fn default_milestones() -> Vec<MilestoneToml> {
    [
        (33, "First Tasbih", "التسبيحة الأولى", "You completed your first 33"),
        (99, "Ninety-Nine Names", "الأسماء الحسنى", "99 counts, one for each Name"),
        (100, "One Hundred", "المئة", "100 lifetime counts"),
        (333, "Three Hundred Thirty-Three", "٣٣٣", "333 lifetime counts"),
        (1_000, "One Thousand", "الألف", "1,000 lifetime counts"),
        (3_333, "Steady Heart", "قلب ثابت", "3,333 lifetime counts"),
        (10_000, "Ten Thousand", "عشرة آلاف", "10,000 lifetime counts"),
        (33_333, "Devoted Tongue", "لسان ذاكر", "33,333 lifetime counts"),
        (100_000, "One Hundred Thousand", "مئة ألف", "100,000 lifetime counts"),
    ]
    .into_iter()
    .map(|(trigger_count, title, title_ar, description)| MilestoneToml {
        trigger_count,
        title: title.to_string(),
        title_ar: Some(title_ar.to_string()),
        description: description.to_string(),
    })
    .collect()
}
