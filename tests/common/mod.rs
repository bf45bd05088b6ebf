//! Shared helpers for the integration tests
#![allow(dead_code)]

use tempfile::TempDir;

use zikir::config::Config;
use zikir::gamification::{
    AccrualEngine, BadgeRuleSet, LevelDefinition, LevelTable, MilestoneRule, MilestoneRuleSet,
    RewardRates,
};
use zikir::store::PlayerStore;

fn level(level: u32, required_points: u64) -> LevelDefinition {
    LevelDefinition {
        level,
        title: format!("Level {level}"),
        title_ar: None,
        required_points,
    }
}

/// Four levels at 0/200/400/800, one milestone at 100, no badges, 10 amal per count
pub fn scenario_engine() -> AccrualEngine {
    AccrualEngine::new(
        LevelTable::new(vec![level(1, 0), level(2, 200), level(3, 400), level(4, 800)])
            .expect("valid levels"),
        BadgeRuleSet::default(),
        MilestoneRuleSet::new(vec![MilestoneRule {
            trigger_count: 100,
            title: "One Hundred".to_string(),
            title_ar: None,
            description: "100 lifetime counts".to_string(),
        }])
        .expect("valid milestones"),
        RewardRates::default(),
    )
}

/// Engine built from the built-in reward tables
pub fn default_engine() -> AccrualEngine {
    Config::default()
        .build_engine()
        .expect("default config must be valid")
}

/// A file-backed store in a fresh temp directory
pub fn temp_store() -> (TempDir, PlayerStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = PlayerStore::open(&dir.path().join("zikir.db")).expect("Failed to open store");
    (dir, store)
}
