//! Configuration loading and management

mod io;
mod rewards;
mod settings;

pub use rewards::{BadgeToml, LevelToml, MilestoneToml, RewardSettings};
pub use settings::{ServerSettings, Settings};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::gamification::{
    AccrualEngine, BadgeRuleSet, ConfigError, LevelTable, MilestoneRuleSet, RewardRates,
};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Currency conversion rates
    #[serde(default)]
    pub rewards: RewardSettings,

    /// Level table (sorted by level)
    #[serde(default = "rewards::default_levels")]
    pub levels: Vec<LevelToml>,

    /// Badge rules, evaluated in this order
    #[serde(default = "rewards::default_badges")]
    pub badges: Vec<BadgeToml>,

    /// Lifetime count milestones
    #[serde(default = "rewards::default_milestones")]
    pub milestones: Vec<MilestoneToml>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            rewards: RewardSettings::default(),
            levels: rewards::default_levels(),
            badges: rewards::default_badges(),
            milestones: rewards::default_milestones(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from an explicit path if given, otherwise the global config
    pub fn load_from(config_override: Option<&Path>) -> Result<Self> {
        match config_override {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Validate the reward tables and build the engine.
    ///
    /// Any error here is a configuration error and must stop startup.
    pub fn build_engine(&self) -> Result<AccrualEngine, ConfigError> {
        let levels = LevelTable::new(self.levels.iter().cloned().map(Into::into).collect())?;
        let badges = BadgeRuleSet::new(self.badges.iter().cloned().map(Into::into).collect())?;
        let milestones =
            MilestoneRuleSet::new(self.milestones.iter().cloned().map(Into::into).collect())?;

        Ok(AccrualEngine::new(
            levels,
            badges,
            milestones,
            RewardRates {
                amal_per_count: self.rewards.amal_per_count,
                barakah_per_count: self.rewards.barakah_per_count,
                counts_per_noor: self.rewards.counts_per_noor,
            },
        ))
    }

    /// SQLite database location (defaults to ~/.zikir/zikir.db)
    pub fn database_path(&self) -> PathBuf {
        let configured = self.settings.server.database_path.trim();
        if configured.is_empty() {
            Self::global_config_dir().join("zikir.db")
        } else {
            PathBuf::from(configured)
        }
    }

    /// Shared secret for the HTTP API, if one is configured
    pub fn http_token(&self) -> Option<String> {
        Some(self.settings.server.http_token.clone()).filter(|t| !t.trim().is_empty())
    }
}
