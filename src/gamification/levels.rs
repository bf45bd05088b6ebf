//! Amal Score level table
//!
//! Levels are loaded once from configuration and never change afterwards.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Level definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    pub level: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ar: Option<String>,
    pub required_points: u64,
}

/// Where a score sits between its level and the next one
#[derive(Debug, Clone, PartialEq)]
pub struct LevelProgress {
    pub current: LevelDefinition,
    /// None at max level
    pub next: Option<LevelDefinition>,
    /// 0.0 - 100.0
    pub progress_percentage: f64,
}

/// Ordered, validated list of levels (never empty)
#[derive(Debug, Clone)]
pub struct LevelTable {
    levels: Vec<LevelDefinition>,
}

impl LevelTable {
    /// Build a table, rejecting empty or non-monotonic definitions
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, ConfigError> {
        let Some(first) = levels.first() else {
            return Err(ConfigError::EmptyLevelTable);
        };
        if first.level == 0 {
            return Err(ConfigError::InvalidLevelNumber(0));
        }

        for pair in levels.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.level <= prev.level {
                return Err(ConfigError::LevelsNotIncreasing {
                    previous: prev.level,
                    level: next.level,
                });
            }
            if next.required_points <= prev.required_points {
                return Err(ConfigError::ThresholdsNotIncreasing {
                    level: next.level,
                    required: next.required_points,
                    previous: prev.required_points,
                });
            }
        }

        Ok(Self { levels })
    }

    /// Highest level whose threshold is reached; the first level if none is
    pub fn level_for_score(&self, amal_score: u64) -> &LevelDefinition {
        self.levels
            .iter()
            .rev()
            .find(|l| amal_score >= l.required_points)
            .unwrap_or(&self.levels[0])
    }

    /// Level following `current_level` (None if max level)
    pub fn next_level(&self, current_level: u32) -> Option<&LevelDefinition> {
        self.levels.iter().find(|l| l.level > current_level)
    }

    pub fn get(&self, level: u32) -> Option<&LevelDefinition> {
        self.levels.iter().find(|l| l.level == level)
    }

    pub fn first(&self) -> &LevelDefinition {
        &self.levels[0]
    }

    pub fn max_level(&self) -> u32 {
        self.levels.last().map(|l| l.level).unwrap_or(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Resolve the level for a score and how far it is towards the next one
    pub fn progress(&self, amal_score: u64) -> LevelProgress {
        let current = self.level_for_score(amal_score);
        let next = self.next_level(current.level);

        let progress_percentage = match next {
            Some(next) => {
                let span = next.required_points - current.required_points;
                let earned = amal_score.saturating_sub(current.required_points);
                (earned as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
            }
            None => 100.0,
        };

        LevelProgress {
            current: current.clone(),
            next: next.cloned(),
            progress_percentage,
        }
    }

    /// Shortcut for `progress(score).progress_percentage`
    pub fn progress_percentage(&self, amal_score: u64) -> f64 {
        self.progress(amal_score).progress_percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: u32, required_points: u64) -> LevelDefinition {
        LevelDefinition {
            level,
            title: format!("Level {level}"),
            title_ar: None,
            required_points,
        }
    }

    fn table() -> LevelTable {
        LevelTable::new(vec![level(1, 0), level(2, 200), level(3, 400), level(4, 800)]).unwrap()
    }

    #[test]
    fn test_level_for_score() {
        let table = table();
        assert_eq!(table.level_for_score(0).level, 1);
        assert_eq!(table.level_for_score(199).level, 1);
        assert_eq!(table.level_for_score(200).level, 2);
        assert_eq!(table.level_for_score(500).level, 3);
        assert_eq!(table.level_for_score(800).level, 4);
        assert_eq!(table.level_for_score(1_000_000).level, 4); // Beyond max
    }

    #[test]
    fn test_level_for_score_never_exceeds_score() {
        let table = table();
        for score in 0..1_000u64 {
            let found = table.level_for_score(score);
            assert!(found.required_points <= score);
            assert!(
                !table
                    .iter()
                    .any(|l| l.required_points <= score && l.required_points > found.required_points)
            );
        }
    }

    #[test]
    fn test_below_first_threshold_returns_first_level() {
        let table = LevelTable::new(vec![level(1, 100), level(2, 300)]).unwrap();
        assert_eq!(table.level_for_score(50).level, 1);
        assert_eq!(table.progress_percentage(50), 0.0);
    }

    #[test]
    fn test_progress_percentage() {
        let table = table();
        let progress = table.progress(500);
        assert_eq!(progress.current.level, 3);
        assert_eq!(progress.next.as_ref().map(|l| l.level), Some(4));
        assert!((progress.progress_percentage - 25.0).abs() < 0.001); // 100 / 400

        let max = table.progress(5_000);
        assert!(max.next.is_none());
        assert_eq!(max.progress_percentage, 100.0);
    }

    #[test]
    fn test_next_level() {
        let table = table();
        assert_eq!(table.next_level(1).map(|l| l.level), Some(2));
        assert!(table.next_level(4).is_none());
        assert_eq!(table.max_level(), 4);
    }

    #[test]
    fn test_rejects_invalid_tables() {
        assert_eq!(LevelTable::new(vec![]).unwrap_err(), ConfigError::EmptyLevelTable);
        assert_eq!(
            LevelTable::new(vec![level(0, 0)]).unwrap_err(),
            ConfigError::InvalidLevelNumber(0)
        );
        assert!(matches!(
            LevelTable::new(vec![level(1, 0), level(1, 100)]),
            Err(ConfigError::LevelsNotIncreasing { .. })
        ));
        assert!(matches!(
            LevelTable::new(vec![level(1, 0), level(2, 0)]),
            Err(ConfigError::ThresholdsNotIncreasing { .. })
        ));
    }
}
