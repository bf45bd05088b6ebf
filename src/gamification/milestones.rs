//! One-time celebrations tied to the lifetime zikir count

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRule {
    pub trigger_count: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ar: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct MilestoneRuleSet {
    rules: Vec<MilestoneRule>,
}

impl MilestoneRuleSet {
    pub fn new(rules: Vec<MilestoneRule>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.trigger_count == 0 {
                return Err(ConfigError::ZeroMilestone);
            }
            if !seen.insert(rule.trigger_count) {
                return Err(ConfigError::DuplicateMilestone(rule.trigger_count));
            }
        }
        Ok(Self { rules })
    }

    /// Milestone landed on by moving the total from `previous_total` to `new_total`.
    ///
    /// Only an exact hit on `trigger_count` fires; an increment that jumps
    /// past a trigger without landing on it does not award that milestone.
    pub fn evaluate(&self, previous_total: u64, new_total: u64) -> Option<&MilestoneRule> {
        if previous_total >= new_total {
            return None;
        }
        self.rules.iter().find(|m| m.trigger_count == new_total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MilestoneRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestone(trigger_count: u64) -> MilestoneRule {
        MilestoneRule {
            trigger_count,
            title: format!("{trigger_count} counts"),
            title_ar: None,
            description: String::new(),
        }
    }

    #[test]
    fn test_fires_on_exact_hit() {
        let set = MilestoneRuleSet::new(vec![milestone(33), milestone(100)]).unwrap();
        assert_eq!(set.evaluate(99, 100).map(|m| m.trigger_count), Some(100));
        assert_eq!(set.evaluate(0, 33).map(|m| m.trigger_count), Some(33));
        assert!(set.evaluate(100, 101).is_none());
    }

    #[test]
    fn test_skipped_trigger_is_missed() {
        let set = MilestoneRuleSet::new(vec![milestone(100)]).unwrap();
        assert!(set.evaluate(95, 105).is_none());
    }

    #[test]
    fn test_no_fire_without_increase() {
        let set = MilestoneRuleSet::new(vec![milestone(100)]).unwrap();
        assert!(set.evaluate(100, 100).is_none());
    }

    #[test]
    fn test_rejects_invalid_rules() {
        assert_eq!(
            MilestoneRuleSet::new(vec![milestone(0)]).unwrap_err(),
            ConfigError::ZeroMilestone
        );
        assert_eq!(
            MilestoneRuleSet::new(vec![milestone(5), milestone(5)]).unwrap_err(),
            ConfigError::DuplicateMilestone(5)
        );
    }
}
