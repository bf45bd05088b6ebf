//! Accrual Engine - turns a zikir count into currencies, levels, badges and milestones
//!
//! `apply` is a pure function of (snapshot, event). It holds no mutable
//! state, so one engine can be shared by every request thread.

use super::badges::{BadgeRule, BadgeRuleSet};
use super::error::AccrualError;
use super::levels::LevelTable;
use super::milestones::MilestoneRuleSet;
use super::player::{AccrualEvent, AccrualResult, CurrencyDelta, PlayerState};

/// Conversion rates from counted zikir to currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardRates {
    pub amal_per_count: u64,
    pub barakah_per_count: u64,
    /// One Noor Token per this many lifetime counts (0 disables Noor)
    pub counts_per_noor: u64,
}

impl Default for RewardRates {
    fn default() -> Self {
        Self {
            amal_per_count: 10,
            barakah_per_count: 1,
            counts_per_noor: 33,
        }
    }
}

impl RewardRates {
    /// Currency deltas for moving the lifetime total from `old_total` to `new_total`
    fn deltas(&self, count: u64, old_total: u64, new_total: u64) -> Result<CurrencyDelta, AccrualError> {
        let amal_score = bounded(count.checked_mul(self.amal_per_count), "amalScore")?;
        let barakah_coins = bounded(count.checked_mul(self.barakah_per_count), "barakahCoins")?;
        let noor_tokens = match self.counts_per_noor {
            0 => 0,
            per => new_total / per - old_total / per,
        };

        Ok(CurrencyDelta {
            amal_score,
            barakah_coins,
            noor_tokens,
        })
    }
}

/// Main engine for all accrual computations
#[derive(Debug, Clone)]
pub struct AccrualEngine {
    levels: LevelTable,
    badges: BadgeRuleSet,
    milestones: MilestoneRuleSet,
    rates: RewardRates,
}

impl AccrualEngine {
    pub fn new(
        levels: LevelTable,
        badges: BadgeRuleSet,
        milestones: MilestoneRuleSet,
        rates: RewardRates,
    ) -> Self {
        Self {
            levels,
            badges,
            milestones,
            rates,
        }
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn badges(&self) -> &BadgeRuleSet {
        &self.badges
    }

    pub fn milestones(&self) -> &MilestoneRuleSet {
        &self.milestones
    }

    pub fn rates(&self) -> &RewardRates {
        &self.rates
    }

    /// Apply one event to a snapshot.
    ///
    /// Returns the proposed next snapshot and what was awarded. On error
    /// nothing is produced and the caller keeps its snapshot.
    pub fn apply(
        &self,
        player: &PlayerState,
        event: &AccrualEvent,
    ) -> Result<(PlayerState, AccrualResult), AccrualError> {
        let count = event.validated_count()?;

        // A stale stored level must not produce a phantom level-up
        let previous_level = self.levels.level_for_score(player.amal_score).level;

        let new_total = add(player.total_lifetime_count, count, "totalLifetimeCount")?;
        let mut awarded = self
            .rates
            .deltas(count, player.total_lifetime_count, new_total)?;

        let mut next = player.clone();
        next.total_lifetime_count = new_total;
        next.amal_score = add(player.amal_score, awarded.amal_score, "amalScore")?;
        next.barakah_coins = add(player.barakah_coins, awarded.barakah_coins, "barakahCoins")?;
        next.noor_tokens = add(player.noor_tokens, awarded.noor_tokens, "noorTokens")?;
        next.level = self.levels.level_for_score(next.amal_score).level;

        // Badge points can cross a level or score threshold that another
        // badge waits on, so evaluate until nothing new unlocks. Each pass
        // unlocks at least one badge, which bounds the loop by the rule count.
        let mut new_badges: Vec<BadgeRule> = Vec::new();
        loop {
            let unlocked: Vec<BadgeRule> = self
                .badges
                .evaluate(&next, event)
                .into_iter()
                .cloned()
                .collect();
            if unlocked.is_empty() {
                break;
            }
            for badge in &unlocked {
                awarded.amal_score = add(awarded.amal_score, badge.points, "amalScore")?;
                next.amal_score = add(next.amal_score, badge.points, "amalScore")?;
                next.unlocked_badge_ids.insert(badge.id.clone());
            }
            next.level = self.levels.level_for_score(next.amal_score).level;
            new_badges.extend(unlocked);
        }

        let level = self.levels.level_for_score(next.amal_score);

        let milestone = self
            .milestones
            .evaluate(player.total_lifetime_count, new_total)
            .cloned();

        let result = AccrualResult {
            points_awarded: awarded,
            leveled_up: level.level > previous_level,
            new_level: Some(level.clone()),
            new_badges,
            milestone,
        };

        Ok((next, result))
    }
}

/// Counters are stored as signed 64-bit integers
const MAX_COUNTER: u64 = i64::MAX as u64;

fn bounded(value: Option<u64>, field: &'static str) -> Result<u64, AccrualError> {
    value
        .filter(|v| *v <= MAX_COUNTER)
        .ok_or(AccrualError::Overflow { field })
}

fn add(base: u64, amount: u64, field: &'static str) -> Result<u64, AccrualError> {
    bounded(base.checked_add(amount), field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::{BadgeCondition, LevelDefinition, MilestoneRule};

    fn level(level: u32, required_points: u64) -> LevelDefinition {
        LevelDefinition {
            level,
            title: format!("Level {level}"),
            title_ar: None,
            required_points,
        }
    }

    fn engine_with(badges: Vec<BadgeRule>) -> AccrualEngine {
        AccrualEngine::new(
            LevelTable::new(vec![level(1, 0), level(2, 200), level(3, 400), level(4, 800)]).unwrap(),
            BadgeRuleSet::new(badges).unwrap(),
            MilestoneRuleSet::new(vec![MilestoneRule {
                trigger_count: 100,
                title: "Hundred".to_string(),
                title_ar: None,
                description: "100 counts".to_string(),
            }])
            .unwrap(),
            RewardRates {
                amal_per_count: 10,
                barakah_per_count: 1,
                counts_per_noor: 33,
            },
        )
    }

    fn player_at(amal_score: u64, total: u64) -> PlayerState {
        PlayerState {
            amal_score,
            level: 3,
            total_lifetime_count: total,
            ..Default::default()
        }
    }

    #[test]
    fn test_points_and_milestone_without_level_up() {
        let engine = engine_with(vec![]);
        let (next, result) = engine.apply(&player_at(450, 95), &AccrualEvent::new(5)).unwrap();

        assert_eq!(next.amal_score, 500);
        assert_eq!(next.level, 3);
        assert_eq!(next.total_lifetime_count, 100);
        assert!(!result.leveled_up);
        assert_eq!(result.new_level.map(|l| l.level), Some(3));
        assert_eq!(result.milestone.map(|m| m.trigger_count), Some(100));
        // 95 / 33 = 2, 100 / 33 = 3
        assert_eq!(result.points_awarded.noor_tokens, 1);
        assert_eq!(result.points_awarded.barakah_coins, 5);
    }

    #[test]
    fn test_level_up() {
        let engine = engine_with(vec![]);
        let (next, result) = engine.apply(&player_at(450, 95), &AccrualEvent::new(40)).unwrap();

        assert_eq!(next.amal_score, 850);
        assert!(result.leveled_up);
        assert_eq!(result.new_level.map(|l| l.level), Some(4));
        assert!(result.milestone.is_none());
    }

    #[test]
    fn test_rejects_non_positive_count() {
        let engine = engine_with(vec![]);
        assert_eq!(
            engine.apply(&player_at(450, 95), &AccrualEvent::new(0)),
            Err(AccrualError::InvalidCount(0))
        );
        assert_eq!(
            engine.apply(&player_at(450, 95), &AccrualEvent::new(-1)),
            Err(AccrualError::InvalidCount(-1))
        );
    }

    #[test]
    fn test_badge_points_count_towards_level() {
        let engine = engine_with(vec![BadgeRule {
            id: "hundred".to_string(),
            name: "Hundredfold".to_string(),
            name_ar: None,
            description: String::new(),
            icon: None,
            points: 300,
            condition: BadgeCondition::TotalCountAtLeast(100),
        }]);
        let (next, result) = engine.apply(&player_at(450, 95), &AccrualEvent::new(5)).unwrap();

        assert_eq!(next.amal_score, 800);
        assert_eq!(result.points_awarded.amal_score, 350);
        assert!(next.has_badge("hundred"));
        assert!(result.leveled_up);
        assert_eq!(next.level, 4);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let engine = engine_with(vec![]);
        let player = PlayerState {
            total_lifetime_count: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(
            engine.apply(&player, &AccrualEvent::new(1)),
            Err(AccrualError::Overflow { .. })
        ));
    }

    #[test]
    fn test_counters_stay_within_storable_range() {
        let engine = engine_with(vec![]);

        // 10^18 counts fit an i64 but ten times that amal score does not
        assert_eq!(
            engine.apply(&PlayerState::default(), &AccrualEvent::new(1_000_000_000_000_000_000)),
            Err(AccrualError::Overflow { field: "amalScore" })
        );

        let player = PlayerState {
            total_lifetime_count: i64::MAX as u64,
            ..Default::default()
        };
        assert_eq!(
            engine.apply(&player, &AccrualEvent::new(1)),
            Err(AccrualError::Overflow {
                field: "totalLifetimeCount"
            })
        );
    }

    #[test]
    fn test_badge_points_unlock_level_badges_in_same_event() {
        let engine = AccrualEngine::new(
            LevelTable::new(vec![level(1, 0), level(2, 100)]).unwrap(),
            BadgeRuleSet::new(vec![
                BadgeRule {
                    id: "first".to_string(),
                    name: "First".to_string(),
                    name_ar: None,
                    description: String::new(),
                    icon: None,
                    points: 200,
                    condition: BadgeCondition::TotalCountAtLeast(1),
                },
                BadgeRule {
                    id: "second_level".to_string(),
                    name: "Second Level".to_string(),
                    name_ar: None,
                    description: String::new(),
                    icon: None,
                    points: 5,
                    condition: BadgeCondition::LevelAtLeast(2),
                },
            ])
            .unwrap(),
            MilestoneRuleSet::default(),
            RewardRates::default(),
        );

        let (next, result) = engine.apply(&PlayerState::default(), &AccrualEvent::new(1)).unwrap();

        let ids: Vec<&str> = result.new_badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["first", "second_level"]);
        assert_eq!(next.level, 2);
        assert_eq!(next.amal_score, 215);
        assert_eq!(result.points_awarded.amal_score, 215);
        assert!(result.leveled_up);

        // Nothing left to unlock on the next event
        let (_, again) = engine.apply(&next, &AccrualEvent::new(1)).unwrap();
        assert!(again.new_badges.is_empty());
    }

    #[test]
    fn test_stale_stored_level_is_normalised() {
        let engine = engine_with(vec![]);
        let stale = PlayerState {
            amal_score: 450,
            level: 1,
            ..Default::default()
        };

        let (next, result) = engine.apply(&stale, &AccrualEvent::new(1)).unwrap();

        assert_eq!(next.level, 3);
        assert!(!result.leveled_up);
        assert_eq!(result.new_level.map(|l| l.level), Some(3));
    }

    #[test]
    fn test_zero_noor_rate_disables_noor() {
        let mut engine = engine_with(vec![]);
        engine.rates.counts_per_noor = 0;
        let (_, result) = engine.apply(&PlayerState::default(), &AccrualEvent::new(500)).unwrap();
        assert_eq!(result.points_awarded.noor_tokens, 0);
    }
}
