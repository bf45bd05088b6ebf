//! Player snapshot, accrual input and accrual result

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::badges::BadgeRule;
use super::error::AccrualError;
use super::levels::LevelDefinition;
use super::milestones::MilestoneRule;

/// Player progress as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub amal_score: u64,
    pub barakah_coins: u64,
    pub noor_tokens: u64,
    pub level: u32,
    pub unlocked_badge_ids: BTreeSet<String>,
    pub total_lifetime_count: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            amal_score: 0,
            barakah_coins: 0,
            noor_tokens: 0,
            level: 1,
            unlocked_badge_ids: BTreeSet::new(),
            total_lifetime_count: 0,
        }
    }
}

impl PlayerState {
    pub fn has_badge(&self, id: &str) -> bool {
        self.unlocked_badge_ids.contains(id)
    }
}

/// A batch of counted zikir, as sent by the counter UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualEvent {
    /// Signed so that bad input is rejected by the engine instead of the decoder
    pub zikir_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
}

impl AccrualEvent {
    pub fn new(zikir_count: i64) -> Self {
        Self {
            zikir_count,
            room_id: None,
        }
    }

    pub fn in_room(zikir_count: i64, room_id: i64) -> Self {
        Self {
            zikir_count,
            room_id: Some(room_id),
        }
    }

    /// The count as an unsigned increment, or an error if not positive
    pub fn validated_count(&self) -> Result<u64, AccrualError> {
        if self.zikir_count <= 0 {
            return Err(AccrualError::InvalidCount(self.zikir_count));
        }
        Ok(self.zikir_count as u64)
    }
}

/// Currency amounts awarded by one accrual
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDelta {
    pub amal_score: u64,
    pub barakah_coins: u64,
    pub noor_tokens: u64,
}

impl CurrencyDelta {
    pub fn is_empty(&self) -> bool {
        self.amal_score == 0 && self.barakah_coins == 0 && self.noor_tokens == 0
    }
}

/// Everything one accrual produced. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualResult {
    pub points_awarded: CurrencyDelta,
    pub leveled_up: bool,
    /// Level the player ends up at after this accrual
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_level: Option<LevelDefinition>,
    pub new_badges: Vec<BadgeRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<MilestoneRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_count() {
        assert_eq!(AccrualEvent::new(5).validated_count(), Ok(5));
        assert_eq!(
            AccrualEvent::new(0).validated_count(),
            Err(AccrualError::InvalidCount(0))
        );
        assert_eq!(
            AccrualEvent::in_room(-3, 7).validated_count(),
            Err(AccrualError::InvalidCount(-3))
        );
    }

    #[test]
    fn test_event_wire_format() {
        let event: AccrualEvent = serde_json::from_str(r#"{"zikirCount": 33, "roomId": 4}"#).unwrap();
        assert_eq!(event, AccrualEvent::in_room(33, 4));

        let event: AccrualEvent = serde_json::from_str(r#"{"zikirCount": 1}"#).unwrap();
        assert_eq!(event.room_id, None);
    }

    #[test]
    fn test_default_player_starts_at_level_one() {
        let player = PlayerState::default();
        assert_eq!(player.level, 1);
        assert_eq!(player.total_lifetime_count, 0);
        assert!(!player.has_badge("first_zikir"));
    }
}
