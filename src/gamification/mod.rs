//! Gamification core: Levels, Badges, Milestones, Accrual and Notifications
//!
//! Everything in here is pure. The engine takes a player snapshot and an
//! accrual event and hands back the proposed next snapshot together with
//! what was awarded. Persisting the result is the store's job.

mod badges;
mod engine;
mod error;
mod levels;
mod milestones;
mod notification;
mod player;
mod view;

pub use badges::{BadgeCondition, BadgeRule, BadgeRuleSet};
pub use engine::{AccrualEngine, RewardRates};
pub use error::{AccrualError, ConfigError};
pub use levels::{LevelDefinition, LevelProgress, LevelTable};
pub use milestones::{MilestoneRule, MilestoneRuleSet};
pub use notification::{Achievement, AchievementKind, NotificationSelector};
pub use player::{AccrualEvent, AccrualResult, CurrencyDelta, PlayerState};
pub use view::{GamificationView, NextLevelView, UnlockedBadge};
