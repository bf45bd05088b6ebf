//! Error types for the gamification core

use thiserror::Error;

/// Rejection of a single accrual event. The player snapshot is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccrualError {
    #[error("zikir count must be positive, got {0}")]
    InvalidCount(i64),

    #[error("{field} would overflow")]
    Overflow { field: &'static str },
}

/// Invalid reward configuration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("level table is empty")]
    EmptyLevelTable,

    #[error("level numbers start at 1, found {0}")]
    InvalidLevelNumber(u32),

    #[error("level {level} does not follow level {previous}")]
    LevelsNotIncreasing { previous: u32, level: u32 },

    #[error("level {level} requires {required} points, not more than the level before it ({previous})")]
    ThresholdsNotIncreasing {
        level: u32,
        required: u64,
        previous: u64,
    },

    #[error("badge id must not be empty")]
    EmptyBadgeId,

    #[error("duplicate badge id: {0}")]
    DuplicateBadgeId(String),

    #[error("badge {0} has a zero threshold")]
    ZeroThreshold(String),

    #[error("milestone trigger count must be positive")]
    ZeroMilestone,

    #[error("duplicate milestone trigger count: {0}")]
    DuplicateMilestone(u64),
}
