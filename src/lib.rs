//! Zikir - gamification backend for a social zikir counter
//!
//! Counted zikir flows through one pure engine that converts a batch into
//! Amal Score, Barakah Coins and Noor Tokens, resolves the player's level
//! and unlocks badges and milestones. Around it sit:
//!
//! - **config**: TOML reward tables, validated into the engine at startup
//! - **store**: SQLite player progress, one transaction per accrual
//! - **server**: local JSON HTTP API for counter clients

pub mod config;
pub mod gamification;
pub mod server;
pub mod store;
