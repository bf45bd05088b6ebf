//! CLI command implementations

pub mod award;
mod http;
pub mod init;
pub mod leaderboard;
pub mod serve;
pub mod status;
