//! Settings configuration types

use serde::{Deserialize, Serialize};

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// HTTP API settings
    #[serde(default)]
    pub server: ServerSettings,
}

/// HTTP API and storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Port the API listens on (localhost only)
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Optional shared secret sent as `X-Zikir-Token`.
    /// Empty disables the check.
    #[serde(default)]
    pub http_token: String,

    /// SQLite database file. Empty means ~/.zikir/zikir.db
    #[serde(default)]
    pub database_path: String,
}

fn default_http_port() -> u16 {
    7410
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            http_token: String::new(),
            database_path: String::new(),
        }
    }
}
