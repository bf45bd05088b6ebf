//! Type definitions for the HTTP API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::gamification::{AccrualEngine, AccrualResult, Achievement, NotificationSelector};
use crate::store::{LeaderboardEntry, PlayerStore};

/// Optional shared secret header
pub const AUTH_HEADER: &str = "X-Zikir-Token";

/// Identifies the player a request acts for
pub const PLAYER_HEADER: &str = "X-Zikir-Player";

/// Shared state for all request handlers
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<AccrualEngine>,
    pub store: PlayerStore,
    pub selector: NotificationSelector,
    pub special_status_level: u32,
    pub auth_token: Option<String>,
}

/// Body of a successful `POST /api/user/award-points`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardPointsResponse {
    #[serde(flatten)]
    pub result: AccrualResult,
    /// The one achievement the UI should celebrate, if any
    pub notification: Option<Achievement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    pub entries: Vec<LeaderboardEntry>,
}
