//! Request handlers for the player API

use tiny_http::Request;
use tracing::{error, info, warn};

use super::types::{ApiState, AwardPointsResponse, LeaderboardResponse};
use super::{query_param, respond_json};
use crate::gamification::{AccrualError, AccrualEvent};
use crate::store::AwardError;

const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
const MAX_LEADERBOARD_LIMIT: usize = 100;

fn respond_serialized<T: serde::Serialize>(request: Request, status_code: u16, value: &T) {
    match serde_json::to_value(value) {
        Ok(json) => respond_json(request, status_code, json),
        Err(e) => {
            error!("[zikir:http] Failed to serialize response: {}", e);
            respond_json(request, 500, serde_json::json!({ "error": "serialize" }));
        }
    }
}

/// POST /api/user/award-points
pub(super) fn handle_award_points(state: &ApiState, player_id: &str, body: &str, request: Request) {
    let event: AccrualEvent = match serde_json::from_str(body) {
        Ok(event) => event,
        Err(e) => {
            warn!("[zikir:http] Invalid award request body: {}", e);
            respond_json(
                request,
                400,
                serde_json::json!({ "error": "invalid_json", "message": e.to_string() }),
            );
            return;
        }
    };

    match state.store.award(&state.engine, player_id, &event) {
        Ok(outcome) => {
            let notification = state.selector.select(&outcome.result);
            if let Some(achievement) = &notification {
                info!(
                    "[zikir:http] {} earned {}: {}",
                    player_id,
                    achievement.kind.label(),
                    achievement.title
                );
            }
            respond_serialized(
                request,
                200,
                &AwardPointsResponse {
                    result: outcome.result,
                    notification,
                },
            );
        }
        Err(AwardError::Rejected(err)) => {
            warn!("[zikir:http] Rejected accrual for {}: {}", player_id, err);
            let code = match err {
                AccrualError::InvalidCount(_) => "invalid_count",
                AccrualError::Overflow { .. } => "overflow",
            };
            respond_json(
                request,
                400,
                serde_json::json!({ "error": code, "message": err.to_string() }),
            );
        }
        Err(AwardError::Storage(err)) => {
            error!("[zikir:http] Failed to store accrual for {}: {:#}", player_id, err);
            respond_json(request, 500, serde_json::json!({ "error": "storage" }));
        }
    }
}

/// GET /api/user/gamification
pub(super) fn handle_gamification(state: &ApiState, player_id: &str, request: Request) {
    match state
        .store
        .gamification_view(&state.engine, player_id, state.special_status_level)
    {
        Ok(view) => respond_serialized(request, 200, &view),
        Err(err) => {
            error!("[zikir:http] Failed to load profile for {}: {:#}", player_id, err);
            respond_json(request, 500, serde_json::json!({ "error": "storage" }));
        }
    }
}

/// GET /api/leaderboard[?roomId=R][&limit=N]
pub(super) fn handle_leaderboard(state: &ApiState, url: &str, request: Request) {
    let limit = match query_param(url, "limit") {
        None => DEFAULT_LEADERBOARD_LIMIT,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n.min(MAX_LEADERBOARD_LIMIT),
            _ => {
                respond_json(request, 400, serde_json::json!({ "error": "invalid_limit" }));
                return;
            }
        },
    };

    let room_id = match query_param(url, "roomId").map(str::parse::<i64>) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => {
            respond_json(request, 400, serde_json::json!({ "error": "invalid_room" }));
            return;
        }
    };

    let entries = match room_id {
        Some(room_id) => state.store.room_leaderboard(room_id, limit),
        None => state.store.leaderboard(limit),
    };

    match entries {
        Ok(entries) => respond_serialized(request, 200, &LeaderboardResponse { room_id, entries }),
        Err(err) => {
            error!("[zikir:http] Failed to load leaderboard: {:#}", err);
            respond_json(request, 500, serde_json::json!({ "error": "storage" }));
        }
    }
}
