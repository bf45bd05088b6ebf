//! HTTP API for counter clients
//!
//! Listens on localhost and accepts:
//! - POST /api/user/award-points - Apply a counted batch for the player
//! - GET /api/user/gamification - Player profile with level progress
//! - GET /api/leaderboard - Global or per-room leaderboard
//! - GET /api/ping - Health check
//!
//! The player is named by the `X-Zikir-Player` header.

mod handlers;
mod types;

pub use types::{
    ApiState, AwardPointsResponse, LeaderboardResponse, AUTH_HEADER, PLAYER_HEADER,
};

use std::io::Read;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Result, anyhow};
use tiny_http::{Request, Response, Server};
use tracing::{error, info};

const MAX_BODY_BYTES: usize = 64 * 1024;

/// A bound, not yet running server
pub struct HttpServer {
    server: Arc<Server>,
    state: ApiState,
}

/// A running server
pub struct ServerHandle {
    server: Arc<Server>,
    thread: JoinHandle<()>,
}

impl HttpServer {
    /// Bind to `addr` (e.g. "127.0.0.1:7410", port 0 picks a free one)
    pub fn bind(addr: &str, state: ApiState) -> Result<Self> {
        let server =
            Server::http(addr).map_err(|e| anyhow!("Failed to start server on {}: {}", addr, e))?;
        Ok(Self {
            server: Arc::new(server),
            state,
        })
    }

    /// Port actually bound
    pub fn port(&self) -> Option<u16> {
        self.server.server_addr().to_ip().map(|a| a.port())
    }

    /// Serve requests on a background thread
    pub fn spawn(self) -> ServerHandle {
        let auth_enabled = self.state.auth_token.is_some();
        info!(
            "[zikir:http] Server listening on http://127.0.0.1:{} (auth: {})",
            self.port().unwrap_or_default(),
            if auth_enabled { "enabled" } else { "disabled" }
        );

        let server = Arc::clone(&self.server);
        let thread = thread::spawn(move || {
            for request in self.server.incoming_requests() {
                route(&self.state, request);
            }
            info!("[zikir:http] Server stopped");
        });

        ServerHandle { server, thread }
    }
}

impl ServerHandle {
    /// Stop accepting requests and wait for the server thread
    pub fn shutdown(self) {
        self.server.unblock();
        if self.thread.join().is_err() {
            error!("[zikir:http] Server thread panicked");
        }
    }
}

fn route(state: &ApiState, mut request: Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or(url.as_str());

    if !is_authorized(&request, state.auth_token.as_deref()) {
        respond_json(request, 401, serde_json::json!({ "error": "unauthorized" }));
        return;
    }

    match (method.as_str(), path) {
        ("GET", "/api/ping") => {
            respond_json(
                request,
                200,
                serde_json::json!({
                    "status": "ok",
                    "version": env!("CARGO_PKG_VERSION"),
                }),
            );
        }
        ("POST", "/api/user/award-points") => {
            let Some(player_id) = player_id(&request) else {
                respond_json(request, 400, serde_json::json!({ "error": "missing_player" }));
                return;
            };
            let body = match read_request_body(&mut request) {
                Ok(body) => body,
                Err(response) => {
                    if let Err(e) = request.respond(response) {
                        error!("[zikir:http] Failed to send response: {}", e);
                    }
                    return;
                }
            };
            handlers::handle_award_points(state, &player_id, &body, request);
        }
        ("GET", "/api/user/gamification") => {
            let Some(player_id) = player_id(&request) else {
                respond_json(request, 400, serde_json::json!({ "error": "missing_player" }));
                return;
            };
            handlers::handle_gamification(state, &player_id, request);
        }
        ("GET", "/api/leaderboard") => {
            handlers::handle_leaderboard(state, &url, request);
        }
        _ => {
            respond_json(request, 404, serde_json::json!({ "error": "not_found" }));
        }
    }
}

fn is_authorized(request: &Request, expected: Option<&str>) -> bool {
    let Some(expected) = expected.filter(|t| !t.trim().is_empty()) else {
        return true;
    };
    header_value(request, AUTH_HEADER).is_some_and(|v| v == expected)
}

fn player_id(request: &Request) -> Option<String> {
    header_value(request, PLAYER_HEADER)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn header_value<'a>(request: &'a Request, name: &'static str) -> Option<&'a str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str())
}

fn with_json_content_type<R: Read>(response: Response<R>) -> Response<R> {
    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

fn read_request_body(request: &mut Request) -> Result<String, Response<std::io::Cursor<Vec<u8>>>> {
    let mut body = String::new();
    let mut reader = request.as_reader().take((MAX_BODY_BYTES + 1) as u64);
    if let Err(e) = reader.read_to_string(&mut body) {
        error!("[zikir:http] Failed to read body: {}", e);
        return Err(with_json_content_type(
            Response::from_string("{\"error\":\"bad_request\"}").with_status_code(400),
        ));
    }

    if body.len() > MAX_BODY_BYTES {
        return Err(with_json_content_type(
            Response::from_string("{\"error\":\"payload_too_large\"}").with_status_code(413),
        ));
    }

    Ok(body)
}

fn respond_json(request: Request, status_code: u16, value: serde_json::Value) {
    let body =
        serde_json::to_string(&value).unwrap_or_else(|_| "{\"error\":\"serialize\"}".to_string());
    let response = with_json_content_type(Response::from_string(body).with_status_code(status_code));
    if let Err(e) = request.respond(response) {
        error!("[zikir:http] Failed to send response: {}", e);
    }
}

/// Value of `key` in the query string of `url`
fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
