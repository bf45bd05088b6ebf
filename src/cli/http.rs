//! HTTP client helpers for talking to a running `zikir serve`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use zikir::config::Config;
use zikir::server::{AUTH_HEADER, PLAYER_HEADER};

fn format_http_error(code: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {code}");
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return format!("HTTP {code}: {body}");
    };

    let error = value
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or("http_error");

    match value.get("message").and_then(|v| v.as_str()) {
        Some(message) => format!("HTTP {code} {error}: {message}"),
        None => format!("HTTP {code} {error}"),
    }
}

/// Where the server listens and how to authenticate against it
pub(super) struct ServerClient {
    base_url: String,
    token: Option<String>,
}

impl ServerClient {
    /// Read port and token from the same config the server uses
    pub(super) fn from_config(config_override: Option<&Path>) -> Result<Self> {
        let config = Config::load_from(config_override)?;
        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", config.settings.server.http_port),
            token: config.http_token(),
        })
    }

    fn request(&self, req: ureq::Request, player: Option<&str>) -> ureq::Request {
        let mut req = req;
        if let Some(token) = self.token.as_deref() {
            req = req.set(AUTH_HEADER, token);
        }
        if let Some(player) = player {
            req = req.set(PLAYER_HEADER, player);
        }
        req
    }

    pub(super) fn get_json<T: DeserializeOwned>(&self, path: &str, player: Option<&str>) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .request(ureq::get(&url), player)
            .call()
            .map_err(|e| into_anyhow(e, &url))?;
        read_json(resp)
    }

    pub(super) fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        player: Option<&str>,
        payload: &impl Serialize,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let body = serde_json::to_string(payload).context("Failed to serialize request JSON")?;
        let resp = self
            .request(ureq::post(&url), player)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| into_anyhow(e, &url))?;
        read_json(resp)
    }
}

fn into_anyhow(err: ureq::Error, url: &str) -> anyhow::Error {
    match err {
        ureq::Error::Status(code, resp) => {
            let body = resp.into_string().unwrap_or_default();
            anyhow::anyhow!(format_http_error(code, &body))
        }
        other => anyhow::anyhow!("Failed to reach {} (is `zikir serve` running?): {}", url, other),
    }
}

fn read_json<T: DeserializeOwned>(resp: ureq::Response) -> Result<T> {
    let body = resp.into_string().context("Failed to read response body")?;
    serde_json::from_str(&body).context("Failed to parse JSON response")
}
