//! Bearer-token gate for the service API.
//!
//! A single shared key authenticates the upstream caller; webhook routes
//! are mounted outside this layer and rely on their HMAC signature
//! instead.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::OnceLock;

static API_KEY: OnceLock<String> = OnceLock::new();

/// Install the key from secrets at startup. Later calls are ignored.
pub fn init_api_key(key: String) {
    let _ = API_KEY.set(key);
}

pub async fn auth_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let Some(expected) = API_KEY.get().filter(|k| !k.is_empty()) else {
        // No key installed: local/dev mode, everything passes.
        tracing::warn!("HAVEN_API_KEY not set, requests are unauthenticated");
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Rejected request with wrong API key");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Rejected request without bearer token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
