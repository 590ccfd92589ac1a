//! Webhook Routes - Gateway Event Intake
//!
//! These routes sit outside the bearer-auth layer; each request is
//! authenticated by its HMAC signature over the raw body instead. Every
//! handled outcome answers 200 so the gateway stops redelivering;
//! verification itself is idempotent, so redeliveries are no-ops.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;

use haven::domain::PaymentProvider;

use crate::adapters::signature::verify_signature;
use crate::routes::error_response;
use crate::AppState;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
}

/// Paystack webhook
#[utoipa::path(
    post,
    path = "/webhooks/paystack",
    responses(
        (status = 200, description = "Event handled"),
        (status = 401, description = "Bad signature")
    ),
    tag = "Webhooks"
)]
pub async fn paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, String)> {
    let signature = header(&headers, "x-paystack-signature");
    if !verify_signature(&state.webhook_secrets.paystack, &body, signature) {
        tracing::warn!("Paystack webhook with bad signature");
        return Err((StatusCode::UNAUTHORIZED, "invalid signature".to_string()));
    }

    let event: Value = serde_json::from_slice(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    if event["event"].as_str() != Some("charge.success") {
        return Ok(Json(serde_json::json!({ "status": "ignored" })));
    }
    let Some(reference) = event["data"]["reference"].as_str() else {
        return Err((StatusCode::BAD_REQUEST, "missing reference".to_string()));
    };

    let outcome = state
        .payment_service
        .process_webhook(PaymentProvider::Paystack, reference)
        .await
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({ "status": format!("{outcome:?}") })))
}

/// Flutterwave webhook
#[utoipa::path(
    post,
    path = "/webhooks/flutterwave",
    responses(
        (status = 200, description = "Event handled"),
        (status = 401, description = "Bad signature")
    ),
    tag = "Webhooks"
)]
pub async fn flutterwave_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, String)> {
    let signature = header(&headers, "verif-hash");
    if !verify_signature(&state.webhook_secrets.flutterwave, &body, signature) {
        tracing::warn!("Flutterwave webhook with bad signature");
        return Err((StatusCode::UNAUTHORIZED, "invalid signature".to_string()));
    }

    let event: Value = serde_json::from_slice(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    if event["event"].as_str() != Some("charge.completed") {
        return Ok(Json(serde_json::json!({ "status": "ignored" })));
    }
    let Some(reference) = event["data"]["tx_ref"].as_str() else {
        return Err((StatusCode::BAD_REQUEST, "missing tx_ref".to_string()));
    };

    let outcome = state
        .payment_service
        .process_webhook(PaymentProvider::Flutterwave, reference)
        .await
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({ "status": format!("{outcome:?}") })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/webhooks/paystack", post(paystack_webhook))
        .route("/webhooks/flutterwave", post(flutterwave_webhook))
}
