//! Payment Routes - Rent Payment Initiation
//!
//! Initiation honors the `Idempotency-Key` header: a replayed key returns
//! the first call's checkout details instead of charging again.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::application::PaymentInitiation;
use crate::models::{InitiatePaymentRequest, PaymentResponse, PayoutResponse};
use crate::routes::error_response;
use crate::AppState;

use haven::ports::PaymentRepository;

/// Initiate a rent payment
#[utoipa::path(
    post,
    path = "/payments/rent",
    request_body = InitiatePaymentRequest,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "Client key for safe retries")
    ),
    responses(
        (status = 200, description = "Checkout details", body = PaymentInitiation),
        (status = 400, description = "Landlord payout account is not ready"),
        (status = 404, description = "No tenancy claimed by this user"),
        (status = 409, description = "Same idempotency key still in flight"),
        (status = 502, description = "Gateway unreachable")
    ),
    tag = "Payments"
)]
pub async fn initiate_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<InitiatePaymentRequest>,
) -> Result<Json<PaymentInitiation>, (StatusCode, String)> {
    let idempotency_key = headers
        .get("Idempotency-Key")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let initiation = state
        .payment_service
        .initiate_rent_payment(payload.user_id, payload.provider, idempotency_key)
        .await
        .map_err(error_response)?;

    Ok(Json(initiation))
}

/// Get a payment
#[utoipa::path(
    get,
    path = "/payments/{id}",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment found", body = PaymentResponse),
        (status = 404, description = "Payment not found")
    ),
    tag = "Payments"
)]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, (StatusCode, String)> {
    let payment = state
        .payment_repo
        .find_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Payment not found".to_string()))?;

    Ok(Json(payment.into()))
}

/// Get the payout for a payment
#[utoipa::path(
    get,
    path = "/payments/{id}/payout",
    params(
        ("id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payout found", body = PayoutResponse),
        (status = 404, description = "No payout for this payment yet")
    ),
    tag = "Payments"
)]
pub async fn get_payout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayoutResponse>, (StatusCode, String)> {
    let payout = state
        .payment_repo
        .find_payout_by_payment(id)
        .await
        .map_err(error_response)?
        .ok_or((StatusCode::NOT_FOUND, "Payout not found".to_string()))?;

    Ok(Json(payout.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments/rent", post(initiate_payment))
        .route("/payments/:id", get(get_payment))
        .route("/payments/:id/payout", get(get_payout))
}
