//! Bank Directory Routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::models::{BankListQuery, BankResponse};
use crate::routes::error_response;
use crate::AppState;

/// List the bank directory
#[utoipa::path(
    get,
    path = "/banks",
    params(
        ("limit" = Option<i64>, Query, description = "Page size (default 100)"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Banks with per-gateway codes", body = Vec<BankResponse>)
    ),
    tag = "Banks"
)]
pub async fn list_banks(
    State(state): State<AppState>,
    Query(query): Query<BankListQuery>,
) -> Result<Json<Vec<BankResponse>>, (StatusCode, String)> {
    let banks = state
        .bank_service
        .list(query.limit.unwrap_or(100), query.offset.unwrap_or(0))
        .await
        .map_err(error_response)?;

    Ok(Json(banks.into_iter().map(BankResponse::from).collect()))
}

/// Refresh the directory from both gateways now
#[utoipa::path(
    post,
    path = "/banks/sync",
    responses(
        (status = 200, description = "Directory refreshed"),
        (status = 502, description = "A gateway was unreachable")
    ),
    tag = "Banks"
)]
pub async fn sync_banks(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let count = state.bank_service.sync().await.map_err(error_response)?;
    Ok(Json(serde_json::json!({ "status": "ok", "banks": count })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/banks", get(list_banks))
        .route("/banks/sync", post(sync_banks))
}
