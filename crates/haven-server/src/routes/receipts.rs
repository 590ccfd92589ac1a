//! Receipt Routes - Rent Receipt Lookup

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::ReceiptResponse;
use crate::routes::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TenantQuery {
    pub tenant_id: Uuid,
}

/// Get a receipt
#[utoipa::path(
    get,
    path = "/receipts/{id}",
    params(
        ("id" = Uuid, Path, description = "Receipt ID")
    ),
    responses(
        (status = 200, description = "Receipt found", body = ReceiptResponse),
        (status = 404, description = "Receipt not found")
    ),
    tag = "Receipts"
)]
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReceiptResponse>, (StatusCode, String)> {
    let receipt = state
        .receipt_service
        .get(id)
        .await
        .map_err(error_response)?;

    Ok(Json(receipt.into()))
}

/// List a tenancy's receipts
#[utoipa::path(
    get,
    path = "/receipts",
    params(
        ("tenant_id" = Uuid, Query, description = "Tenancy ID")
    ),
    responses(
        (status = 200, description = "Receipts, newest first", body = Vec<ReceiptResponse>)
    ),
    tag = "Receipts"
)]
pub async fn list_receipts(
    State(state): State<AppState>,
    Query(query): Query<TenantQuery>,
) -> Result<Json<Vec<ReceiptResponse>>, (StatusCode, String)> {
    let receipts = state
        .receipt_service
        .list_for_tenant(query.tenant_id)
        .await
        .map_err(error_response)?;

    Ok(Json(
        receipts.into_iter().map(ReceiptResponse::from).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/receipts", get(list_receipts))
        .route("/receipts/:id", get(get_receipt))
}
