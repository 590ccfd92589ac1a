//! Tenancy Routes - Tenancies and the Rent Ledger

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    ChangeRentRequest, ClaimTenancyRequest, CreateTenancyRequest, LedgerEntryResponse,
    TenantResponse,
};
use crate::routes::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LandlordQuery {
    pub landlord_id: Uuid,
}

/// Create a tenancy
#[utoipa::path(
    post,
    path = "/tenants",
    request_body = CreateTenancyRequest,
    responses(
        (status = 200, description = "Tenancy created", body = TenantResponse),
        (status = 400, description = "Non-positive rent amount")
    ),
    tag = "Tenants"
)]
pub async fn create_tenancy(
    State(state): State<AppState>,
    Json(payload): Json<CreateTenancyRequest>,
) -> Result<Json<TenantResponse>, (StatusCode, String)> {
    let tenant = state
        .rent_service
        .create_tenancy(
            payload.property_id,
            payload.landlord_id,
            payload.rent_amount_kobo,
            payload.rent_cycle,
            payload.rent_start_date,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(tenant.into()))
}

/// List a landlord's tenancies
#[utoipa::path(
    get,
    path = "/tenants",
    params(
        ("landlord_id" = Uuid, Query, description = "Landlord user ID")
    ),
    responses(
        (status = 200, description = "Tenancies", body = Vec<TenantResponse>)
    ),
    tag = "Tenants"
)]
pub async fn list_tenancies(
    State(state): State<AppState>,
    Query(query): Query<LandlordQuery>,
) -> Result<Json<Vec<TenantResponse>>, (StatusCode, String)> {
    let tenants = state
        .rent_service
        .list_by_landlord(query.landlord_id)
        .await
        .map_err(error_response)?;

    Ok(Json(tenants.into_iter().map(TenantResponse::from).collect()))
}

/// Get a tenancy
#[utoipa::path(
    get,
    path = "/tenants/{id}",
    params(
        ("id" = Uuid, Path, description = "Tenancy ID")
    ),
    responses(
        (status = 200, description = "Tenancy found", body = TenantResponse),
        (status = 404, description = "Tenancy not found")
    ),
    tag = "Tenants"
)]
pub async fn get_tenancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TenantResponse>, (StatusCode, String)> {
    let tenant = state.rent_service.get(id).await.map_err(error_response)?;
    Ok(Json(tenant.into()))
}

/// Claim a tenancy as a platform user
#[utoipa::path(
    post,
    path = "/tenants/{id}/claim",
    params(
        ("id" = Uuid, Path, description = "Tenancy ID")
    ),
    request_body = ClaimTenancyRequest,
    responses(
        (status = 200, description = "Tenancy claimed", body = TenantResponse),
        (status = 409, description = "Already claimed by another user")
    ),
    tag = "Tenants"
)]
pub async fn claim_tenancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClaimTenancyRequest>,
) -> Result<Json<TenantResponse>, (StatusCode, String)> {
    let tenant = state
        .rent_service
        .claim(id, payload.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(tenant.into()))
}

/// Change the rent amount
#[utoipa::path(
    put,
    path = "/tenants/{id}/rent",
    params(
        ("id" = Uuid, Path, description = "Tenancy ID")
    ),
    request_body = ChangeRentRequest,
    responses(
        (status = 200, description = "Rent updated", body = TenantResponse),
        (status = 403, description = "Caller is not the landlord")
    ),
    tag = "Tenants"
)]
pub async fn change_rent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangeRentRequest>,
) -> Result<Json<TenantResponse>, (StatusCode, String)> {
    let tenant = state
        .rent_service
        .change_amount(id, payload.landlord_id, payload.new_amount_kobo)
        .await
        .map_err(error_response)?;

    Ok(Json(tenant.into()))
}

/// The tenancy's rent ledger
#[utoipa::path(
    get,
    path = "/tenants/{id}/ledger",
    params(
        ("id" = Uuid, Path, description = "Tenancy ID")
    ),
    responses(
        (status = 200, description = "Ledger entries, oldest first", body = Vec<LedgerEntryResponse>)
    ),
    tag = "Tenants"
)]
pub async fn get_ledger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LedgerEntryResponse>>, (StatusCode, String)> {
    let entries = state
        .rent_service
        .ledger(id)
        .await
        .map_err(error_response)?;

    Ok(Json(
        entries.into_iter().map(LedgerEntryResponse::from).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tenants", post(create_tenancy).get(list_tenancies))
        .route("/tenants/:id", get(get_tenancy))
        .route("/tenants/:id/claim", post(claim_tenancy))
        .route("/tenants/:id/rent", put(change_rent))
        .route("/tenants/:id/ledger", get(get_ledger))
}
