//! Profile Routes - KYC and Payout Account
//!
//! Identity verification is asynchronous: the POST validates and queues,
//! the caller polls the profile for bvn/nin status.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::application::IdentityKind;
use crate::models::{
    IdentityNumberKind, ProfileResponse, ResolveAccountRequest, ResolvedAccountResponse,
    UpdatePhotoRequest, VerifyIdentityRequest,
};
use crate::routes::error_response;
use crate::AppState;

/// Get a user with their profile
#[utoipa::path(
    get,
    path = "/profiles/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 404, description = "User not found")
    ),
    tag = "Profiles"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let pair = state
        .profile_service
        .get(user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(pair.into()))
}

/// Request BVN or NIN verification
#[utoipa::path(
    post,
    path = "/profiles/{user_id}/identity",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = VerifyIdentityRequest,
    responses(
        (status = 202, description = "Verification queued"),
        (status = 400, description = "Number is not 11 digits"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Identity is already verified")
    ),
    tag = "Profiles"
)]
pub async fn verify_identity(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<VerifyIdentityRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    let kind = match payload.kind {
        IdentityNumberKind::Bvn => IdentityKind::Bvn,
        IdentityNumberKind::Nin => IdentityKind::Nin,
    };

    state
        .verification_service
        .request(user_id, kind, &payload.number, payload.provider)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "queued" })),
    ))
}

/// Resolve and store the payout bank account
#[utoipa::path(
    post,
    path = "/profiles/{user_id}/account",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = ResolveAccountRequest,
    responses(
        (status = 200, description = "Account resolved", body = ResolvedAccountResponse),
        (status = 400, description = "Gateway rejected the account"),
        (status = 502, description = "Gateway unreachable")
    ),
    tag = "Profiles"
)]
pub async fn resolve_account(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ResolveAccountRequest>,
) -> Result<Json<ResolvedAccountResponse>, (StatusCode, String)> {
    let resolved = state
        .bank_service
        .resolve_account(user_id, &payload.account_number, &payload.bank_code)
        .await
        .map_err(error_response)?;

    Ok(Json(ResolvedAccountResponse {
        account_number: resolved.account_number,
        account_name: resolved.account_name,
    }))
}

/// Swap the profile photo
#[utoipa::path(
    put,
    path = "/profiles/{user_id}/photo",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdatePhotoRequest,
    responses(
        (status = 200, description = "Photo updated", body = ProfileResponse),
        (status = 404, description = "User not found")
    ),
    tag = "Profiles"
)]
pub async fn update_photo(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdatePhotoRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    state
        .profile_service
        .update_photo(user_id, payload.url, payload.storage_public_id)
        .await
        .map_err(error_response)?;

    let pair = state
        .profile_service
        .get(user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(pair.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles/:user_id", get(get_profile))
        .route("/profiles/:user_id/identity", post(verify_identity))
        .route("/profiles/:user_id/account", post(resolve_account))
        .route("/profiles/:user_id/photo", put(update_photo))
}
