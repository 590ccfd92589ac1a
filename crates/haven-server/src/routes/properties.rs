//! Property Routes - Properties, Images, Rental Listings

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    AddImageRequest, CreateListingRequest, CreatePropertyRequest, ListingResponse,
    PropertyImageResponse, PropertyResponse, PublishListingRequest,
};
use crate::routes::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    pub actor_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create a property
#[utoipa::path(
    post,
    path = "/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 200, description = "Property created", body = PropertyResponse),
        (status = 400, description = "Missing address")
    ),
    tag = "Properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<Json<PropertyResponse>, (StatusCode, String)> {
    let property = state
        .property_service
        .create(
            payload.owner_id,
            payload.address,
            payload.state,
            payload.lga,
            payload.property_type,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(property.into()))
}

/// List properties by owner
#[utoipa::path(
    get,
    path = "/properties",
    params(
        ("owner_id" = Uuid, Query, description = "Owner user ID")
    ),
    responses(
        (status = 200, description = "Owner's properties", body = Vec<PropertyResponse>)
    ),
    tag = "Properties"
)]
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<PropertyResponse>>, (StatusCode, String)> {
    let properties = state
        .property_service
        .list_by_owner(query.owner_id)
        .await
        .map_err(error_response)?;

    Ok(Json(
        properties.into_iter().map(PropertyResponse::from).collect(),
    ))
}

/// Get a property
#[utoipa::path(
    get,
    path = "/properties/{id}",
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Property found", body = PropertyResponse),
        (status = 404, description = "Property not found")
    ),
    tag = "Properties"
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PropertyResponse>, (StatusCode, String)> {
    let property = state
        .property_service
        .get(id)
        .await
        .map_err(error_response)?;

    Ok(Json(property.into()))
}

/// Delete a property
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    params(
        ("id" = Uuid, Path, description = "Property ID"),
        ("actor_id" = Uuid, Query, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Property deleted"),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Property not found")
    ),
    tag = "Properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state
        .property_service
        .delete(id, query.actor_id)
        .await
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Property deleted"
    })))
}

/// Register an uploaded image and queue dedup hashing
#[utoipa::path(
    post,
    path = "/properties/{id}/images",
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    request_body = AddImageRequest,
    responses(
        (status = 200, description = "Image recorded", body = PropertyImageResponse),
        (status = 403, description = "Caller is not the owner")
    ),
    tag = "Properties"
)]
pub async fn add_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddImageRequest>,
) -> Result<Json<PropertyImageResponse>, (StatusCode, String)> {
    let image = state
        .property_service
        .add_image(id, payload.uploaded_by, payload.url, payload.storage_public_id)
        .await
        .map_err(error_response)?;

    Ok(Json(image.into()))
}

/// Create a rental listing for a property
#[utoipa::path(
    post,
    path = "/properties/{id}/listings",
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    request_body = CreateListingRequest,
    responses(
        (status = 200, description = "Listing created (unpublished)", body = ListingResponse),
        (status = 403, description = "Caller is not the owner")
    ),
    tag = "Listings"
)]
pub async fn create_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateListingRequest>,
) -> Result<Json<ListingResponse>, (StatusCode, String)> {
    let listing = state
        .property_service
        .create_listing(
            id,
            payload.landlord_id,
            payload.title,
            payload.rent_amount_kobo,
            payload.rent_cycle,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(listing.into()))
}

/// Publish or unpublish a listing
#[utoipa::path(
    put,
    path = "/listings/{id}/publish",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    request_body = PublishListingRequest,
    responses(
        (status = 200, description = "Listing updated", body = ListingResponse),
        (status = 403, description = "Caller is not the landlord"),
        (status = 404, description = "Listing not found")
    ),
    tag = "Listings"
)]
pub async fn publish_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PublishListingRequest>,
) -> Result<Json<ListingResponse>, (StatusCode, String)> {
    let listing = state
        .property_service
        .set_listing_published(id, payload.landlord_id, payload.published)
        .await
        .map_err(error_response)?;

    Ok(Json(listing.into()))
}

/// Browse published listings
#[utoipa::path(
    get,
    path = "/listings",
    params(
        ("limit" = Option<i64>, Query, description = "Page size (default 50)"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Published listings", body = Vec<ListingResponse>)
    ),
    tag = "Listings"
)]
pub async fn list_published(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<ListingResponse>>, (StatusCode, String)> {
    let listings = state
        .property_service
        .list_published(query.limit.unwrap_or(50), query.offset.unwrap_or(0))
        .await
        .map_err(error_response)?;

    Ok(Json(
        listings.into_iter().map(ListingResponse::from).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/properties", post(create_property).get(list_properties))
        .route(
            "/properties/:id",
            get(get_property).delete(delete_property),
        )
        .route("/properties/:id/images", post(add_image))
        .route("/properties/:id/listings", post(create_listing))
        .route("/listings", get(list_published))
        .route("/listings/:id/publish", put(publish_listing))
}
