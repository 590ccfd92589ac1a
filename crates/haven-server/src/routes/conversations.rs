//! Conversation Routes - Threads and Viewing Requests

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    ConversationResponse, MessageResponse, PostMessageRequest, SetViewingRequest,
    StartConversationRequest,
};
use crate::routes::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

/// Open a conversation about a published listing
#[utoipa::path(
    post,
    path = "/conversations",
    request_body = StartConversationRequest,
    responses(
        (status = 200, description = "Conversation opened", body = ConversationResponse),
        (status = 400, description = "Listing unpublished or caller owns it"),
        (status = 404, description = "Listing not found")
    ),
    tag = "Conversations"
)]
pub async fn start_conversation(
    State(state): State<AppState>,
    Json(payload): Json<StartConversationRequest>,
) -> Result<Json<ConversationResponse>, (StatusCode, String)> {
    let conversation = state
        .conversation_service
        .start(payload.listing_id, payload.tenant_user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(conversation.into()))
}

/// List the caller's conversations
#[utoipa::path(
    get,
    path = "/conversations",
    params(
        ("user_id" = Uuid, Query, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Conversations", body = Vec<ConversationResponse>)
    ),
    tag = "Conversations"
)]
pub async fn list_conversations(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<ConversationResponse>>, (StatusCode, String)> {
    let conversations = state
        .conversation_service
        .list_for_user(query.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(
        conversations
            .into_iter()
            .map(ConversationResponse::from)
            .collect(),
    ))
}

/// Post a message
#[utoipa::path(
    post,
    path = "/conversations/{id}/messages",
    params(
        ("id" = Uuid, Path, description = "Conversation ID")
    ),
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Message posted", body = MessageResponse),
        (status = 403, description = "Sender is not a participant")
    ),
    tag = "Conversations"
)]
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostMessageRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let message = state
        .conversation_service
        .post_message(id, payload.sender_id, payload.body)
        .await
        .map_err(error_response)?;

    Ok(Json(message.into()))
}

/// List messages
#[utoipa::path(
    get,
    path = "/conversations/{id}/messages",
    params(
        ("id" = Uuid, Path, description = "Conversation ID"),
        ("user_id" = Uuid, Query, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Messages, oldest first", body = Vec<MessageResponse>),
        (status = 403, description = "Caller is not a participant")
    ),
    tag = "Conversations"
)]
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<MessageResponse>>, (StatusCode, String)> {
    let messages = state
        .conversation_service
        .list_messages(id, query.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

/// Approve, decline, or cancel the viewing request
#[utoipa::path(
    put,
    path = "/conversations/{id}/viewing",
    params(
        ("id" = Uuid, Path, description = "Conversation ID")
    ),
    request_body = SetViewingRequest,
    responses(
        (status = 200, description = "Viewing updated"),
        (status = 400, description = "Approved without a date, or target is pending"),
        (status = 403, description = "Actor may not make this transition"),
        (status = 409, description = "Viewing already decided")
    ),
    tag = "Conversations"
)]
pub async fn set_viewing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetViewingRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state
        .conversation_service
        .set_viewing(id, payload.actor_id, payload.status, payload.viewing_date)
        .await
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/conversations",
            post(start_conversation).get(list_conversations),
        )
        .route(
            "/conversations/:id/messages",
            post(post_message).get(list_messages),
        )
        .route("/conversations/:id/viewing", put(set_viewing))
}
