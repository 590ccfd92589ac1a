//! Conversation and viewing request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use haven::domain::{Conversation, ConversationMessage, ViewingStatus};

/// Open a conversation about a published listing
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartConversationRequest {
    pub listing_id: Uuid,
    pub tenant_user_id: Uuid,
}

/// Post a message into a conversation
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostMessageRequest {
    pub sender_id: Uuid,
    pub body: String,
}

/// Decide, cancel, or schedule a viewing request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetViewingRequest {
    pub actor_id: Uuid,
    pub status: ViewingStatus,
    pub viewing_date: Option<DateTime<Utc>>,
}

/// Conversation response
#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub viewing_status: ViewingStatus,
    pub viewing_date: Option<DateTime<Utc>>,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id,
            listing_id: conversation.listing_id,
            tenant_id: conversation.tenant_id,
            landlord_id: conversation.landlord_id,
            viewing_status: conversation.viewing_status,
            viewing_date: conversation.viewing_date,
            last_activity_at: conversation.last_activity_at,
            created_at: conversation.created_at,
        }
    }
}

/// Message response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<ConversationMessage> for MessageResponse {
    fn from(message: ConversationMessage) -> Self {
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            sender_id: message.sender_id,
            body: message.body,
            created_at: message.created_at,
        }
    }
}
