//! Tenant/landlord conversation and viewing history entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ViewingStatus;

/// A message thread between a prospective tenant and a landlord about a
/// listing, carrying the viewing request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub viewing_status: ViewingStatus,
    pub viewing_date: Option<DateTime<Utc>>,
    /// Who last changed the viewing status; None for system transitions
    /// such as the stale sweep.
    pub viewing_set_by: Option<Uuid>,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(listing_id: Uuid, tenant_id: Uuid, landlord_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            listing_id,
            tenant_id,
            landlord_id,
            viewing_status: ViewingStatus::Pending,
            viewing_date: None,
            viewing_set_by: None,
            last_activity_at: now,
            created_at: now,
        }
    }

    /// Whether the stale sweep should decline this conversation.
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.viewing_status == ViewingStatus::Pending && self.last_activity_at < cutoff
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(conversation_id: Uuid, sender_id: Uuid, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            body,
            created_at: Utc::now(),
        }
    }
}

/// One row per viewing-status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewingHistoryEntry {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub old_status: ViewingStatus,
    pub new_status: ViewingStatus,
    pub changed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ViewingHistoryEntry {
    pub fn new(
        conversation_id: Uuid,
        old_status: ViewingStatus,
        new_status: ViewingStatus,
        changed_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            old_status,
            new_status,
            changed_by,
            created_at: Utc::now(),
        }
    }
}
