//! Conversation Repository Port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Conversation, ConversationMessage, ViewingHistoryEntry};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::ViewingStatus;

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn find_by_id(&self, conversation_id: Uuid)
        -> Result<Option<Conversation>, DomainError>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Conversation>, DomainError>;

    async fn save(&self, conversation: &Conversation) -> Result<Conversation, DomainError>;

    async fn save_message(
        &self,
        message: &ConversationMessage,
    ) -> Result<ConversationMessage, DomainError>;

    async fn list_messages(
        &self,
        conversation_id: Uuid,
    ) -> Result<Vec<ConversationMessage>, DomainError>;

    async fn set_viewing(
        &self,
        conversation_id: Uuid,
        status: ViewingStatus,
        viewing_date: Option<DateTime<Utc>>,
        set_by: Option<Uuid>,
    ) -> Result<(), DomainError>;

    /// Conversations still Pending with no activity since the cutoff.
    async fn find_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Conversation>, DomainError>;

    async fn log_viewing_change(
        &self,
        entry: &ViewingHistoryEntry,
    ) -> Result<ViewingHistoryEntry, DomainError>;
}
