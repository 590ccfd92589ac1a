//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{
    Conversation, ConversationMessage, DomainError, ViewingHistoryEntry, ViewingStatus,
};
use haven::ports::ConversationRepository;

pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ConversationRow {
    id: Uuid,
    listing_id: Uuid,
    tenant_id: Uuid,
    landlord_id: Uuid,
    viewing_status: String,
    viewing_date: Option<DateTime<Utc>>,
    viewing_set_by: Option<Uuid>,
    last_activity_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<ConversationRow> for Conversation {
    fn from(row: ConversationRow) -> Self {
        Self {
            id: row.id,
            listing_id: row.listing_id,
            tenant_id: row.tenant_id,
            landlord_id: row.landlord_id,
            viewing_status: ViewingStatus::parse(&row.viewing_status),
            viewing_date: row.viewing_date,
            viewing_set_by: row.viewing_set_by,
            last_activity_at: row.last_activity_at,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    conversation_id: Uuid,
    sender_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for ConversationMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            conversation_id: row.conversation_id,
            sender_id: row.sender_id,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    id: Uuid,
    conversation_id: Uuid,
    old_status: String,
    new_status: String,
    changed_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<HistoryRow> for ViewingHistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            id: row.id,
            conversation_id: row.conversation_id,
            old_status: ViewingStatus::parse(&row.old_status),
            new_status: ViewingStatus::parse(&row.new_status),
            changed_by: row.changed_by,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    async fn find_by_id(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, DomainError> {
        let row =
            sqlx::query_as::<_, ConversationRow>("SELECT * FROM conversations WHERE id = $1")
                .bind(conversation_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Conversation>, DomainError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT * FROM conversations
            WHERE tenant_id = $1 OR landlord_id = $1
            ORDER BY last_activity_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save(&self, conversation: &Conversation) -> Result<Conversation, DomainError> {
        let row = sqlx::query_as::<_, ConversationRow>(
            r#"
            INSERT INTO conversations (
                id, listing_id, tenant_id, landlord_id, viewing_status,
                viewing_date, viewing_set_by, last_activity_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                viewing_status = EXCLUDED.viewing_status,
                viewing_date = EXCLUDED.viewing_date,
                viewing_set_by = EXCLUDED.viewing_set_by,
                last_activity_at = EXCLUDED.last_activity_at
            RETURNING *
            "#,
        )
        .bind(conversation.id)
        .bind(conversation.listing_id)
        .bind(conversation.tenant_id)
        .bind(conversation.landlord_id)
        .bind(conversation.viewing_status.as_str())
        .bind(conversation.viewing_date)
        .bind(conversation.viewing_set_by)
        .bind(conversation.last_activity_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn save_message(
        &self,
        message: &ConversationMessage,
    ) -> Result<ConversationMessage, DomainError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO conversation_messages (id, conversation_id, sender_id, body)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(message.id)
        .bind(message.conversation_id)
        .bind(message.sender_id)
        .bind(&message.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        // A new message counts as activity for the stale sweep.
        sqlx::query("UPDATE conversations SET last_activity_at = NOW() WHERE id = $1")
            .bind(message.conversation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn list_messages(
        &self,
        conversation_id: Uuid,
    ) -> Result<Vec<ConversationMessage>, DomainError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT * FROM conversation_messages
            WHERE conversation_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_viewing(
        &self,
        conversation_id: Uuid,
        status: ViewingStatus,
        viewing_date: Option<DateTime<Utc>>,
        set_by: Option<Uuid>,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE conversations
            SET viewing_status = $2, viewing_date = $3, viewing_set_by = $4,
                last_activity_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(conversation_id)
        .bind(status.as_str())
        .bind(viewing_date)
        .bind(set_by)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn find_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Conversation>, DomainError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT * FROM conversations
            WHERE viewing_status = 'pending' AND last_activity_at < $1
            ORDER BY last_activity_at
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn log_viewing_change(
        &self,
        entry: &ViewingHistoryEntry,
    ) -> Result<ViewingHistoryEntry, DomainError> {
        let row = sqlx::query_as::<_, HistoryRow>(
            r#"
            INSERT INTO viewing_history (id, conversation_id, old_status, new_status, changed_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(entry.conversation_id)
        .bind(entry.old_status.as_str())
        .bind(entry.new_status.as_str())
        .bind(entry.changed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }
}
