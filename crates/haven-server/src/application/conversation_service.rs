//! Conversation Application Service
//!
//! Tenant/landlord message threads and the viewing request lifecycle.
//! Every viewing-status transition lands in viewing_history, including the
//! system transitions made by the stale sweep.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{
    Conversation, ConversationMessage, DomainError, ViewingHistoryEntry, ViewingStatus,
};
use haven::ports::{ConversationRepository, PropertyRepository};

pub struct ConversationService<C, P>
where
    C: ConversationRepository,
    P: PropertyRepository,
{
    conversations: Arc<C>,
    properties: Arc<P>,
}

impl<C, P> ConversationService<C, P>
where
    C: ConversationRepository,
    P: PropertyRepository,
{
    pub fn new(conversations: Arc<C>, properties: Arc<P>) -> Self {
        Self {
            conversations,
            properties,
        }
    }

    /// Open a thread about a published listing.
    pub async fn start(
        &self,
        listing_id: Uuid,
        tenant_user_id: Uuid,
    ) -> Result<Conversation, DomainError> {
        let listing = self
            .properties
            .find_listing(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("RentalListing", listing_id))?;
        if !listing.published {
            return Err(DomainError::Validation(
                "listing is not published".into(),
            ));
        }
        if listing.landlord_id == tenant_user_id {
            return Err(DomainError::Validation(
                "landlords cannot open a conversation on their own listing".into(),
            ));
        }

        let conversation = Conversation::new(listing_id, tenant_user_id, listing.landlord_id);
        self.conversations.save(&conversation).await
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Conversation>, DomainError> {
        self.conversations.list_for_user(user_id).await
    }

    pub async fn post_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        body: String,
    ) -> Result<ConversationMessage, DomainError> {
        if body.trim().is_empty() {
            return Err(DomainError::Validation("message body is empty".into()));
        }
        let conversation = self.get(conversation_id).await?;
        if sender_id != conversation.tenant_id && sender_id != conversation.landlord_id {
            return Err(DomainError::Unauthorized(
                "sender is not part of this conversation".into(),
            ));
        }

        self.conversations
            .save_message(&ConversationMessage::new(conversation_id, sender_id, body))
            .await
    }

    pub async fn list_messages(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ConversationMessage>, DomainError> {
        let conversation = self.get(conversation_id).await?;
        if user_id != conversation.tenant_id && user_id != conversation.landlord_id {
            return Err(DomainError::Unauthorized(
                "user is not part of this conversation".into(),
            ));
        }
        self.conversations.list_messages(conversation_id).await
    }

    /// Landlords approve or decline a pending viewing; tenants may cancel
    /// their own request.
    pub async fn set_viewing(
        &self,
        conversation_id: Uuid,
        actor_id: Uuid,
        status: ViewingStatus,
        viewing_date: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        let conversation = self.get(conversation_id).await?;

        match status {
            ViewingStatus::Approved | ViewingStatus::Declined => {
                if actor_id != conversation.landlord_id {
                    return Err(DomainError::Unauthorized(
                        "only the landlord can decide a viewing request".into(),
                    ));
                }
            }
            ViewingStatus::Cancelled => {
                if actor_id != conversation.tenant_id {
                    return Err(DomainError::Unauthorized(
                        "only the tenant can cancel a viewing request".into(),
                    ));
                }
            }
            ViewingStatus::Pending => {
                return Err(DomainError::Validation(
                    "cannot transition a viewing back to pending".into(),
                ));
            }
        }

        if conversation.viewing_status != ViewingStatus::Pending {
            return Err(DomainError::Conflict(format!(
                "viewing already {}",
                conversation.viewing_status.as_str()
            )));
        }
        if status == ViewingStatus::Approved && viewing_date.is_none() {
            return Err(DomainError::Validation(
                "an approved viewing needs a date".into(),
            ));
        }

        self.conversations
            .set_viewing(conversation_id, status, viewing_date, Some(actor_id))
            .await?;
        self.conversations
            .log_viewing_change(&ViewingHistoryEntry::new(
                conversation_id,
                conversation.viewing_status,
                status,
                Some(actor_id),
            ))
            .await?;
        Ok(())
    }

    /// Scheduled sweep: decline viewing requests idle past `max_idle`.
    /// Returns how many were expired.
    pub async fn expire_stale(&self, max_idle: Duration) -> Result<usize, DomainError> {
        let cutoff = Utc::now() - max_idle;
        let stale = self.conversations.find_stale_pending(cutoff).await?;
        let count = stale.len();

        for conversation in stale {
            self.conversations
                .set_viewing(conversation.id, ViewingStatus::Declined, None, None)
                .await?;
            self.conversations
                .log_viewing_change(&ViewingHistoryEntry::new(
                    conversation.id,
                    conversation.viewing_status,
                    ViewingStatus::Declined,
                    None,
                ))
                .await?;
        }

        if count > 0 {
            tracing::info!(count, "Expired stale viewing requests");
        }
        Ok(count)
    }

    async fn get(&self, conversation_id: Uuid) -> Result<Conversation, DomainError> {
        self.conversations
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Conversation", conversation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::*;
    use haven::domain::{RentCycle, RentalListing};

    struct Fixture {
        conversations: Arc<FakeConversationRepository>,
        service: ConversationService<FakeConversationRepository, FakePropertyRepository>,
        listing_id: Uuid,
        landlord_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let conversations = Arc::new(FakeConversationRepository::default());
        let properties = Arc::new(FakePropertyRepository::default());
        let landlord_id = Uuid::new_v4();

        let mut listing = RentalListing::new(
            Uuid::new_v4(),
            landlord_id,
            "2-bed flat, Yaba".into(),
            90_000_00,
            RentCycle::Yearly,
        );
        listing.published = true;
        let listing_id = listing.id;
        properties.save_listing(&listing).await.unwrap();

        let service = ConversationService::new(conversations.clone(), properties);
        Fixture {
            conversations,
            service,
            listing_id,
            landlord_id,
        }
    }

    #[tokio::test]
    async fn landlord_decides_viewing_and_history_is_logged() {
        let f = fixture().await;
        let tenant_id = Uuid::new_v4();
        let convo = f.service.start(f.listing_id, tenant_id).await.unwrap();

        let date = Utc::now() + Duration::days(2);
        f.service
            .set_viewing(convo.id, f.landlord_id, ViewingStatus::Approved, Some(date))
            .await
            .unwrap();

        let saved = f
            .conversations
            .find_by_id(convo.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.viewing_status, ViewingStatus::Approved);
        assert_eq!(saved.viewing_set_by, Some(f.landlord_id));

        let history = f.conversations.history_rows();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].new_status, ViewingStatus::Approved);
    }

    #[tokio::test]
    async fn tenant_cannot_approve_own_request() {
        let f = fixture().await;
        let tenant_id = Uuid::new_v4();
        let convo = f.service.start(f.listing_id, tenant_id).await.unwrap();

        let err = f
            .service
            .set_viewing(convo.id, tenant_id, ViewingStatus::Approved, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn decided_viewing_cannot_be_redecided() {
        let f = fixture().await;
        let tenant_id = Uuid::new_v4();
        let convo = f.service.start(f.listing_id, tenant_id).await.unwrap();

        f.service
            .set_viewing(convo.id, f.landlord_id, ViewingStatus::Declined, None)
            .await
            .unwrap();
        let err = f
            .service
            .set_viewing(
                convo.id,
                f.landlord_id,
                ViewingStatus::Approved,
                Some(Utc::now()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn outsiders_cannot_post() {
        let f = fixture().await;
        let convo = f.service.start(f.listing_id, Uuid::new_v4()).await.unwrap();

        let err = f
            .service
            .post_message(convo.id, Uuid::new_v4(), "hello".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn sweep_declines_only_stale_pending_threads() {
        let f = fixture().await;
        let fresh = f.service.start(f.listing_id, Uuid::new_v4()).await.unwrap();

        let mut stale = f.service.start(f.listing_id, Uuid::new_v4()).await.unwrap();
        stale.last_activity_at = Utc::now() - Duration::days(10);
        f.conversations.save(&stale).await.unwrap();

        let mut decided = f.service.start(f.listing_id, Uuid::new_v4()).await.unwrap();
        decided.last_activity_at = Utc::now() - Duration::days(10);
        decided.viewing_status = ViewingStatus::Approved;
        f.conversations.save(&decided).await.unwrap();

        let expired = f.service.expire_stale(Duration::days(7)).await.unwrap();
        assert_eq!(expired, 1);

        let stale_after = f
            .conversations
            .find_by_id(stale.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stale_after.viewing_status, ViewingStatus::Declined);
        assert_eq!(stale_after.viewing_set_by, None, "system transition");

        let fresh_after = f
            .conversations
            .find_by_id(fresh.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh_after.viewing_status, ViewingStatus::Pending);

        let history = f.conversations.history_rows();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].conversation_id, stale.id);
    }
}
