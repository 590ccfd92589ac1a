//! User/Profile Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{User, UserProfile};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{IdentityProvider, PaymentProvider, VerificationStatus};

/// Persistence interface for users and their profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DomainError>;

    async fn find_profile(&self, profile_id: Uuid) -> Result<Option<UserProfile>, DomainError>;

    async fn find_profile_by_user(&self, user_id: Uuid)
        -> Result<Option<UserProfile>, DomainError>;

    async fn save_profile(&self, profile: &UserProfile) -> Result<UserProfile, DomainError>;

    /// Record a resolved account name and verification outcome for one
    /// gateway.
    async fn set_account_resolution(
        &self,
        profile_id: Uuid,
        provider: PaymentProvider,
        account_name: Option<String>,
        status: VerificationStatus,
    ) -> Result<(), DomainError>;

    async fn set_recipient_code(
        &self,
        profile_id: Uuid,
        recipient_code: String,
    ) -> Result<(), DomainError>;

    async fn mark_bvn_verified(
        &self,
        profile_id: Uuid,
        provider: IdentityProvider,
    ) -> Result<(), DomainError>;

    async fn mark_bvn_failed(&self, profile_id: Uuid, reason: String) -> Result<(), DomainError>;

    async fn mark_nin_verified(
        &self,
        profile_id: Uuid,
        provider: IdentityProvider,
    ) -> Result<(), DomainError>;

    async fn mark_nin_failed(&self, profile_id: Uuid, reason: String) -> Result<(), DomainError>;
}
