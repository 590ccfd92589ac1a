//! Payment Repository Port
//!
//! Covers the payment aggregate: transactions and landlord payouts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{LandlordPayout, PaymentTransaction};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{PaymentProvider, PaymentStatus, PayoutStatus};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, payment_id: Uuid)
        -> Result<Option<PaymentTransaction>, DomainError>;

    /// Webhook lookups key on the gateway reference.
    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<PaymentTransaction>, DomainError>;

    async fn save(&self, payment: &PaymentTransaction)
        -> Result<PaymentTransaction, DomainError>;

    async fn set_reference(&self, payment_id: Uuid, reference: &str) -> Result<(), DomainError>;

    async fn update_status_provider(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
        provider: PaymentProvider,
    ) -> Result<(), DomainError>;

    // --- Payouts ---

    async fn find_payout_by_payment(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<LandlordPayout>, DomainError>;

    /// Insert the unique payout row for a payment, or return the existing
    /// one when a retried job races a previous attempt.
    async fn create_or_get_payout(
        &self,
        payout: &LandlordPayout,
    ) -> Result<LandlordPayout, DomainError>;

    async fn update_payout_status(
        &self,
        payout_id: Uuid,
        status: PayoutStatus,
    ) -> Result<(), DomainError>;

    async fn set_payout_reference(
        &self,
        payout_id: Uuid,
        provider_reference: &str,
    ) -> Result<(), DomainError>;
}
