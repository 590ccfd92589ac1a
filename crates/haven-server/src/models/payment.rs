//! Payment and payout DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use haven::domain::{
    LandlordPayout, PaymentProvider, PaymentStatus, PaymentTransaction, PayoutStatus,
};

/// Initiate a rent payment for the caller's tenancy
#[derive(Debug, Deserialize, ToSchema)]
pub struct InitiatePaymentRequest {
    pub user_id: Uuid,
    pub provider: PaymentProvider,
}

/// Payment transaction response
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub property_id: Uuid,
    pub provider: PaymentProvider,
    pub provider_reference: Option<String>,
    pub amount_kobo: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentTransaction> for PaymentResponse {
    fn from(payment: PaymentTransaction) -> Self {
        Self {
            id: payment.id,
            tenant_id: payment.tenant_id,
            landlord_id: payment.landlord_id,
            property_id: payment.property_id,
            provider: payment.provider,
            provider_reference: payment.provider_reference,
            amount_kobo: payment.amount_kobo,
            currency: payment.currency,
            status: payment.status,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

/// Landlord payout response
#[derive(Debug, Serialize, ToSchema)]
pub struct PayoutResponse {
    pub id: Uuid,
    pub payment_id: Uuid,
    pub landlord_id: Uuid,
    pub amount_kobo: i64,
    pub status: PayoutStatus,
    pub provider_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LandlordPayout> for PayoutResponse {
    fn from(payout: LandlordPayout) -> Self {
        Self {
            id: payout.id,
            payment_id: payout.payment_id,
            landlord_id: payout.landlord_id,
            amount_kobo: payout.amount_kobo,
            status: payout.status,
            provider_reference: payout.provider_reference,
            created_at: payout.created_at,
        }
    }
}
