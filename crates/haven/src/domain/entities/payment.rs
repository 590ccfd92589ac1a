//! Payment transaction and landlord payout entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{PaymentProvider, PaymentStatus, PayoutStatus};

/// A rent payment moving through a gateway.
///
/// Contact fields are denormalized at creation so notification jobs never
/// need to join back through users after the tenancy changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub property_id: Uuid,
    pub provider: PaymentProvider,
    /// Gateway transaction reference. Unique; webhook lookups key on it.
    pub provider_reference: Option<String>,
    pub amount_kobo: i64,
    pub currency: String,
    pub status: PaymentStatus,

    pub tenant_email: String,
    pub tenant_phone: Option<String>,
    pub tenant_name: String,
    pub landlord_email: String,
    pub landlord_phone: Option<String>,
    pub landlord_name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[allow(clippy::too_many_arguments)]
impl PaymentTransaction {
    pub fn new(
        tenant_id: Uuid,
        landlord_id: Uuid,
        property_id: Uuid,
        amount_kobo: i64,
        currency: String,
        tenant_email: String,
        tenant_name: String,
        landlord_email: String,
        landlord_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            landlord_id,
            property_id,
            provider: PaymentProvider::NoneYet,
            provider_reference: None,
            amount_kobo,
            currency,
            status: PaymentStatus::Pending,
            tenant_email,
            tenant_phone: None,
            tenant_name,
            landlord_email,
            landlord_phone: None,
            landlord_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reference used when initializing a gateway charge.
    pub fn new_reference(&self) -> String {
        format!(
            "PMT-{}-{}",
            self.id.simple(),
            &Uuid::new_v4().simple().to_string()[..12]
        )
    }
}

/// Transfer of collected rent to the landlord. At most one per payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandlordPayout {
    pub id: Uuid,
    pub payment_id: Uuid,
    pub landlord_id: Uuid,
    pub amount_kobo: i64,
    pub status: PayoutStatus,
    pub provider_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LandlordPayout {
    pub fn new(payment_id: Uuid, landlord_id: Uuid, amount_kobo: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            payment_id,
            landlord_id,
            amount_kobo,
            status: PayoutStatus::Pending,
            provider_reference: None,
            created_at: now,
            updated_at: now,
        }
    }
}
