//! Tenant and rent ledger entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{LedgerEvent, RentCycle};

/// A tenancy on a property. `matched_user_id` links the tenancy record a
/// landlord created to the platform account that claimed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub property_id: Uuid,
    pub landlord_id: Uuid,
    pub matched_user_id: Option<Uuid>,
    pub rent_amount_kobo: i64,
    pub rent_cycle: RentCycle,
    pub rent_start_date: NaiveDate,
    pub rent_expiry_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(
        property_id: Uuid,
        landlord_id: Uuid,
        rent_amount_kobo: i64,
        rent_cycle: RentCycle,
        rent_start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_id,
            landlord_id,
            matched_user_id: None,
            rent_amount_kobo,
            rent_cycle,
            rent_start_date,
            rent_expiry_date: rent_cycle.expiry_from(rent_start_date),
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Roll the tenancy forward one cycle: the old expiry becomes the new
    /// start. Returns (old_expiry, new_expiry) for the ledger entry.
    pub fn renew(&mut self) -> (NaiveDate, NaiveDate) {
        let old_expiry = self.rent_expiry_date;
        self.rent_start_date = old_expiry;
        self.rent_expiry_date = self.rent_cycle.expiry_from(old_expiry);
        self.updated_at = Utc::now();
        (old_expiry, self.rent_expiry_date)
    }
}

/// Append-only rent history event with before/after snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentLedgerEntry {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub event: LedgerEvent,
    pub old_value: serde_json::Value,
    pub new_value: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl RentLedgerEntry {
    pub fn new(
        tenant_id: Uuid,
        event: LedgerEvent,
        old_value: serde_json::Value,
        new_value: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            event,
            old_value,
            new_value,
            created_at: Utc::now(),
        }
    }
}
