//! Tenancy and rent ledger DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use haven::domain::{LedgerEvent, RentCycle, RentLedgerEntry, Tenant};

/// Create tenancy request (landlord side)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTenancyRequest {
    pub property_id: Uuid,
    pub landlord_id: Uuid,
    pub rent_amount_kobo: i64,
    pub rent_cycle: RentCycle,
    pub rent_start_date: NaiveDate,
}

/// Claim a tenancy record as a platform user
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClaimTenancyRequest {
    pub user_id: Uuid,
}

/// Change the rent amount
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeRentRequest {
    pub landlord_id: Uuid,
    pub new_amount_kobo: i64,
}

/// Tenancy response
#[derive(Debug, Serialize, ToSchema)]
pub struct TenantResponse {
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
}

impl From<Tenant> for TenantResponse {
    fn from(tenant: Tenant) -> Self {
        Self {
            id: tenant.id,
            property_id: tenant.property_id,
            landlord_id: tenant.landlord_id,
            matched_user_id: tenant.matched_user_id,
            rent_amount_kobo: tenant.rent_amount_kobo,
            rent_cycle: tenant.rent_cycle,
            rent_start_date: tenant.rent_start_date,
            rent_expiry_date: tenant.rent_expiry_date,
            is_active: tenant.is_active,
            created_at: tenant.created_at,
        }
    }
}

/// Rent ledger entry response
#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerEntryResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub event: LedgerEvent,
    pub old_value: serde_json::Value,
    pub new_value: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<RentLedgerEntry> for LedgerEntryResponse {
    fn from(entry: RentLedgerEntry) -> Self {
        Self {
            id: entry.id,
            tenant_id: entry.tenant_id,
            event: entry.event,
            old_value: entry.old_value,
            new_value: entry.new_value,
            created_at: entry.created_at,
        }
    }
}
