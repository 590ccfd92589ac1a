//! Tenant Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{RentLedgerEntry, Tenant};
use crate::domain::errors::DomainError;

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, DomainError>;

    /// The tenancy claimed by a platform user, if any.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Tenant>, DomainError>;

    async fn list_by_landlord(&self, landlord_id: Uuid) -> Result<Vec<Tenant>, DomainError>;

    async fn save(&self, tenant: &Tenant) -> Result<Tenant, DomainError>;

    async fn set_active(&self, tenant_id: Uuid, is_active: bool) -> Result<(), DomainError>;

    async fn append_ledger(&self, entry: &RentLedgerEntry) -> Result<RentLedgerEntry, DomainError>;

    async fn ledger_for_tenant(&self, tenant_id: Uuid)
        -> Result<Vec<RentLedgerEntry>, DomainError>;
}
