//! Tenancy Application Service
//!
//! Landlord-side tenancy management and the rent ledger. Renewal on
//! payment happens in the payout flow; this service covers creating and
//! claiming tenancies and the explicit amount change, each with its
//! ledger entry.

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{DomainError, LedgerEvent, RentCycle, RentLedgerEntry, Tenant};
use haven::ports::TenantRepository;

pub struct RentService<T: TenantRepository> {
    tenants: Arc<T>,
}

impl<T: TenantRepository> RentService<T> {
    pub fn new(tenants: Arc<T>) -> Self {
        Self { tenants }
    }

    pub async fn create_tenancy(
        &self,
        property_id: Uuid,
        landlord_id: Uuid,
        rent_amount_kobo: i64,
        rent_cycle: RentCycle,
        rent_start_date: NaiveDate,
    ) -> Result<Tenant, DomainError> {
        if rent_amount_kobo <= 0 {
            return Err(DomainError::Validation(
                "rent amount must be positive".into(),
            ));
        }

        let tenant = self
            .tenants
            .save(&Tenant::new(
                property_id,
                landlord_id,
                rent_amount_kobo,
                rent_cycle,
                rent_start_date,
            ))
            .await?;

        self.tenants
            .append_ledger(&RentLedgerEntry::new(
                tenant.id,
                LedgerEvent::RentCreated,
                serde_json::json!({}),
                serde_json::json!({
                    "amount_kobo": tenant.rent_amount_kobo,
                    "cycle": tenant.rent_cycle,
                    "start": tenant.rent_start_date,
                    "expiry": tenant.rent_expiry_date,
                }),
            ))
            .await?;

        Ok(tenant)
    }

    /// A platform user claims the tenancy record their landlord created.
    pub async fn claim(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Tenant, DomainError> {
        let mut tenant = self.get(tenant_id).await?;
        match tenant.matched_user_id {
            Some(existing) if existing != user_id => Err(DomainError::Conflict(
                "tenancy is already claimed by another user".into(),
            )),
            _ => {
                tenant.matched_user_id = Some(user_id);
                self.tenants.save(&tenant).await
            }
        }
    }

    pub async fn change_amount(
        &self,
        tenant_id: Uuid,
        landlord_id: Uuid,
        new_amount_kobo: i64,
    ) -> Result<Tenant, DomainError> {
        if new_amount_kobo <= 0 {
            return Err(DomainError::Validation(
                "rent amount must be positive".into(),
            ));
        }
        let mut tenant = self.get(tenant_id).await?;
        if tenant.landlord_id != landlord_id {
            return Err(DomainError::Unauthorized(
                "only the landlord can change the rent".into(),
            ));
        }

        let old_amount = tenant.rent_amount_kobo;
        tenant.rent_amount_kobo = new_amount_kobo;
        let saved = self.tenants.save(&tenant).await?;

        self.tenants
            .append_ledger(&RentLedgerEntry::new(
                saved.id,
                LedgerEvent::RentAmountChanged,
                serde_json::json!({ "amount_kobo": old_amount }),
                serde_json::json!({ "amount_kobo": new_amount_kobo }),
            ))
            .await?;

        Ok(saved)
    }

    pub async fn get(&self, tenant_id: Uuid) -> Result<Tenant, DomainError> {
        self.tenants
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tenant", tenant_id))
    }

    pub async fn list_by_landlord(&self, landlord_id: Uuid) -> Result<Vec<Tenant>, DomainError> {
        self.tenants.list_by_landlord(landlord_id).await
    }

    pub async fn ledger(&self, tenant_id: Uuid) -> Result<Vec<RentLedgerEntry>, DomainError> {
        self.tenants.ledger_for_tenant(tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::*;

    fn service() -> (Arc<FakeTenantRepository>, RentService<FakeTenantRepository>) {
        let repo = Arc::new(FakeTenantRepository::default());
        (repo.clone(), RentService::new(repo))
    }

    #[tokio::test]
    async fn creation_writes_the_opening_ledger_entry() {
        let (repo, svc) = service();
        let tenant = svc
            .create_tenancy(
                Uuid::new_v4(),
                Uuid::new_v4(),
                60_000_00,
                RentCycle::Monthly,
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            tenant.rent_expiry_date,
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            "day clamped to the shorter month"
        );
        let ledger = repo.ledger_entries();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].event, LedgerEvent::RentCreated);
    }

    #[tokio::test]
    async fn claiming_is_exclusive() {
        let (_, svc) = service();
        let tenant = svc
            .create_tenancy(
                Uuid::new_v4(),
                Uuid::new_v4(),
                60_000_00,
                RentCycle::Yearly,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )
            .await
            .unwrap();

        let first = Uuid::new_v4();
        svc.claim(tenant.id, first).await.unwrap();
        // Re-claiming by the same user is fine.
        svc.claim(tenant.id, first).await.unwrap();

        let err = svc.claim(tenant.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn amount_change_records_before_and_after() {
        let (repo, svc) = service();
        let landlord_id = Uuid::new_v4();
        let tenant = svc
            .create_tenancy(
                Uuid::new_v4(),
                landlord_id,
                60_000_00,
                RentCycle::Yearly,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )
            .await
            .unwrap();

        svc.change_amount(tenant.id, landlord_id, 75_000_00)
            .await
            .unwrap();

        let entries = repo.ledger_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].event, LedgerEvent::RentAmountChanged);
        assert_eq!(entries[1].old_value["amount_kobo"], 60_000_00);
        assert_eq!(entries[1].new_value["amount_kobo"], 75_000_00);

        let err = svc
            .change_amount(tenant.id, Uuid::new_v4(), 80_000_00)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
