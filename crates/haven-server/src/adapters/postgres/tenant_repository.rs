//! PostgreSQL implementation of TenantRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{DomainError, LedgerEvent, RentCycle, RentLedgerEntry, Tenant};
use haven::ports::TenantRepository;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TenantRow {
    id: Uuid,
    property_id: Uuid,
    landlord_id: Uuid,
    matched_user_id: Option<Uuid>,
    rent_amount_kobo: i64,
    rent_cycle: String,
    rent_start_date: chrono::NaiveDate,
    rent_expiry_date: chrono::NaiveDate,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Self {
            id: row.id,
            property_id: row.property_id,
            landlord_id: row.landlord_id,
            matched_user_id: row.matched_user_id,
            rent_amount_kobo: row.rent_amount_kobo,
            rent_cycle: RentCycle::parse(&row.rent_cycle),
            rent_start_date: row.rent_start_date,
            rent_expiry_date: row.rent_expiry_date,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LedgerRow {
    id: Uuid,
    tenant_id: Uuid,
    event: String,
    old_value: serde_json::Value,
    new_value: serde_json::Value,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<LedgerRow> for RentLedgerEntry {
    fn from(row: LedgerRow) -> Self {
        Self {
            id: row.id,
            tenant_id: row.tenant_id,
            event: LedgerEvent::parse(&row.event),
            old_value: row.old_value,
            new_value: row.new_value,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, DomainError> {
        let row = sqlx::query_as::<_, TenantRow>("SELECT * FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Tenant>, DomainError> {
        let row = sqlx::query_as::<_, TenantRow>(
            "SELECT * FROM tenants WHERE matched_user_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_by_landlord(&self, landlord_id: Uuid) -> Result<Vec<Tenant>, DomainError> {
        let rows = sqlx::query_as::<_, TenantRow>(
            "SELECT * FROM tenants WHERE landlord_id = $1 ORDER BY created_at DESC",
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        let row = sqlx::query_as::<_, TenantRow>(
            r#"
            INSERT INTO tenants (
                id, property_id, landlord_id, matched_user_id, rent_amount_kobo,
                rent_cycle, rent_start_date, rent_expiry_date, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                matched_user_id = EXCLUDED.matched_user_id,
                rent_amount_kobo = EXCLUDED.rent_amount_kobo,
                rent_cycle = EXCLUDED.rent_cycle,
                rent_start_date = EXCLUDED.rent_start_date,
                rent_expiry_date = EXCLUDED.rent_expiry_date,
                is_active = EXCLUDED.is_active,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(tenant.id)
        .bind(tenant.property_id)
        .bind(tenant.landlord_id)
        .bind(tenant.matched_user_id)
        .bind(tenant.rent_amount_kobo)
        .bind(tenant.rent_cycle.as_str())
        .bind(tenant.rent_start_date)
        .bind(tenant.rent_expiry_date)
        .bind(tenant.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn set_active(&self, tenant_id: Uuid, is_active: bool) -> Result<(), DomainError> {
        sqlx::query("UPDATE tenants SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(tenant_id)
            .bind(is_active)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn append_ledger(
        &self,
        entry: &RentLedgerEntry,
    ) -> Result<RentLedgerEntry, DomainError> {
        let row = sqlx::query_as::<_, LedgerRow>(
            r#"
            INSERT INTO rent_ledger (id, tenant_id, event, old_value, new_value)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(entry.tenant_id)
        .bind(entry.event.as_str())
        .bind(&entry.old_value)
        .bind(&entry.new_value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn ledger_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<RentLedgerEntry>, DomainError> {
        let rows = sqlx::query_as::<_, LedgerRow>(
            "SELECT * FROM rent_ledger WHERE tenant_id = $1 ORDER BY created_at",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
