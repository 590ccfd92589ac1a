//! PostgreSQL implementation of PaymentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{
    DomainError, LandlordPayout, PaymentProvider, PaymentStatus, PaymentTransaction, PayoutStatus,
};
use haven::ports::PaymentRepository;

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    tenant_id: Uuid,
    landlord_id: Uuid,
    property_id: Uuid,
    provider: String,
    provider_reference: Option<String>,
    amount_kobo: i64,
    currency: String,
    status: String,
    tenant_email: String,
    tenant_phone: Option<String>,
    tenant_name: String,
    landlord_email: String,
    landlord_phone: Option<String>,
    landlord_name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PaymentRow> for PaymentTransaction {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            tenant_id: row.tenant_id,
            landlord_id: row.landlord_id,
            property_id: row.property_id,
            provider: PaymentProvider::parse(&row.provider),
            provider_reference: row.provider_reference,
            amount_kobo: row.amount_kobo,
            currency: row.currency,
            status: PaymentStatus::parse(&row.status),
            tenant_email: row.tenant_email,
            tenant_phone: row.tenant_phone,
            tenant_name: row.tenant_name,
            landlord_email: row.landlord_email,
            landlord_phone: row.landlord_phone,
            landlord_name: row.landlord_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PayoutRow {
    id: Uuid,
    payment_id: Uuid,
    landlord_id: Uuid,
    amount_kobo: i64,
    status: String,
    provider_reference: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PayoutRow> for LandlordPayout {
    fn from(row: PayoutRow) -> Self {
        Self {
            id: row.id,
            payment_id: row.payment_id,
            landlord_id: row.landlord_id,
            amount_kobo: row.amount_kobo,
            status: PayoutStatus::parse(&row.status),
            provider_reference: row.provider_reference,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn find_by_id(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<PaymentTransaction>, DomainError> {
        let row =
            sqlx::query_as::<_, PaymentRow>("SELECT * FROM payment_transactions WHERE id = $1")
                .bind(payment_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<PaymentTransaction>, DomainError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "SELECT * FROM payment_transactions WHERE provider_reference = $1",
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn save(
        &self,
        payment: &PaymentTransaction,
    ) -> Result<PaymentTransaction, DomainError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO payment_transactions (
                id, tenant_id, landlord_id, property_id, provider, provider_reference,
                amount_kobo, currency, status, tenant_email, tenant_phone, tenant_name,
                landlord_email, landlord_phone, landlord_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                provider = EXCLUDED.provider,
                provider_reference = EXCLUDED.provider_reference,
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(payment.id)
        .bind(payment.tenant_id)
        .bind(payment.landlord_id)
        .bind(payment.property_id)
        .bind(payment.provider.as_str())
        .bind(&payment.provider_reference)
        .bind(payment.amount_kobo)
        .bind(&payment.currency)
        .bind(payment.status.as_str())
        .bind(&payment.tenant_email)
        .bind(&payment.tenant_phone)
        .bind(&payment.tenant_name)
        .bind(&payment.landlord_email)
        .bind(&payment.landlord_phone)
        .bind(&payment.landlord_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn set_reference(&self, payment_id: Uuid, reference: &str) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE payment_transactions
            SET provider_reference = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(payment_id)
        .bind(reference)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn update_status_provider(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
        provider: PaymentProvider,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE payment_transactions
            SET status = $2, provider = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(payment_id)
        .bind(status.as_str())
        .bind(provider.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn find_payout_by_payment(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<LandlordPayout>, DomainError> {
        let row = sqlx::query_as::<_, PayoutRow>(
            "SELECT * FROM landlord_payouts WHERE payment_id = $1",
        )
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn create_or_get_payout(
        &self,
        payout: &LandlordPayout,
    ) -> Result<LandlordPayout, DomainError> {
        let inserted = sqlx::query_as::<_, PayoutRow>(
            r#"
            INSERT INTO landlord_payouts (id, payment_id, landlord_id, amount_kobo, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payout.id)
        .bind(payout.payment_id)
        .bind(payout.landlord_id)
        .bind(payout.amount_kobo)
        .bind(payout.status.as_str())
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row.into()),
            // A racing attempt already inserted the unique row for this
            // payment; return the winner.
            Err(e) if is_unique_violation(&e) => self
                .find_payout_by_payment(payout.payment_id)
                .await?
                .ok_or_else(|| {
                    DomainError::Repository("payout vanished after unique conflict".into())
                }),
            Err(e) => Err(DomainError::Repository(e.to_string())),
        }
    }

    async fn update_payout_status(
        &self,
        payout_id: Uuid,
        status: PayoutStatus,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE landlord_payouts SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(payout_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn set_payout_reference(
        &self,
        payout_id: Uuid,
        provider_reference: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE landlord_payouts
            SET provider_reference = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(payout_id)
        .bind(provider_reference)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}
