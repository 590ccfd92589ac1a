//! PostgreSQL implementation of ReceiptRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{DomainError, PdfStatus, RentReceipt};
use haven::ports::ReceiptRepository;

use super::payment_repository::is_unique_violation;

pub struct PgReceiptRepository {
    pool: PgPool,
}

impl PgReceiptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReceiptRow {
    id: Uuid,
    payment_id: Uuid,
    tenant_id: Uuid,
    landlord_id: Uuid,
    amount_kobo: i64,
    currency: String,
    pdf_status: String,
    barcode_reference: Option<String>,
    storage_public_id: Option<String>,
    pdf_url: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReceiptRow> for RentReceipt {
    fn from(row: ReceiptRow) -> Self {
        Self {
            id: row.id,
            payment_id: row.payment_id,
            tenant_id: row.tenant_id,
            landlord_id: row.landlord_id,
            amount_kobo: row.amount_kobo,
            currency: row.currency,
            pdf_status: PdfStatus::parse(&row.pdf_status),
            barcode_reference: row.barcode_reference,
            storage_public_id: row.storage_public_id,
            pdf_url: row.pdf_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ReceiptRepository for PgReceiptRepository {
    async fn find_by_id(&self, receipt_id: Uuid) -> Result<Option<RentReceipt>, DomainError> {
        let row = sqlx::query_as::<_, ReceiptRow>("SELECT * FROM rent_receipts WHERE id = $1")
            .bind(receipt_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_payment(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<RentReceipt>, DomainError> {
        let row =
            sqlx::query_as::<_, ReceiptRow>("SELECT * FROM rent_receipts WHERE payment_id = $1")
                .bind(payment_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<RentReceipt>, DomainError> {
        let rows = sqlx::query_as::<_, ReceiptRow>(
            "SELECT * FROM rent_receipts WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_or_get(&self, receipt: &RentReceipt) -> Result<RentReceipt, DomainError> {
        let inserted = sqlx::query_as::<_, ReceiptRow>(
            r#"
            INSERT INTO rent_receipts (
                id, payment_id, tenant_id, landlord_id, amount_kobo, currency,
                pdf_status, barcode_reference, storage_public_id, pdf_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(receipt.id)
        .bind(receipt.payment_id)
        .bind(receipt.tenant_id)
        .bind(receipt.landlord_id)
        .bind(receipt.amount_kobo)
        .bind(&receipt.currency)
        .bind(receipt.pdf_status.as_str())
        .bind(&receipt.barcode_reference)
        .bind(&receipt.storage_public_id)
        .bind(&receipt.pdf_url)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation(&e) => self
                .find_by_payment(receipt.payment_id)
                .await?
                .ok_or_else(|| {
                    DomainError::Repository("receipt vanished after unique conflict".into())
                }),
            Err(e) => Err(DomainError::Repository(e.to_string())),
        }
    }

    async fn set_pdf_status(
        &self,
        receipt_id: Uuid,
        status: PdfStatus,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE rent_receipts SET pdf_status = $2, updated_at = NOW() WHERE id = $1")
            .bind(receipt_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn set_barcode_reference(
        &self,
        receipt_id: Uuid,
        barcode_reference: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE rent_receipts
            SET barcode_reference = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(receipt_id)
        .bind(barcode_reference)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn store_artifact(
        &self,
        receipt_id: Uuid,
        storage_public_id: &str,
        pdf_url: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE rent_receipts
            SET storage_public_id = $2, pdf_url = $3, pdf_status = 'ready', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(receipt_id)
        .bind(storage_public_id)
        .bind(pdf_url)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
