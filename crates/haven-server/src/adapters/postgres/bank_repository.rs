//! PostgreSQL implementation of BankRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{Bank, DomainError};
use haven::ports::BankRepository;

pub struct PgBankRepository {
    pool: PgPool,
}

impl PgBankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BankRow {
    id: Uuid,
    name: String,
    canonical_name: String,
    paystack_code: Option<String>,
    flutterwave_code: Option<String>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BankRow> for Bank {
    fn from(row: BankRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            canonical_name: row.canonical_name,
            paystack_code: row.paystack_code,
            flutterwave_code: row.flutterwave_code,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl BankRepository for PgBankRepository {
    async fn upsert(&self, bank: &Bank) -> Result<Bank, DomainError> {
        // COALESCE keeps a code learned from one gateway when the other
        // gateway's sync pass does not carry it.
        let row = sqlx::query_as::<_, BankRow>(
            r#"
            INSERT INTO banks (id, name, canonical_name, paystack_code, flutterwave_code)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (canonical_name) DO UPDATE SET
                name = EXCLUDED.name,
                paystack_code = COALESCE(EXCLUDED.paystack_code, banks.paystack_code),
                flutterwave_code = COALESCE(EXCLUDED.flutterwave_code, banks.flutterwave_code),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(bank.id)
        .bind(&bank.name)
        .bind(&bank.canonical_name)
        .bind(&bank.paystack_code)
        .bind(&bank.flutterwave_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_canonical(
        &self,
        canonical_name: &str,
    ) -> Result<Option<Bank>, DomainError> {
        let row = sqlx::query_as::<_, BankRow>("SELECT * FROM banks WHERE canonical_name = $1")
            .bind(canonical_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Bank>, DomainError> {
        let rows = sqlx::query_as::<_, BankRow>(
            "SELECT * FROM banks ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM banks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(count)
    }
}
