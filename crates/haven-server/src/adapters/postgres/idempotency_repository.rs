//! PostgreSQL implementation of IdempotencyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{DomainError, IdempotencyRecord};
use haven::ports::IdempotencyRepository;

use super::payment_repository::is_unique_violation;

pub struct PgIdempotencyRepository {
    pool: PgPool,
}

impl PgIdempotencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdempotencyRow {
    id: Uuid,
    key: String,
    user_id: Uuid,
    endpoint: String,
    response: Option<serde_json::Value>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<IdempotencyRow> for IdempotencyRecord {
    fn from(row: IdempotencyRow) -> Self {
        Self {
            id: row.id,
            key: row.key,
            user_id: row.user_id,
            endpoint: row.endpoint,
            response: row.response,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl IdempotencyRepository for PgIdempotencyRepository {
    async fn create_or_get(
        &self,
        record: &IdempotencyRecord,
    ) -> Result<(IdempotencyRecord, bool), DomainError> {
        let inserted = sqlx::query_as::<_, IdempotencyRow>(
            r#"
            INSERT INTO idempotency_keys (id, key, user_id, endpoint, response)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(&record.key)
        .bind(record.user_id)
        .bind(&record.endpoint)
        .bind(&record.response)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok((row.into(), true)),
            Err(e) if is_unique_violation(&e) => {
                let existing = self.find(&record.key, record.user_id).await?.ok_or_else(
                    || DomainError::Repository("idempotency row vanished after conflict".into()),
                )?;
                Ok((existing, false))
            }
            Err(e) => Err(DomainError::Repository(e.to_string())),
        }
    }

    async fn find(
        &self,
        key: &str,
        user_id: Uuid,
    ) -> Result<Option<IdempotencyRecord>, DomainError> {
        let row = sqlx::query_as::<_, IdempotencyRow>(
            "SELECT * FROM idempotency_keys WHERE key = $1 AND user_id = $2",
        )
        .bind(key)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn store_response(
        &self,
        key: &str,
        user_id: Uuid,
        response: &serde_json::Value,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE idempotency_keys SET response = $3 WHERE key = $1 AND user_id = $2",
        )
        .bind(key)
        .bind(user_id)
        .bind(response)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str, user_id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM idempotency_keys WHERE key = $1 AND user_id = $2")
            .bind(key)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
