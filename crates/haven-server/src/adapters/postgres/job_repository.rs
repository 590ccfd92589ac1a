//! PostgreSQL implementation of JobRepository
//!
//! Claims use `FOR UPDATE SKIP LOCKED` so concurrent workers never pick
//! up the same row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use haven::domain::{DomainError, Job, JobKind, JobStatus};
use haven::ports::JobRepository;

use super::payment_repository::is_unique_violation;

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    kind: String,
    args: serde_json::Value,
    dedup_key: Option<String>,
    status: String,
    attempts: i32,
    max_attempts: i32,
    run_at: DateTime<Utc>,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = DomainError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let kind = JobKind::parse(&row.kind)
            .ok_or_else(|| DomainError::Repository(format!("unknown job kind: {}", row.kind)))?;
        Ok(Self {
            id: row.id,
            kind,
            args: row.args,
            dedup_key: row.dedup_key,
            status: JobStatus::parse(&row.status),
            attempts: row.attempts,
            max_attempts: row.max_attempts,
            run_at: row.run_at,
            last_error: row.last_error,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn enqueue(&self, job: &Job) -> Result<bool, DomainError> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO jobs (id, kind, args, dedup_key, status, attempts, max_attempts, run_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(job.id)
        .bind(job.kind.as_str())
        .bind(&job.args)
        .bind(&job.dedup_key)
        .bind(job.status.as_str())
        .bind(job.attempts)
        .bind(job.max_attempts)
        .bind(job.run_at)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => Ok(true),
            // A live job with the same dedup key is already in the queue.
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(DomainError::Repository(e.to_string())),
        }
    }

    async fn claim_due(&self, limit: i64) -> Result<Vec<Job>, DomainError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET status = 'running', attempts = attempts + 1, updated_at = NOW()
            WHERE id IN (
                SELECT id FROM jobs
                WHERE status = 'queued' AND run_at <= NOW()
                ORDER BY run_at
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING *
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(Job::try_from).collect()
    }

    async fn mark_succeeded(&self, job_id: Uuid) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'succeeded', last_error = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn reschedule(
        &self,
        job_id: Uuid,
        run_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'queued', run_at = $2, last_error = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(run_at)
        .bind(error)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn mark_dead(&self, job_id: Uuid, error: &str) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'dead', last_error = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(error)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
