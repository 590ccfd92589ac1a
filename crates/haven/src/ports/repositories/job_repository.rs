//! Job Repository Port
//!
//! Queue storage for background jobs. Delivery is at-least-once: a claimed
//! job that never reports back is re-claimed after its visibility window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::Job;
use crate::domain::errors::DomainError;

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Enqueue a job. Returns false when a live job with the same dedup
    /// key already exists (the insert is skipped).
    async fn enqueue(&self, job: &Job) -> Result<bool, DomainError>;

    /// Claim up to `limit` due jobs, marking them Running and bumping
    /// their attempt count. Claims must not hand the same job to two
    /// workers.
    async fn claim_due(&self, limit: i64) -> Result<Vec<Job>, DomainError>;

    async fn mark_succeeded(&self, job_id: Uuid) -> Result<(), DomainError>;

    /// Transient failure: record the error and schedule the next attempt.
    async fn reschedule(
        &self,
        job_id: Uuid,
        run_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), DomainError>;

    /// Terminal failure or exhausted retries.
    async fn mark_dead(&self, job_id: Uuid, error: &str) -> Result<(), DomainError>;
}
