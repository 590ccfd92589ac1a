//! Background job entity.
//!
//! Jobs are queued rows delivered at-least-once; handlers are idempotent
//! and transient failures reschedule with exponential backoff until
//! `max_attempts` is exhausted.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The set of named background jobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Transfer a verified payment to the landlord.
    PayoutLandlord,
    /// Generate and upload the receipt PDF.
    GenerateReceipt,
    /// Create a Paystack transfer recipient for a profile.
    EnsureRecipientCode,
    /// BVN verification against a KYC provider.
    VerifyBvn,
    /// NIN verification against a KYC provider.
    VerifyNin,
    /// Hash a freshly uploaded property image and drop duplicates.
    HashPropertyImage,
    /// Refresh the bank directory from both gateways.
    SyncBanks,
    /// Rent-paid notifications to tenant and landlord.
    NotifyRentPaid,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayoutLandlord => "payout.landlord",
            Self::GenerateReceipt => "receipt.generate",
            Self::EnsureRecipientCode => "recipient.ensure",
            Self::VerifyBvn => "identity.verify_bvn",
            Self::VerifyNin => "identity.verify_nin",
            Self::HashPropertyImage => "image.hash",
            Self::SyncBanks => "banks.sync",
            Self::NotifyRentPaid => "notify.rent_paid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "payout.landlord" => Some(Self::PayoutLandlord),
            "receipt.generate" => Some(Self::GenerateReceipt),
            "recipient.ensure" => Some(Self::EnsureRecipientCode),
            "identity.verify_bvn" => Some(Self::VerifyBvn),
            "identity.verify_nin" => Some(Self::VerifyNin),
            "image.hash" => Some(Self::HashPropertyImage),
            "banks.sync" => Some(Self::SyncBanks),
            "notify.rent_paid" => Some(Self::NotifyRentPaid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
    /// Exhausted retries or terminal error; requires manual attention.
    Dead,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Dead => "dead",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "running" => Self::Running,
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            "dead" => Self::Dead,
            _ => Self::Queued,
        }
    }
}

/// Retry schedule for transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: i32,
    pub base_delay_secs: i64,
    pub max_delay_secs: i64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_secs: 10,
            max_delay_secs: 600,
        }
    }
}

impl RetryPolicy {
    /// Delay before the given retry (1-based), doubling and capped.
    pub fn delay_for(&self, attempt: i32) -> Duration {
        let exp = attempt.saturating_sub(1).min(30) as u32;
        let secs = self
            .base_delay_secs
            .saturating_mul(1i64 << exp)
            .min(self.max_delay_secs);
        Duration::seconds(secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub kind: JobKind,
    pub args: serde_json::Value,
    /// Optional key deduplicating live (queued/running) jobs.
    pub dedup_key: Option<String>,
    pub status: JobStatus,
    pub attempts: i32,
    pub max_attempts: i32,
    pub run_at: DateTime<Utc>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(kind: JobKind, args: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind,
            args,
            dedup_key: None,
            status: JobStatus::Queued,
            attempts: 0,
            max_attempts: RetryPolicy::default().max_attempts,
            run_at: now,
            last_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_dedup_key(mut self, key: String) -> Self {
        self.dedup_key = Some(key);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: i32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Whether a failed attempt should be rescheduled.
    pub fn can_retry(&self) -> bool {
        self.attempts < self.max_attempts
    }
}
