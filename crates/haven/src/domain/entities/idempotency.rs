//! Idempotency record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored response for a client-supplied idempotency key.
///
/// The (key, user_id) pair is unique in the database; concurrent duplicate
/// submissions race on the insert and the loser re-reads the winner's row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdempotencyRecord {
    pub id: Uuid,
    pub key: String,
    pub user_id: Uuid,
    pub endpoint: String,
    /// None while the first execution is still in flight.
    pub response: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl IdempotencyRecord {
    pub fn new(key: String, user_id: Uuid, endpoint: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            user_id,
            endpoint,
            response: None,
            created_at: Utc::now(),
        }
    }
}
