//! Bank directory entity.
//!
//! One row per bank, joined across gateways on the canonical name so a
//! single account record can resolve to either provider's code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub id: Uuid,
    pub name: String,
    pub canonical_name: String,
    pub paystack_code: Option<String>,
    pub flutterwave_code: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Bank {
    pub fn new(name: String, paystack_code: Option<String>, flutterwave_code: Option<String>) -> Self {
        let canonical_name = canonical_bank_name(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            canonical_name,
            paystack_code,
            flutterwave_code,
            updated_at: Utc::now(),
        }
    }
}

/// Normalize a bank name for cross-gateway joining: lowercase, collapse
/// whitespace, strip punctuation and corporate suffixes.
pub fn canonical_bank_name(raw: &str) -> String {
    const SUFFIXES: &[&str] = &["plc", "ltd", "limited", "bank", "nigeria", "ng"];

    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| !SUFFIXES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}
