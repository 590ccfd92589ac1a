//! Status enums shared across entities.
//!
//! Every enum maps to a text column; the `as_str`/`parse` pairs keep the
//! database representation in one place.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a payment transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "verified" => Self::Verified,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// Lifecycle of a landlord payout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// Receipt PDF generation flag. Guards retried jobs against
/// double-generating the artifact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PdfStatus {
    Pending,
    Generating,
    Ready,
    Failed,
}

impl PdfStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Generating => "generating",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "generating" => Self::Generating,
            "ready" => Self::Ready,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// Identity (BVN/NIN) and bank-account verification state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "verified" => Self::Verified,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// Viewing request state on a conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewingStatus {
    Pending,
    Approved,
    Declined,
    Cancelled,
}

impl ViewingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "approved" => Self::Approved,
            "declined" => Self::Declined,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

/// Rent ledger event kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    RentCreated,
    RentRenewed,
    RentAmountChanged,
    RentExpired,
}

impl LedgerEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RentCreated => "rent_created",
            Self::RentRenewed => "rent_renewed",
            Self::RentAmountChanged => "rent_amount_changed",
            Self::RentExpired => "rent_expired",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "rent_renewed" => Self::RentRenewed,
            "rent_amount_changed" => Self::RentAmountChanged,
            "rent_expired" => Self::RentExpired,
            _ => Self::RentCreated,
        }
    }
}
