//! Provider identifiers for payments and identity verification.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payment gateway a transaction or payout runs through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProvider {
    Paystack,
    Flutterwave,
    /// Recorded before a gateway has been chosen or after a failed charge.
    NoneYet,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paystack => "paystack",
            Self::Flutterwave => "flutterwave",
            Self::NoneYet => "none_yet",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "paystack" => Self::Paystack,
            "flutterwave" => Self::Flutterwave,
            _ => Self::NoneYet,
        }
    }
}

/// KYC provider used for BVN/NIN checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentityProvider {
    Prembly,
    QoreId,
    YouVerify,
    NoneYet,
}

impl IdentityProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prembly => "prembly",
            Self::QoreId => "qore_id",
            Self::YouVerify => "you_verify",
            Self::NoneYet => "none_yet",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "prembly" => Self::Prembly,
            "qore_id" => Self::QoreId,
            "you_verify" => Self::YouVerify,
            _ => Self::NoneYet,
        }
    }
}
