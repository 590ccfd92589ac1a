//! User roles.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Tenant,
    Landlord,
    Lawyer,
    Caretaker,
    Agent,
    Seller,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::Landlord => "landlord",
            Self::Lawyer => "lawyer",
            Self::Caretaker => "caretaker",
            Self::Agent => "agent",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "landlord" => Self::Landlord,
            "lawyer" => Self::Lawyer,
            "caretaker" => Self::Caretaker,
            "agent" => Self::Agent,
            "seller" => Self::Seller,
            "admin" => Self::Admin,
            _ => Self::Tenant,
        }
    }
}
