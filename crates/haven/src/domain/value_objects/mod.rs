//! Value Objects
//!
//! Immutable value types shared across entities.

pub mod provider;
pub mod rent_cycle;
pub mod role;
pub mod status;

pub use provider::{IdentityProvider, PaymentProvider};
pub use rent_cycle::RentCycle;
pub use role::UserRole;
pub use status::{
    LedgerEvent, PaymentStatus, PayoutStatus, PdfStatus, VerificationStatus, ViewingStatus,
};
