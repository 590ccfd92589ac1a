//! Application Services (Use Cases)
//!
//! Orchestration over the domain: each service is generic over its
//! repository ports and holds `Arc`'d gateway/provider traits.

pub mod bank_service;
pub mod conversation_service;
pub mod notification_service;
pub mod payment_service;
pub mod payout_service;
pub mod profile_service;
pub mod property_service;
pub mod receipt_service;
pub mod rent_service;
pub mod verification_service;

#[cfg(test)]
pub(crate) mod fakes;

pub use bank_service::BankService;
pub use conversation_service::ConversationService;
pub use notification_service::NotificationService;
pub use payment_service::{PaymentInitiation, PaymentService, WebhookOutcome};
pub use payout_service::{PayoutOutcome, PayoutService, RecipientOutcome};
pub use profile_service::ProfileService;
pub use property_service::{ImageHashOutcome, PropertyService};
pub use receipt_service::{ReceiptOutcome, ReceiptService};
pub use rent_service::RentService;
pub use verification_service::{IdentityKind, VerificationOutcome, VerificationService};
