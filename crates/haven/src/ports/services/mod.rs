//! Service Ports
//!
//! Abstract interfaces over third-party providers.

pub mod document_store;
pub mod identity_verifier;
pub mod notifier;
pub mod payment_gateway;

pub use document_store::{DocumentStore, StoredDocument};
pub use identity_verifier::{IdentityVerifier, VerifiedIdentity};
pub use notifier::{Notifier, RentPaidNotice};
pub use payment_gateway::{
    GatewayBank, InitializedPayment, PaymentGateway, PaymentVerification, PayoutDestination,
    ResolvedAccount, TransferReceipt,
};
