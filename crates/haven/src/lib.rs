//! Haven Domain Library
//!
//! Core domain types and interfaces for the Haven estate platform.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Users, properties, tenancies, payments, receipts,
//!     conversations, banks, idempotency records, background jobs
//!   - `value_objects/`: Immutable value types (providers, statuses, cycles)
//!   - `errors`: Domain error type with transient/terminal classification
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: Payment gateway, KYC, storage, notification interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use haven::domain::{PaymentTransaction, RentReceipt, Tenant};
//! use haven::ports::{PaymentGateway, PaymentRepository};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    canonical_bank_name, Bank, Conversation, ConversationMessage, DomainError, IdempotencyRecord,
    IdentityProvider, Job, JobKind, JobStatus, LandlordPayout, LedgerEvent, PaymentProvider,
    PaymentStatus, PaymentTransaction, PayoutStatus, PdfStatus, Property, PropertyImage,
    PropertyType, RentCycle, RentLedgerEntry, RentReceipt, RentalListing, RetryPolicy, Tenant,
    User, UserProfile, UserRole, VerificationStatus, ViewingHistoryEntry, ViewingStatus,
};
pub use ports::{
    // Repositories
    BankRepository,
    ConversationRepository,
    // Services
    DocumentStore,
    GatewayBank,
    IdempotencyRepository,
    IdentityVerifier,
    InitializedPayment,
    JobRepository,
    Notifier,
    PaymentGateway,
    PaymentRepository,
    PaymentVerification,
    PayoutDestination,
    ProfileRepository,
    PropertyRepository,
    ReceiptRepository,
    RentPaidNotice,
    ResolvedAccount,
    StoredDocument,
    TenantRepository,
    TransferReceipt,
    VerifiedIdentity,
};
