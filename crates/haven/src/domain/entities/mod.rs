//! Domain Entities

pub mod bank;
pub mod conversation;
pub mod idempotency;
pub mod job;
pub mod payment;
pub mod property;
pub mod receipt;
pub mod tenant;
pub mod user;

pub use bank::{canonical_bank_name, Bank};
pub use conversation::{Conversation, ConversationMessage, ViewingHistoryEntry};
pub use idempotency::IdempotencyRecord;
pub use job::{Job, JobKind, JobStatus, RetryPolicy};
pub use payment::{LandlordPayout, PaymentTransaction};
pub use property::{Property, PropertyImage, PropertyType, RentalListing};
pub use receipt::RentReceipt;
pub use tenant::{RentLedgerEntry, Tenant};
pub use user::{User, UserProfile};
