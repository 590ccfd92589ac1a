//! Outbound adapters: persistence, gateways, KYC, media, notifications.

pub mod media;
pub mod notify;
pub mod pdf;
pub mod postgres;
pub mod providers;
pub mod signature;

pub use media::MediaStore;
pub use notify::HttpNotifier;
