//! Third-party provider clients.

pub mod flutterwave;
pub mod paystack;
pub mod prembly;
pub mod qoreid;
pub mod youverify;

pub use flutterwave::FlutterwaveClient;
pub use paystack::PaystackClient;
pub use prembly::PremblyClient;
pub use qoreid::QoreIdClient;
pub use youverify::YouVerifyClient;
