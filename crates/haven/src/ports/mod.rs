//! Ports
//!
//! Abstract interfaces (traits) between the domain and infrastructure.

pub mod repositories;
pub mod services;

pub use repositories::*;
pub use services::*;
