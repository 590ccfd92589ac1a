//! Domain Layer
//!
//! Pure business entities and logic. No IO in this module tree.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
