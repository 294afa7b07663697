//! Infrastructure layer: persistence implementations and DI container
//!
//! This layer implements the persistence boundary trait and wires up
//! services.

pub mod di;
pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
