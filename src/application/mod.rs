//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on the persistence
//! boundary trait.

pub mod catalog;
pub mod error;
pub mod error_ext;
pub mod reparent;
pub mod store;

pub use catalog::CatalogService;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use reparent::{plan_move, MoveOutcome, ParentChange, ReparentService};
pub use store::CategoryStore;
