//! Domain layer: category entities and hierarchy logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod category;
pub mod error;
pub mod layout;

pub use arena::{Forest, TreeNode};
pub use builder::build_forest;
pub use category::{Category, ParentRef};
pub use error::{DomainError, DomainResult};
pub use layout::{layout, Edge, Layout, LayoutOptions, PositionedNode};
