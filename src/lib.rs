//! catree: catalog category hierarchy management.
//!
//! Converts the flat category list of a retail catalog into a rooted forest,
//! computes a deterministic tree layout for visualization, and validates and
//! executes reparenting (move) operations with client-side cycle rejection.
//!
//! Layering follows dependency direction: `domain` (pure hierarchy model) ←
//! `application` (services over the persistence boundary) ← `infrastructure`
//! (repository implementations, DI) ← `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
