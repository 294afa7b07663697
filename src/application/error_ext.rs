//! Error conversion helpers for repository calls

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` from the persistence boundary
/// to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add action context to a persistence I/O error.
    ///
    /// # Example
    /// ```ignore
    /// repo.update(&record)
    ///     .with_repo_context("update category parent")?;
    /// ```
    fn with_repo_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_repo_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Persistence {
            context: action.to_string(),
            source: Box::new(e),
        })
    }
}
