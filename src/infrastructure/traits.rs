//! Persistence boundary for testability
//!
//! The repository trait abstracts the external category-persistence
//! collaborator, allowing services to be tested with in-memory
//! implementations.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::Category;

/// External category persistence abstraction.
///
/// The core is transport-agnostic: implementations may be a REST client, a
/// database, or a local file. Errors are surfaced as `io::Error` and wrapped
/// with context at the application layer.
pub trait CategoryRepository: Send + Sync {
    /// Fetch the complete flat category list.
    fn list(&self) -> io::Result<Vec<Category>>;

    /// Persist a single category record (full record, parent field already
    /// replaced by the caller).
    fn update(&self, category: &Category) -> io::Result<()>;

    /// Replace the whole stored list (seeding, imports).
    fn save_all(&self, categories: &[Category]) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Category repository backed by a JSON file holding the flat list.
///
/// Writes are atomic: the new list is written to a temp file in the target
/// directory and renamed over the original.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CategoryRepository for JsonFileRepository {
    fn list(&self) -> io::Result<Vec<Category>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("read {}: {}", self.path.display(), e),
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("parse {}: {}", self.path.display(), e),
            )
        })
    }

    fn update(&self, category: &Category) -> io::Result<()> {
        let mut categories = self.list()?;
        let slot = categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("category {} not in {}", category.id, self.path.display()),
                )
            })?;
        *slot = category.clone();
        self.save_all(&categories)
    }

    fn save_all(&self, categories: &[Category]) -> io::Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let content = serde_json::to_string_pretty(categories)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        let tmp = tempfile::NamedTempFile::new_in(&dir)?;
        std::fs::write(tmp.path(), content)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory repository for tests and demos.
///
/// Counts persistence calls so tests can assert that no-op moves skip the
/// collaborator entirely, and can be switched to fail updates to exercise
/// the no-local-state-change failure path.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    categories: Mutex<Vec<Category>>,
    update_calls: AtomicUsize,
    list_calls: AtomicUsize,
    fail_updates: AtomicBool,
}

impl InMemoryRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
            ..Self::default()
        }
    }

    pub fn update_call_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent `update` calls fail with `PermissionDenied`.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

impl CategoryRepository for InMemoryRepository {
    fn list(&self) -> io::Result<Vec<Category>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.categories.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn update(&self, category: &Category) -> io::Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "update rejected",
            ));
        }
        let mut categories = self.categories.lock().unwrap_or_else(|e| e.into_inner());
        let slot = categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("category {} not stored", category.id),
                )
            })?;
        *slot = category.clone();
        Ok(())
    }

    fn save_all(&self, categories: &[Category]) -> io::Result<()> {
        *self.categories.lock().unwrap_or_else(|e| e.into_inner()) = categories.to_vec();
        Ok(())
    }
}
