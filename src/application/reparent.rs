//! Reparent coordinator
//!
//! Validates and executes a move of a category to a new parent (or to top
//! level). The cycle check runs client-side before any persistence call: the
//! new parent must not be the moved category itself nor one of its
//! descendants. On success the single record is persisted and the flat list
//! re-fetched; on any failure the store is left unchanged.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::store::CategoryStore;
use crate::application::ApplicationResult;
use crate::domain::{Category, DomainError, DomainResult, ParentRef};
use crate::infrastructure::traits::CategoryRepository;

/// A committed parent change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentChange {
    pub category_id: u64,
    pub old_parent: Option<u64>,
    pub new_parent: Option<u64>,
}

/// Result of a validated move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// New parent equals the current parent: successful no-op, no
    /// persistence call, no rebuild.
    Unchanged,
    /// The change was (or is to be) committed.
    Moved(ParentChange),
}

/// Validate a move against the current flat list without executing it.
///
/// Checks, in order: both ids resolve against the list, the new parent is
/// not the child itself, the move is not a no-op, and the new parent is not
/// one of the child's descendants. Self-parent moves are rejected even when
/// a corrupt record already declares itself as its own parent, so they never
/// pass as a no-op. The ancestor walk carries a visited set so a corrupt
/// list with a pre-existing parent cycle cannot loop it.
pub fn plan_move(
    child_id: u64,
    new_parent_id: Option<u64>,
    categories: &[Category],
) -> DomainResult<MoveOutcome> {
    let parent_of: HashMap<u64, Option<u64>> = categories
        .iter()
        .map(|c| (c.id, c.parent_id()))
        .collect();

    let current_parent = *parent_of
        .get(&child_id)
        .ok_or(DomainError::CategoryNotFound(child_id))?;
    if let Some(pid) = new_parent_id {
        if !parent_of.contains_key(&pid) {
            return Err(DomainError::CategoryNotFound(pid));
        }
    }

    // Rejected before the no-op check: a record that already declares itself
    // as its own parent must still fail, not read as "unchanged".
    if let Some(pid) = new_parent_id {
        if pid == child_id {
            return Err(DomainError::CycleDetected {
                child: child_id,
                parent: pid,
            });
        }
    }

    if new_parent_id == current_parent {
        return Ok(MoveOutcome::Unchanged);
    }

    if let Some(pid) = new_parent_id {
        // Walk the ancestor chain upward from the new parent; reaching the
        // child means the new parent lives inside the child's subtree.
        let mut visited = HashSet::new();
        let mut current = Some(pid);
        while let Some(ancestor) = current {
            if ancestor == child_id {
                return Err(DomainError::CycleDetected {
                    child: child_id,
                    parent: pid,
                });
            }
            if !visited.insert(ancestor) {
                break;
            }
            current = parent_of.get(&ancestor).copied().flatten();
        }
    }

    Ok(MoveOutcome::Moved(ParentChange {
        category_id: child_id,
        old_parent: current_parent,
        new_parent: new_parent_id,
    }))
}

/// Service executing validated reparent operations against the persistence
/// collaborator.
pub struct ReparentService {
    repo: Arc<dyn CategoryRepository>,
}

impl ReparentService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Move `child_id` under `new_parent_id` (None = top level).
    ///
    /// On `Moved`, the full record with its parent field replaced is sent to
    /// the collaborator and the store is refreshed from it afterwards. On
    /// `Unchanged` and on every error the store is untouched.
    #[instrument(level = "debug", skip(self, store))]
    pub fn move_category(
        &self,
        store: &mut CategoryStore,
        child_id: u64,
        new_parent_id: Option<u64>,
    ) -> ApplicationResult<MoveOutcome> {
        let change = match plan_move(child_id, new_parent_id, store.categories())? {
            MoveOutcome::Unchanged => {
                debug!("move_category: no-op for {}", child_id);
                return Ok(MoveOutcome::Unchanged);
            }
            MoveOutcome::Moved(change) => change,
        };

        // Full record with only the parent reference replaced
        let mut record = store
            .get(child_id)
            .cloned()
            .ok_or(DomainError::CategoryNotFound(child_id))?;
        record.parent = change.new_parent.map(|pid| ParentRef {
            id: pid,
            name: store.get(pid).map(|p| p.name.clone()),
        });

        self.repo
            .update(&record)
            .with_repo_context("update category parent")?;
        debug!(
            "move_category: committed {} -> {:?}",
            child_id, change.new_parent
        );

        let fresh = self.repo.list().with_repo_context("refresh categories")?;
        store.replace(fresh);
        Ok(MoveOutcome::Moved(change))
    }
}
