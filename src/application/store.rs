//! Session-owned category store.
//!
//! Holds the flat, authoritative list of categories as last received from
//! the persistence collaborator. The store is replaced wholesale on every
//! refresh and is never partially mutated: derived forests and layouts are
//! transient and rebuilt from it.

use crate::domain::Category;

/// The flat category list for the current view session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Replace the whole list (refresh from the collaborator).
    pub fn replace(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
