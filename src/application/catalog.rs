//! Catalog service
//!
//! Orchestrates the one-directional data flow: fetch the flat list from the
//! persistence collaborator, derive a forest, compute a layout. Forest and
//! layout are recomputed from the store on demand and never cached.

use std::sync::Arc;

use tracing::debug;

use crate::application::error_ext::IoResultExt;
use crate::application::store::CategoryStore;
use crate::application::ApplicationResult;
use crate::domain::{build_forest, layout, Forest, Layout, LayoutOptions};
use crate::infrastructure::traits::CategoryRepository;

/// Service for loading and viewing the category hierarchy.
pub struct CatalogService {
    repo: Arc<dyn CategoryRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Re-fetch the flat list into the store.
    pub fn refresh(&self, store: &mut CategoryStore) -> ApplicationResult<()> {
        let categories = self.repo.list().with_repo_context("list categories")?;
        debug!("refresh: fetched {} categories", categories.len());
        store.replace(categories);
        Ok(())
    }

    /// Derive the forest from the store's current flat list.
    pub fn forest(&self, store: &CategoryStore) -> Forest {
        build_forest(store.categories())
    }

    /// Derive the forest and lay it out for the visual renderer.
    pub fn layout(&self, store: &CategoryStore, options: &LayoutOptions) -> Layout {
        let forest = self.forest(store);
        layout(&forest, options)
    }
}
