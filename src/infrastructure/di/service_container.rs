//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::{CatalogService, ReparentService};
use crate::config::Settings;
use crate::infrastructure::traits::{CategoryRepository, JsonFileRepository};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Persistence collaborator
    pub repo: Arc<dyn CategoryRepository>,

    /// Hierarchy load / view service
    pub catalog: CatalogService,

    /// Move coordinator
    pub reparent: ReparentService,
}

impl ServiceContainer {
    /// Create a new service container backed by the JSON file repository at
    /// the configured data file.
    pub fn new(settings: Settings) -> Self {
        let repo = Arc::new(JsonFileRepository::new(&settings.data_file));
        Self::with_deps(settings, repo)
    }

    /// Create a service container with a custom repository (for testing).
    pub fn with_deps(settings: Settings, repo: Arc<dyn CategoryRepository>) -> Self {
        let settings = Arc::new(settings);
        let catalog = CatalogService::new(repo.clone());
        let reparent = ReparentService::new(repo.clone());

        Self {
            settings,
            repo,
            catalog,
            reparent,
        }
    }
}
