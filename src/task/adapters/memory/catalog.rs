//! In-memory project catalog for tests and standalone use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::ProjectId,
    ports::{CatalogError, CatalogResult, ProjectCatalog},
};

/// Thread-safe in-memory project catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectCatalog {
    state: Arc<RwLock<HashMap<ProjectId, String>>>,
}

impl InMemoryProjectCatalog {
    /// Creates an empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project display name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Persistence`] when the catalog lock is
    /// poisoned.
    pub fn register(&self, project_id: ProjectId, name: impl Into<String>) -> CatalogResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.insert(project_id, name.into());
        Ok(())
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> CatalogError {
    CatalogError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectCatalog for InMemoryProjectCatalog {
    async fn project_name(&self, project_id: ProjectId) -> CatalogResult<Option<String>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&project_id).cloned())
    }
}
