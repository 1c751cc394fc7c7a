//! Catalog port for project display metadata.

use crate::task::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only lookup of project display metadata.
///
/// Catalog data only decorates views; callers substitute a fallback when
/// a lookup fails rather than propagating the error.
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// Returns the project's display name.
    ///
    /// Returns `None` when the project is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Persistence`] when the lookup fails.
    async fn project_name(&self, project_id: ProjectId) -> CatalogResult<Option<String>>;
}

/// Errors returned by project catalog implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
