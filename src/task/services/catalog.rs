//! Memoized project display-name resolution.

use crate::task::domain::ProjectId;
use crate::task::ports::ProjectCatalog;
use std::collections::HashMap;
use std::sync::Arc;

/// View-lifetime cache of project display names.
///
/// Decoration data must not block a primary view from rendering: a
/// missing or failed lookup substitutes the raw project identifier and
/// is never surfaced as an error. Resolutions, fallbacks included, are
/// memoized for the resolver's lifetime, so a view performs at most one
/// round trip per project.
pub struct ProjectNameResolver<P>
where
    P: ProjectCatalog,
{
    catalog: Arc<P>,
    cache: HashMap<ProjectId, String>,
}

impl<P> ProjectNameResolver<P>
where
    P: ProjectCatalog,
{
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new(catalog: Arc<P>) -> Self {
        Self {
            catalog,
            cache: HashMap::new(),
        }
    }

    /// Returns the project's display name, or its raw identifier when the
    /// catalog cannot provide one.
    pub async fn display_name(&mut self, project_id: ProjectId) -> String {
        if let Some(name) = self.cache.get(&project_id) {
            return name.clone();
        }

        let resolved = match self.catalog.project_name(project_id).await {
            Ok(Some(name)) => name,
            Ok(None) => project_id.to_string(),
            Err(error) => {
                tracing::debug!(project = %project_id, %error, "project name lookup failed, using identifier");
                project_id.to_string()
            }
        };
        self.cache.insert(project_id, resolved.clone());
        resolved
    }
}
