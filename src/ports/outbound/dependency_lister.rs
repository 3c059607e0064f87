use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// DependencyLister port for obtaining the project's dependency listing
///
/// This port abstracts the package manager invocation that lists the
/// installed (or declared) dependencies of a project.
#[async_trait]
pub trait DependencyLister: Send + Sync {
    /// Produces the raw JSON listing for the project
    ///
    /// # Arguments
    /// * `project_path` - Path to the project directory
    ///
    /// # Returns
    /// The raw listing text, in the `npm ls --json` shape
    ///
    /// # Errors
    /// Returns an error if no listing can be produced at all. This is the
    /// only collaborator failure that aborts an assessment.
    async fn list_dependencies(&self, project_path: &Path) -> Result<String>;
}
