use crate::shared::Result;
use async_trait::async_trait;

/// DependentsSource port for the number of packages depending on a package
#[async_trait]
pub trait DependentsSource: Send + Sync {
    /// Fetches the dependents count of a package
    ///
    /// # Returns
    /// `Ok(None)` when the source answered but carried no count. Callers must
    /// keep that distinct from `Ok(Some(0))`.
    ///
    /// # Errors
    /// Returns an error if the source could not be reached
    async fn fetch_dependents_count(&self, package_name: &str) -> Result<Option<u64>>;
}
