use crate::shared::Result;
use crate::trust_assessment::domain::Timeline;
use async_trait::async_trait;

/// PackageRegistry port for per-package registry metadata
///
/// Each method is one independent lookup. Callers treat every error as a
/// failure of that single metric and fall back to a default value.
///
/// Methods taking an optional version query the latest release when the
/// version is `None`.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Fetches the publish timeline (version → time, plus `created`/`modified`)
    async fn fetch_timeline(&self, package_name: &str) -> Result<Timeline>;

    /// Counts the dependencies declared by a release
    ///
    /// A release without dependencies yields `Ok(0)`.
    async fn fetch_dependency_count(&self, package_name: &str, version: Option<&str>) -> Result<u64>;

    /// Fetches the deprecation message of a release, `None` when not deprecated
    async fn fetch_deprecation(&self, package_name: &str, version: Option<&str>) -> Result<Option<String>>;

    /// Fetches the version currently tagged `latest`
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String>;

    /// Resolves a semver range to the highest published version satisfying it
    ///
    /// # Errors
    /// Returns an error if no published version satisfies the range
    async fn resolve_range(&self, package_name: &str, range: &str) -> Result<String>;
}
