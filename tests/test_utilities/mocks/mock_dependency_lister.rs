use async_trait::async_trait;
use npm_trust::prelude::*;
use std::path::Path;

/// Mock DependencyLister returning a canned `npm ls --json` listing
pub struct MockDependencyLister {
    pub listing: String,
    pub should_fail: bool,
}

impl MockDependencyLister {
    pub fn new(listing: &str) -> Self {
        Self {
            listing: listing.to_string(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            listing: String::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl DependencyLister for MockDependencyLister {
    async fn list_dependencies(&self, project_path: &Path) -> Result<String> {
        if self.should_fail {
            return Err(TrustError::DependencyListingFailed {
                path: project_path.to_path_buf(),
                details: "Mock dependency lister failure".to_string(),
            }
            .into());
        }
        Ok(self.listing.clone())
    }
}
