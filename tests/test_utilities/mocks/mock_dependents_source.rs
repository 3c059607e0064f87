use async_trait::async_trait;
use npm_trust::prelude::*;
use std::collections::HashMap;

/// Mock DependentsSource; packages without an entry fail like an unreachable site
#[derive(Default)]
pub struct MockDependentsSource {
    pub counts: HashMap<String, Option<u64>>,
}

impl MockDependentsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, package: &str, count: u64) -> Self {
        self.counts.insert(package.to_string(), Some(count));
        self
    }

    pub fn with_unknown(mut self, package: &str) -> Self {
        self.counts.insert(package.to_string(), None);
        self
    }
}

#[async_trait]
impl DependentsSource for MockDependentsSource {
    async fn fetch_dependents_count(&self, package_name: &str) -> Result<Option<u64>> {
        match self.counts.get(package_name) {
            Some(count) => Ok(*count),
            None => anyhow::bail!("Mock dependents source failure"),
        }
    }
}
