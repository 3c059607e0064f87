use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use npm_trust::prelude::*;
use std::collections::HashMap;

/// Registry facts of one mocked package
#[derive(Debug, Clone)]
pub struct MockPackage {
    pub timeline: Timeline,
    pub dependency_count: u64,
    pub deprecated: Option<String>,
    pub latest: String,
}

impl MockPackage {
    /// A package created `age_days` before `now` with `releases` evenly spread releases
    pub fn published(now: DateTime<Utc>, age_days: i64, releases: i64, latest: &str) -> Self {
        let mut timeline = Timeline::new();
        timeline.insert("created".to_string(), now - Duration::days(age_days));
        timeline.insert("modified".to_string(), now - Duration::days(1));
        for i in 0..releases {
            let published = now - Duration::days(age_days - i * age_days / releases.max(1));
            timeline.insert(format!("0.{}.0", i), published);
        }

        Self {
            timeline,
            dependency_count: 0,
            deprecated: None,
            latest: latest.to_string(),
        }
    }

    pub fn with_dependency_count(mut self, count: u64) -> Self {
        self.dependency_count = count;
        self
    }

    pub fn deprecated(mut self, message: &str) -> Self {
        self.deprecated = Some(message.to_string());
        self
    }
}

/// Mock PackageRegistry; unknown packages fail every lookup
#[derive(Default)]
pub struct MockPackageRegistry {
    pub packages: HashMap<String, MockPackage>,
    pub ranges: HashMap<(String, String), String>,
}

impl MockPackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str, package: MockPackage) -> Self {
        self.packages.insert(name.to_string(), package);
        self
    }

    pub fn with_range(mut self, name: &str, range: &str, version: &str) -> Self {
        self.ranges
            .insert((name.to_string(), range.to_string()), version.to_string());
        self
    }

    fn package(&self, name: &str) -> Result<&MockPackage> {
        self.packages
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Mock registry has no package {}", name))
    }
}

#[async_trait]
impl PackageRegistry for MockPackageRegistry {
    async fn fetch_timeline(&self, package_name: &str) -> Result<Timeline> {
        Ok(self.package(package_name)?.timeline.clone())
    }

    async fn fetch_dependency_count(&self, package_name: &str, _version: Option<&str>) -> Result<u64> {
        Ok(self.package(package_name)?.dependency_count)
    }

    async fn fetch_deprecation(&self, package_name: &str, _version: Option<&str>) -> Result<Option<String>> {
        Ok(self.package(package_name)?.deprecated.clone())
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String> {
        Ok(self.package(package_name)?.latest.clone())
    }

    async fn resolve_range(&self, package_name: &str, range: &str) -> Result<String> {
        self.ranges
            .get(&(package_name.to_string(), range.to_string()))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No matching version for {}@{}", package_name, range))
    }
}
