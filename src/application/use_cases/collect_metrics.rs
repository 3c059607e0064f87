use crate::ports::outbound::{DependentsSource, PackageRegistry};
use crate::shared::error::TrustError;
use crate::shared::Result;
use crate::trust_assessment::domain::{DependencyRef, MetricSet, PublishingInfo};
use chrono::{DateTime, Utc};

/// Metrics gathered for one dependency, with the lookups that fell back
#[derive(Debug)]
pub struct CollectedMetrics {
    pub metrics: MetricSet,
    pub failures: Vec<TrustError>,
}

/// MetricsCollector - gathers every metric of one dependency
///
/// The five lookups run concurrently and fail independently. A failed lookup
/// leaves its metric at the fallback value of `MetricSet::new` and is
/// returned in `failures`; it never fails the collection as a whole.
pub struct MetricsCollector<'a, R, D> {
    registry: &'a R,
    dependents_source: &'a D,
}

impl<'a, R, D> MetricsCollector<'a, R, D>
where
    R: PackageRegistry,
    D: DependentsSource,
{
    pub fn new(registry: &'a R, dependents_source: &'a D) -> Self {
        Self {
            registry,
            dependents_source,
        }
    }

    pub async fn collect(&self, dependency: DependencyRef, now: DateTime<Utc>) -> CollectedMetrics {
        let name = dependency.name();
        // Absent versions query the latest release
        let version = dependency.version();

        let (timeline, dependency_count, deprecation, latest_version, dependents_count) = tokio::join!(
            self.registry.fetch_timeline(name),
            self.registry.fetch_dependency_count(name, version),
            self.registry.fetch_deprecation(name, version),
            self.registry.fetch_latest_version(name),
            self.dependents_source.fetch_dependents_count(name),
        );

        let mut failures = Vec::new();
        let publishing = recover(name, "publish timeline", timeline, &mut failures)
            .map(|timeline| PublishingInfo::from_timeline(&timeline, now));
        let dependency_count = recover(name, "dependency count", dependency_count, &mut failures);
        let deprecation = recover(name, "deprecation status", deprecation, &mut failures);
        let latest_version = recover(name, "latest version", latest_version, &mut failures);
        let dependents_count = recover(name, "dependents count", dependents_count, &mut failures);

        let mut metrics = MetricSet::new(dependency);
        if let Some(publishing) = publishing {
            metrics.publishing = publishing;
        }
        if let Some(count) = dependency_count {
            metrics.transitive_dependency_count = count;
        }
        metrics.deprecation_message = deprecation
            .flatten()
            .filter(|message| !message.trim().is_empty());
        metrics.latest_version = latest_version;
        metrics.dependents_count = dependents_count.flatten();

        CollectedMetrics { metrics, failures }
    }
}

fn recover<T>(
    package: &str,
    metric: &'static str,
    lookup: Result<T>,
    failures: &mut Vec<TrustError>,
) -> Option<T> {
    match lookup {
        Ok(value) => Some(value),
        Err(e) => {
            let failure = TrustError::MetricFetchFailed {
                metric,
                package: package.to_string(),
                details: format!("{:#}", e),
            };
            log::debug!("{}", failure);
            failures.push(failure);
            None
        }
    }
}
