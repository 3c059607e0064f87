use super::DependencyRef;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Publish timeline of a package: version → publish time, plus the
/// `created` and `modified` sentinel entries.
pub type Timeline = BTreeMap<String, DateTime<Utc>>;

/// Timeline key holding the package creation time
pub const CREATED_KEY: &str = "created";

/// Timeline key holding the last modification time
pub const MODIFIED_KEY: &str = "modified";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Publishing facts derived from a package's timeline.
///
/// Every field is optional: a missing timeline yields `PublishingInfo::unknown()`
/// and the rules depending on it are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishingInfo {
    created_at: Option<DateTime<Utc>>,
    last_modified_days: Option<i64>,
    avg_publish_interval_days: Option<f64>,
}

impl PublishingInfo {
    pub fn new(
        created_at: Option<DateTime<Utc>>,
        last_modified_days: Option<i64>,
        avg_publish_interval_days: Option<f64>,
    ) -> Self {
        Self {
            created_at,
            last_modified_days,
            avg_publish_interval_days,
        }
    }

    /// Publishing info for a package whose timeline could not be fetched
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Derives publishing facts from a timeline.
    ///
    /// The average interval is the package lifespan divided by the number of
    /// releases (timeline entries that are not sentinels). With no releases
    /// the interval is undefined.
    pub fn from_timeline(timeline: &Timeline, now: DateTime<Utc>) -> Self {
        let releases: Vec<&DateTime<Utc>> = timeline
            .iter()
            .filter(|(key, _)| !is_sentinel(key))
            .map(|(_, published)| published)
            .collect();

        // Some registries omit `created`; the first release is the next best thing
        let created_at = timeline
            .get(CREATED_KEY)
            .copied()
            .or_else(|| releases.iter().min().map(|first| **first));

        let last_modified_days = timeline
            .get(MODIFIED_KEY)
            .map(|modified| (now - *modified).num_days());

        let avg_publish_interval_days = match created_at {
            Some(created) if !releases.is_empty() => {
                Some(days_between(created, now) / releases.len() as f64)
            }
            _ => None,
        };

        Self {
            created_at,
            last_modified_days,
            avg_publish_interval_days,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn last_modified_days(&self) -> Option<i64> {
        self.last_modified_days
    }

    pub fn avg_publish_interval_days(&self) -> Option<f64> {
        self.avg_publish_interval_days
    }

    /// Age of the package in fractional days at `now`
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<f64> {
        self.created_at.map(|created| days_between(created, now))
    }
}

fn is_sentinel(key: &str) -> bool {
    key == CREATED_KEY || key == MODIFIED_KEY
}

fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / SECONDS_PER_DAY
}

/// All facts gathered for one dependency during a run.
///
/// Built field by field by the metrics collector; a failed lookup leaves its
/// field at the documented fallback (`0` dependencies, unknown dependents,
/// no deprecation, unknown publishing info).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    pub dependency: DependencyRef,
    pub publishing: PublishingInfo,
    pub transitive_dependency_count: u64,
    /// `None` means unknown, which is not the same as zero dependents
    pub dependents_count: Option<u64>,
    pub deprecation_message: Option<String>,
    pub latest_version: Option<String>,
}

impl MetricSet {
    /// Creates a metric set holding only fallback values
    pub fn new(dependency: DependencyRef) -> Self {
        Self {
            dependency,
            publishing: PublishingInfo::unknown(),
            transitive_dependency_count: 0,
            dependents_count: None,
            deprecation_message: None,
            latest_version: None,
        }
    }
}
