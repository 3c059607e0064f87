use super::{DependencyRef, Warning};
use std::collections::BTreeMap;

/// Warnings raised for one dependency, in rule evaluation order
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyAssessment {
    dependency: DependencyRef,
    warnings: Vec<Warning>,
    latest_version: Option<String>,
}

impl DependencyAssessment {
    pub fn new(
        dependency: DependencyRef,
        warnings: Vec<Warning>,
        latest_version: Option<String>,
    ) -> Self {
        Self {
            dependency,
            warnings,
            latest_version,
        }
    }

    pub fn dependency(&self) -> &DependencyRef {
        &self.dependency
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn latest_version(&self) -> Option<&str> {
        self.latest_version.as_deref()
    }

    /// True when a latest release is known and differs from the assessed
    /// version. An unresolved dependency is outdated once a release is known.
    pub fn is_outdated(&self) -> bool {
        self.latest_version()
            .is_some_and(|latest| self.dependency.version() != Some(latest))
    }
}

/// Number of warnings raised per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningCounts(BTreeMap<Warning, usize>);

impl WarningCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, warning: Warning) {
        *self.0.entry(warning).or_insert(0) += 1;
    }

    pub fn count(&self, warning: Warning) -> usize {
        self.0.get(&warning).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Non-zero categories in category order
    pub fn iter(&self) -> impl Iterator<Item = (Warning, usize)> + '_ {
        self.0
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(warning, count)| (*warning, *count))
    }
}

/// Result of one assessment run.
///
/// Holds only dependencies that raised at least one warning, in the order the
/// resolver produced them. `totals` always equals the warning multiset of
/// `entries`; both are fixed once the aggregator hands the report out.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentReport {
    entries: Vec<DependencyAssessment>,
    totals: WarningCounts,
    assessed_count: usize,
}

impl AssessmentReport {
    pub(crate) fn new(
        entries: Vec<DependencyAssessment>,
        totals: WarningCounts,
        assessed_count: usize,
    ) -> Self {
        Self {
            entries,
            totals,
            assessed_count,
        }
    }

    pub fn entries(&self) -> &[DependencyAssessment] {
        &self.entries
    }

    pub fn totals(&self) -> &WarningCounts {
        &self.totals
    }

    /// Number of dependencies evaluated, flagged or not
    pub fn assessed_count(&self) -> usize {
        self.assessed_count
    }

    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// One human-readable line per non-zero category
    pub fn summary_lines(&self) -> Vec<String> {
        self.totals
            .iter()
            .map(|(warning, count)| {
                format!(
                    "{} package(s) flagged {} ({})",
                    count,
                    warning.tag(),
                    warning.description()
                )
            })
            .collect()
    }
}
