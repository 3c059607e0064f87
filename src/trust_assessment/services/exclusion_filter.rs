use crate::trust_assessment::domain::DependencyRef;
use std::cell::Cell;
use std::collections::BTreeSet;

/// ExclusionFilter - Removes dependencies listed in the policy's `excluded` set
///
/// Matching is by exact package name. Each entry remembers whether it matched
/// so that stale entries can be reported after filtering.
#[derive(Debug)]
pub struct ExclusionFilter {
    entries: Vec<ExclusionEntry>,
}

#[derive(Debug)]
struct ExclusionEntry {
    name: String,
    matched: Cell<bool>,
}

impl ExclusionFilter {
    pub fn new(excluded: &BTreeSet<String>) -> Self {
        Self {
            entries: excluded
                .iter()
                .map(|name| ExclusionEntry {
                    name: name.clone(),
                    matched: Cell::new(false),
                })
                .collect(),
        }
    }

    /// Returns the dependencies not excluded, keeping their order
    pub fn filter_dependencies(&self, dependencies: Vec<DependencyRef>) -> Vec<DependencyRef> {
        dependencies
            .into_iter()
            .filter(|dep| !self.matches(dep.name()))
            .collect()
    }

    fn matches(&self, name: &str) -> bool {
        match self.entries.iter().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.matched.set(true);
                true
            }
            None => false,
        }
    }

    /// Entries that matched no dependency during filtering
    pub fn unmatched_entries(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| !entry.matched.get())
            .map(|entry| entry.name.clone())
            .collect()
    }
}
