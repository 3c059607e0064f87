use crate::ports::outbound::PackageRegistry;
use crate::shared::error::TrustError;
use crate::trust_assessment::domain::DependencyRef;
use crate::trust_assessment::services::{DependencyListing, VersionConstraint};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;

/// Registry lookups in flight while resolving problem constraints
const MAX_CONCURRENT_RESOLUTIONS: usize = 8;

/// Flat dependency set produced from one listing
#[derive(Debug, Default)]
pub struct ResolvedDependencies {
    /// Unique by name, primary entries first, then problem entries
    pub dependencies: Vec<DependencyRef>,
    /// Constraints whose range could not be turned into a version
    pub resolution_failures: Vec<TrustError>,
}

/// DependencyResolver - turns a parsed listing into a flat dependency set
///
/// Entries npm resolved itself are taken as they are. Problem constraints are
/// resolved through the registry: a local path range resolves to the latest
/// release, any other range to its highest matching release. A constraint
/// that fails to resolve is kept with no version.
pub struct DependencyResolver<'a, R> {
    registry: &'a R,
}

impl<'a, R: PackageRegistry> DependencyResolver<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    pub async fn resolve(&self, listing: DependencyListing) -> ResolvedDependencies {
        let mut seen = HashSet::new();
        let mut resolved = ResolvedDependencies::default();

        for (name, version) in listing.resolved {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(dependency) = dependency_ref(name, Some(version)) {
                resolved.dependencies.push(dependency);
            }
        }

        let mut pending = Vec::new();
        for constraint in listing.constraints {
            match constraint {
                Ok(constraint) => {
                    if seen.insert(constraint.name.clone()) {
                        pending.push(constraint);
                    }
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        let outcomes: Vec<_> = stream::iter(pending)
            .map(|constraint| self.resolve_constraint(constraint))
            .buffered(MAX_CONCURRENT_RESOLUTIONS)
            .collect()
            .await;

        for (constraint, outcome) in outcomes {
            let version = match outcome {
                Ok(version) => Some(version),
                Err(failure) => {
                    log::debug!("{}", failure);
                    resolved.resolution_failures.push(failure);
                    None
                }
            };

            if let Some(dependency) = dependency_ref(constraint.name, version) {
                resolved.dependencies.push(dependency);
            }
        }

        resolved
    }

    async fn resolve_constraint(
        &self,
        constraint: VersionConstraint,
    ) -> (VersionConstraint, Result<String, TrustError>) {
        let lookup = if constraint.is_local_path() {
            self.registry.fetch_latest_version(&constraint.name).await
        } else {
            self.registry
                .resolve_range(&constraint.name, &constraint.range)
                .await
        };

        let outcome = lookup.map_err(|e| TrustError::ResolutionFailed {
            package: constraint.name.clone(),
            range: constraint.range.clone(),
            details: e.to_string(),
        });
        (constraint, outcome)
    }
}

/// Builds a dependency, dropping a version that fails validation.
///
/// Only an invalid package name skips the dependency.
fn dependency_ref(name: String, version: Option<String>) -> Option<DependencyRef> {
    if version.is_some() {
        match DependencyRef::new(name.clone(), version) {
            Ok(dependency) => return Some(dependency),
            Err(e) => log::warn!("Assessing {} without a version: {}", name, e),
        }
    }

    match DependencyRef::new(name, None) {
        Ok(dependency) => Some(dependency),
        Err(e) => {
            log::warn!("Skipping dependency: {}", e);
            None
        }
    }
}
