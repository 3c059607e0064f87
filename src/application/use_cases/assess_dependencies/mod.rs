use crate::application::dto::{AssessmentRequest, AssessmentResponse};
use crate::application::use_cases::{DependencyResolver, MetricsCollector};
use crate::ports::outbound::{
    DependencyLister, DependentsSource, PackageRegistry, PolicyRepository, ProgressReporter,
};
use crate::shared::error::TrustError;
use crate::shared::Result;
use crate::trust_assessment::domain::{DependencyRef, Policy, Warning};
use crate::trust_assessment::services::{
    AssessmentRules, ExclusionFilter, ListingParser, ReportAggregator,
};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::path::Path;

/// Per-dependency pipelines in flight at once
const MAX_CONCURRENT_PIPELINES: usize = 8;

/// Outcome of one dependency pipeline
struct PipelineOutcome {
    dependency: DependencyRef,
    warnings: Vec<Warning>,
    latest_version: Option<String>,
    failed_lookups: usize,
}

/// AssessDependenciesUseCase - Core use case for dependency trust assessment
///
/// Loads the policy, lists and resolves the project's dependencies, drops
/// excluded ones, then runs one metrics-and-rules pipeline per dependency.
/// Pipelines run concurrently but their results are aggregated in resolver
/// order, so the report is the same regardless of completion order.
///
/// # Type Parameters
/// * `POL` - PolicyRepository implementation
/// * `DL` - DependencyLister implementation
/// * `REG` - PackageRegistry implementation
/// * `DS` - DependentsSource implementation
/// * `PR` - ProgressReporter implementation
pub struct AssessDependenciesUseCase<POL, DL, REG, DS, PR> {
    policy_repository: POL,
    dependency_lister: DL,
    registry: REG,
    dependents_source: DS,
    progress_reporter: PR,
}

impl<POL, DL, REG, DS, PR> AssessDependenciesUseCase<POL, DL, REG, DS, PR>
where
    POL: PolicyRepository,
    DL: DependencyLister,
    REG: PackageRegistry,
    DS: DependentsSource,
    PR: ProgressReporter,
{
    /// Creates a new AssessDependenciesUseCase with injected dependencies
    pub fn new(
        policy_repository: POL,
        dependency_lister: DL,
        registry: REG,
        dependents_source: DS,
        progress_reporter: PR,
    ) -> Self {
        Self {
            policy_repository,
            dependency_lister,
            registry,
            dependents_source,
            progress_reporter,
        }
    }

    /// Executes the assessment
    ///
    /// # Errors
    /// Returns an error if the policy cannot be loaded or the dependency
    /// listing cannot be produced. Every other failure degrades the result
    /// instead of aborting the run.
    pub async fn execute(&self, request: AssessmentRequest) -> Result<AssessmentResponse> {
        // Step 1: Policy is read once and never changes during the run
        let policy = self.policy_repository.load()?;

        // Step 2: List and resolve dependencies
        let (dependencies, unresolved_count) = self.list_dependencies(&request.project_path).await?;

        // Step 3: Apply the exclusion list
        let total_listed = dependencies.len();
        let dependencies = self.apply_exclusions(dependencies, &policy);
        let excluded_count = total_listed - dependencies.len();

        if dependencies.is_empty() {
            self.progress_reporter
                .report("ℹ️  No dependencies to assess.");
            let report = ReportAggregator::new().finish();
            return Ok(AssessmentResponse::new(
                report,
                excluded_count,
                unresolved_count,
                0,
            ));
        }

        // Step 4: Run the pipelines and aggregate in resolver order
        let (aggregator, failed_lookup_count) = self
            .run_pipelines(dependencies, &policy, request.evaluated_at)
            .await;
        let report = aggregator.finish();

        if failed_lookup_count > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} metric lookup(s) failed and fell back to defaults (set RUST_LOG=debug for details)",
                failed_lookup_count
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Assessment complete: {} package(s) assessed, {} flagged",
            report.assessed_count(),
            report.entries().len()
        ));

        Ok(AssessmentResponse::new(
            report,
            excluded_count,
            unresolved_count,
            failed_lookup_count,
        ))
    }

    /// Lists, parses and resolves the project's dependencies
    ///
    /// # Returns
    /// The resolved dependencies and how many of them have no version
    async fn list_dependencies(&self, project_path: &Path) -> Result<(Vec<DependencyRef>, usize)> {
        self.progress_reporter.report(&format!(
            "📖 Listing dependencies in: {}",
            project_path.display()
        ));

        let raw = self.dependency_lister.list_dependencies(project_path).await?;
        let listing = ListingParser::parse(&raw).map_err(|e| TrustError::DependencyListingFailed {
            path: project_path.to_path_buf(),
            details: e.to_string(),
        })?;

        let resolved = DependencyResolver::new(&self.registry)
            .resolve(listing)
            .await;

        for failure in &resolved.resolution_failures {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", failure));
        }

        self.progress_reporter.report(&format!(
            "✅ Detected {} dependency(ies)",
            resolved.dependencies.len()
        ));

        Ok((
            resolved.dependencies,
            resolved.resolution_failures.len(),
        ))
    }

    /// Removes excluded dependencies and warns about stale exclusion entries
    fn apply_exclusions(&self, dependencies: Vec<DependencyRef>, policy: &Policy) -> Vec<DependencyRef> {
        if policy.excluded.is_empty() {
            return dependencies;
        }

        let filter = ExclusionFilter::new(&policy.excluded);
        let original_count = dependencies.len();
        let kept = filter.filter_dependencies(dependencies);

        let excluded_count = original_count - kept.len();
        if excluded_count > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Excluded {} package(s) based on the policy",
                excluded_count
            ));
        }

        for entry in filter.unmatched_entries() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Excluded package '{}' did not match any dependency.",
                entry
            ));
        }

        kept
    }

    async fn run_pipelines(
        &self,
        dependencies: Vec<DependencyRef>,
        policy: &Policy,
        now: DateTime<Utc>,
    ) -> (ReportAggregator, usize) {
        self.progress_reporter
            .report("🔍 Collecting package metrics...");

        let total = dependencies.len();
        let mut outcomes = std::pin::pin!(stream::iter(dependencies)
            .map(|dependency| self.assess_dependency(dependency, policy, now))
            .buffered(MAX_CONCURRENT_PIPELINES));

        let mut aggregator = ReportAggregator::new();
        let mut failed_lookups = 0;
        let mut finished = 0;

        while let Some(outcome) = outcomes.next().await {
            finished += 1;
            self.progress_reporter.report_progress(
                finished,
                total,
                Some(outcome.dependency.name()),
            );

            failed_lookups += outcome.failed_lookups;
            aggregator.record(outcome.dependency, outcome.warnings, outcome.latest_version);
        }

        (aggregator, failed_lookups)
    }

    /// One pipeline: collect metrics, select thresholds, evaluate the rules
    async fn assess_dependency(
        &self,
        dependency: DependencyRef,
        policy: &Policy,
        now: DateTime<Utc>,
    ) -> PipelineOutcome {
        let collected = MetricsCollector::new(&self.registry, &self.dependents_source)
            .collect(dependency, now)
            .await;

        let metrics = collected.metrics;
        let thresholds = policy.resolve(metrics.dependency.name());
        let warnings = AssessmentRules::evaluate(&metrics, thresholds, now);

        PipelineOutcome {
            dependency: metrics.dependency,
            warnings,
            latest_version: metrics.latest_version,
            failed_lookups: collected.failures.len(),
        }
    }
}

#[cfg(test)]
mod tests;
