use super::*;
use crate::shared::error::ExitCode;
use crate::trust_assessment::domain::{Thresholds, Timeline};
use async_trait::async_trait;
use chrono::{Duration, TimeZone};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn request() -> AssessmentRequest {
    AssessmentRequest::with_evaluation_time(PathBuf::from("/test/project"), now())
}

/// Timeline with a `created` entry and one release per given age
fn timeline(created_days_ago: i64, release_days_ago: &[i64]) -> Timeline {
    let mut timeline = Timeline::new();
    timeline.insert("created".to_string(), now() - Duration::days(created_days_ago));
    timeline.insert("modified".to_string(), now() - Duration::days(1));
    for (i, days) in release_days_ago.iter().enumerate() {
        timeline.insert(format!("1.{}.0", i), now() - Duration::days(*days));
    }
    timeline
}

// Mock implementations for testing
struct MockPolicyRepository {
    policy: Option<Policy>,
}

impl MockPolicyRepository {
    fn with_policy(policy: Policy) -> Self {
        Self {
            policy: Some(policy),
        }
    }

    fn failing() -> Self {
        Self { policy: None }
    }
}

impl PolicyRepository for MockPolicyRepository {
    fn load(&self) -> Result<Policy> {
        match &self.policy {
            Some(policy) => Ok(policy.clone()),
            None => Err(TrustError::PolicyParseError {
                path: PathBuf::from("npm-trust.config.json"),
                details: "expected value at line 1 column 1".to_string(),
            }
            .into()),
        }
    }
}

struct MockDependencyLister {
    listing: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockDependencyLister {
    fn new(listing: &str) -> Self {
        Self {
            listing: Some(listing.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            listing: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl DependencyLister for MockDependencyLister {
    async fn list_dependencies(&self, project_path: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.listing.clone().ok_or_else(|| {
            TrustError::DependencyListingFailed {
                path: project_path.to_path_buf(),
                details: "npm: command not found".to_string(),
            }
            .into()
        })
    }
}

#[derive(Clone)]
struct PackageData {
    timeline: Timeline,
    dependency_count: u64,
    deprecated: Option<String>,
    latest: String,
    delay_ms: u64,
}

impl PackageData {
    fn healthy(latest: &str) -> Self {
        Self {
            timeline: timeline(400, &(0..40).map(|i| 400 - i * 10).collect::<Vec<_>>()),
            dependency_count: 2,
            deprecated: None,
            latest: latest.to_string(),
            delay_ms: 0,
        }
    }
}

#[derive(Default)]
struct MockRegistry {
    packages: HashMap<String, PackageData>,
    ranges: HashMap<String, String>,
}

impl MockRegistry {
    fn with_package(mut self, name: &str, data: PackageData) -> Self {
        self.packages.insert(name.to_string(), data);
        self
    }

    fn with_range(mut self, name: &str, version: &str) -> Self {
        self.ranges.insert(name.to_string(), version.to_string());
        self
    }

    async fn package(&self, name: &str) -> Result<PackageData> {
        let data = self
            .packages
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("npm ERR! 404 '{}' is not in this registry", name))?;
        if data.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(data.delay_ms)).await;
        }
        Ok(data)
    }
}

#[async_trait]
impl PackageRegistry for MockRegistry {
    async fn fetch_timeline(&self, package_name: &str) -> Result<Timeline> {
        Ok(self.package(package_name).await?.timeline)
    }

    async fn fetch_dependency_count(&self, package_name: &str, _version: Option<&str>) -> Result<u64> {
        Ok(self.package(package_name).await?.dependency_count)
    }

    async fn fetch_deprecation(&self, package_name: &str, _version: Option<&str>) -> Result<Option<String>> {
        Ok(self.package(package_name).await?.deprecated)
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String> {
        Ok(self.package(package_name).await?.latest)
    }

    async fn resolve_range(&self, package_name: &str, range: &str) -> Result<String> {
        self.ranges
            .get(package_name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No matching version found for {}@{}", package_name, range))
    }
}

#[derive(Default)]
struct MockDependentsSource {
    counts: HashMap<String, Option<u64>>,
}

impl MockDependentsSource {
    fn with_count(mut self, name: &str, count: Option<u64>) -> Self {
        self.counts.insert(name.to_string(), count);
        self
    }
}

#[async_trait]
impl DependentsSource for MockDependentsSource {
    async fn fetch_dependents_count(&self, package_name: &str) -> Result<Option<u64>> {
        self.counts
            .get(package_name)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("request timed out"))
    }
}

#[derive(Default, Clone)]
struct MockProgressReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.messages.lock().unwrap().push(format!(
            "Progress: {}/{} - {}",
            current,
            total,
            message.unwrap_or_default()
        ));
    }

    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Completed: {}", message));
    }
}

type TestUseCase = AssessDependenciesUseCase<
    MockPolicyRepository,
    MockDependencyLister,
    MockRegistry,
    MockDependentsSource,
    MockProgressReporter,
>;

fn use_case(
    policy: Policy,
    listing: &str,
    registry: MockRegistry,
    dependents: MockDependentsSource,
    progress: MockProgressReporter,
) -> TestUseCase {
    AssessDependenciesUseCase::new(
        MockPolicyRepository::with_policy(policy),
        MockDependencyLister::new(listing),
        registry,
        dependents,
        progress,
    )
}

/// left-pad with 15 dependencies, 2 dependents, a 20-day release interval and
/// a deprecation notice
fn left_pad() -> PackageData {
    PackageData {
        timeline: timeline(40, &[40, 30]),
        dependency_count: 15,
        deprecated: Some("use String.prototype.padStart()".to_string()),
        latest: "1.3.0".to_string(),
        delay_ms: 0,
    }
}

#[tokio::test]
async fn test_left_pad_scenario() {
    let progress = MockProgressReporter::default();
    let use_case = use_case(
        Policy::default(),
        r#"{"dependencies": {"left-pad": {"version": "1.3.0"}}}"#,
        MockRegistry::default().with_package("left-pad", left_pad()),
        MockDependentsSource::default().with_count("left-pad", Some(2)),
        progress.clone(),
    );

    let response = use_case.execute(request()).await.unwrap();
    let report = response.report;

    assert_eq!(report.assessed_count(), 1);
    assert_eq!(report.entries().len(), 1);
    assert_eq!(report.entries()[0].dependency().to_string(), "left-pad@1.3.0");
    assert_eq!(
        report.entries()[0].warnings(),
        &[
            Warning::LowPublishFrequency,
            Warning::HighDependencyCount,
            Warning::LowDependentsCount,
            Warning::Deprecated,
        ]
    );
    assert_eq!(report.totals().total(), 4);
    assert_eq!(response.failed_lookup_count, 0);
    assert!(progress.contains("✅ Detected 1 dependency(ies)"));
    assert!(progress.contains("Progress: 1/1 - left-pad"));
    assert!(progress.contains("Completed: ✅ Assessment complete: 1 package(s) assessed, 1 flagged"));
}

#[tokio::test]
async fn test_report_follows_resolver_order_not_completion_order() {
    let mut slow = left_pad();
    slow.delay_ms = 50;

    let registry = MockRegistry::default()
        .with_package("slow-pkg", slow)
        .with_package("fast-pkg", left_pad())
        .with_package("mid-pkg", PackageData {
            delay_ms: 20,
            ..left_pad()
        });
    let dependents = MockDependentsSource::default()
        .with_count("slow-pkg", Some(1))
        .with_count("fast-pkg", Some(1))
        .with_count("mid-pkg", Some(1));

    let use_case = use_case(
        Policy::default(),
        r#"{"dependencies": {
            "slow-pkg": {"version": "1.3.0"},
            "fast-pkg": {"version": "1.3.0"},
            "mid-pkg": {"version": "1.3.0"}
        }}"#,
        registry,
        dependents,
        MockProgressReporter::default(),
    );

    let report = use_case.execute(request()).await.unwrap().report;

    let order: Vec<&str> = report
        .entries()
        .iter()
        .map(|entry| entry.dependency().name())
        .collect();
    assert_eq!(order, vec!["slow-pkg", "fast-pkg", "mid-pkg"]);
    assert_eq!(report.totals().count(Warning::Deprecated), 3);
}

#[tokio::test]
async fn test_clean_dependencies_are_counted_but_not_listed() {
    let use_case = use_case(
        Policy::default(),
        r#"{"dependencies": {"lodash": {"version": "4.17.21"}, "left-pad": {"version": "1.3.0"}}}"#,
        MockRegistry::default()
            .with_package("lodash", PackageData::healthy("4.17.21"))
            .with_package("left-pad", left_pad()),
        MockDependentsSource::default()
            .with_count("lodash", Some(150_000))
            .with_count("left-pad", Some(2)),
        MockProgressReporter::default(),
    );

    let report = use_case.execute(request()).await.unwrap().report;

    assert_eq!(report.assessed_count(), 2);
    assert_eq!(report.entries().len(), 1);
    assert_eq!(report.entries()[0].dependency().name(), "left-pad");
}

#[tokio::test]
async fn test_excluded_dependencies_are_not_assessed() {
    let mut policy = Policy::default();
    policy.excluded.insert("left-pad".to_string());
    policy.excluded.insert("not-installed".to_string());
    let progress = MockProgressReporter::default();

    let use_case = use_case(
        policy,
        r#"{"dependencies": {"lodash": {"version": "4.17.21"}, "left-pad": {"version": "1.3.0"}}}"#,
        MockRegistry::default()
            .with_package("lodash", PackageData::healthy("4.17.21"))
            .with_package("left-pad", left_pad()),
        MockDependentsSource::default()
            .with_count("lodash", Some(150_000))
            .with_count("left-pad", Some(2)),
        progress.clone(),
    );

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(response.excluded_count, 1);
    assert_eq!(response.report.assessed_count(), 1);
    assert!(response.report.is_clean());
    assert!(progress.contains("🚫 Excluded 1 package(s) based on the policy"));
    assert!(progress.contains("Excluded package 'not-installed' did not match any dependency."));
    assert!(!progress.contains("Excluded package 'left-pad'"));
}

#[tokio::test]
async fn test_custom_thresholds_replace_default_wholesale() {
    let mut policy = Policy::default();
    policy.custom.insert(
        "left-pad".to_string(),
        Thresholds {
            dependency_count_max: Some(20),
            ..Thresholds::default()
        },
    );

    let use_case = use_case(
        policy,
        r#"{"dependencies": {"left-pad": {"version": "1.3.0"}}}"#,
        MockRegistry::default().with_package("left-pad", left_pad()),
        MockDependentsSource::default().with_count("left-pad", Some(2)),
        MockProgressReporter::default(),
    );

    let report = use_case.execute(request()).await.unwrap().report;

    assert!(report.is_clean());
    assert_eq!(report.assessed_count(), 1);
}

#[tokio::test]
async fn test_failed_lookups_degrade_instead_of_failing() {
    let progress = MockProgressReporter::default();
    let use_case = use_case(
        Policy::default(),
        r#"{"dependencies": {"mystery": {"version": "1.0.0"}}}"#,
        MockRegistry::default(),
        MockDependentsSource::default(),
        progress.clone(),
    );

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(response.failed_lookup_count, 5);
    assert!(response.report.is_clean());
    assert_eq!(response.report.assessed_count(), 1);
    assert!(progress.contains("5 metric lookup(s) failed and fell back to defaults"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_timed_out_registry_lookups_are_counted() {
    use crate::adapters::outbound::package_manager::{stalled_npm, NpmCli};

    let temp_dir = tempfile::TempDir::new().unwrap();
    let timeout = std::time::Duration::from_millis(300);
    let progress = MockProgressReporter::default();
    let use_case = AssessDependenciesUseCase::new(
        MockPolicyRepository::with_policy(Policy::default()),
        MockDependencyLister::new(r#"{"dependencies": {"left-pad": {"version": "1.3.0"}}}"#),
        NpmCli::with_program(stalled_npm(temp_dir.path())).with_timeouts(timeout, timeout),
        MockDependentsSource::default().with_count("left-pad", Some(40)),
        progress.clone(),
    );

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(response.failed_lookup_count, 4);
    assert_eq!(response.report.assessed_count(), 1);
    assert!(response.report.is_clean());
    assert!(progress.contains("4 metric lookup(s) failed and fell back to defaults"));
}

#[tokio::test]
async fn test_unknown_dependents_never_flags_low_dependents() {
    let use_case = use_case(
        Policy::default(),
        r#"{"dependencies": {"left-pad": {"version": "1.3.0"}}}"#,
        MockRegistry::default().with_package("left-pad", left_pad()),
        MockDependentsSource::default().with_count("left-pad", None),
        MockProgressReporter::default(),
    );

    let report = use_case.execute(request()).await.unwrap().report;

    assert_eq!(report.totals().count(Warning::LowDependentsCount), 0);
    assert_eq!(report.totals().count(Warning::HighDependencyCount), 1);
}

#[tokio::test]
async fn test_problem_entries_are_resolved_and_assessed() {
    let progress = MockProgressReporter::default();
    let use_case = use_case(
        Policy::default(),
        r#"{
            "dependencies": {"lodash": {"version": "4.17.21"}, "left-pad": {"required": "^1.3.0", "missing": true}},
            "problems": [
                "missing: left-pad@^1.3.0, required by app@1.0.0",
                "missing: ghost@^2.0.0, required by app@1.0.0"
            ]
        }"#,
        MockRegistry::default()
            .with_package("lodash", PackageData::healthy("4.17.21"))
            .with_package("left-pad", left_pad())
            .with_range("left-pad", "1.3.0"),
        MockDependentsSource::default()
            .with_count("lodash", Some(150_000))
            .with_count("left-pad", Some(2)),
        progress.clone(),
    );

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(response.unresolved_count, 1);
    assert_eq!(response.report.assessed_count(), 3);
    let flagged: Vec<String> = response
        .report
        .entries()
        .iter()
        .map(|entry| entry.dependency().to_string())
        .collect();
    assert_eq!(flagged, vec!["left-pad@1.3.0"]);
    assert!(progress.contains("Failed to resolve version range '^2.0.0' of ghost"));
    assert!(progress.contains("✅ Detected 3 dependency(ies)"));
}

#[tokio::test]
async fn test_empty_listing_yields_empty_report() {
    let progress = MockProgressReporter::default();
    let use_case = use_case(
        Policy::default(),
        "{}",
        MockRegistry::default(),
        MockDependentsSource::default(),
        progress.clone(),
    );

    let response = use_case.execute(request()).await.unwrap();

    assert!(response.report.is_clean());
    assert_eq!(response.report.assessed_count(), 0);
    assert!(progress.contains("No dependencies to assess."));
}

#[tokio::test]
async fn test_invalid_listing_is_a_setup_failure() {
    let use_case = use_case(
        Policy::default(),
        "npm ERR! something went wrong",
        MockRegistry::default(),
        MockDependentsSource::default(),
        MockProgressReporter::default(),
    );

    let err = use_case.execute(request()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TrustError>(),
        Some(TrustError::DependencyListingFailed { .. })
    ));
    assert_eq!(ExitCode::for_error(&err), ExitCode::SetupFailure);
}

#[tokio::test]
async fn test_listing_failure_aborts_the_run() {
    let use_case: TestUseCase = AssessDependenciesUseCase::new(
        MockPolicyRepository::with_policy(Policy::default()),
        MockDependencyLister::failing(),
        MockRegistry::default(),
        MockDependentsSource::default(),
        MockProgressReporter::default(),
    );

    let err = use_case.execute(request()).await.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::SetupFailure);
}

#[tokio::test]
async fn test_policy_failure_stops_before_listing() {
    let lister = MockDependencyLister::new("{}");
    let calls = lister.calls.clone();
    let use_case: TestUseCase = AssessDependenciesUseCase::new(
        MockPolicyRepository::failing(),
        lister,
        MockRegistry::default(),
        MockDependentsSource::default(),
        MockProgressReporter::default(),
    );

    let err = use_case.execute(request()).await.unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigFailure);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_reports() {
    let use_case = use_case(
        Policy::default(),
        r#"{"dependencies": {"left-pad": {"version": "1.3.0"}, "lodash": {"version": "4.17.21"}}}"#,
        MockRegistry::default()
            .with_package("left-pad", left_pad())
            .with_package("lodash", PackageData::healthy("4.17.21")),
        MockDependentsSource::default()
            .with_count("left-pad", Some(2))
            .with_count("lodash", Some(150_000)),
        MockProgressReporter::default(),
    );

    let first = use_case.execute(request()).await.unwrap().report;
    let second = use_case.execute(request()).await.unwrap().report;

    assert_eq!(first, second);
}
