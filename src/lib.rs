//! npm-trust - supply-chain trust assessment for npm dependencies
//!
//! This library lists a project's npm dependencies, collects registry
//! metrics for each of them and evaluates a configurable policy of
//! thresholds, producing a per-dependency warning report.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`trust_assessment`): Domain models, policy and pure assessment services
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Error types and file-safety checks
//!
//! # Example
//!
//! ```no_run
//! use npm_trust::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let project_path = PathBuf::from(".");
//! let use_case = AssessDependenciesUseCase::new(
//!     JsonPolicyFile::in_dir(&project_path),
//!     NpmCli::new(),
//!     NpmCli::new(),
//!     NpmWebsiteClient::new()?,
//!     StderrProgressReporter::new(),
//! );
//!
//! let response = use_case.execute(AssessmentRequest::new(project_path)).await?;
//! let output = TextReportFormatter::new(true, false).format(&response.report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod shared;
pub mod trust_assessment;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{StderrProgressReporter, StdoutPresenter};
    pub use crate::adapters::outbound::filesystem::{JsonPolicyFile, POLICY_FILE_NAME};
    pub use crate::adapters::outbound::formatters::TextReportFormatter;
    pub use crate::adapters::outbound::network::NpmWebsiteClient;
    pub use crate::adapters::outbound::package_manager::NpmCli;
    pub use crate::application::dto::{AssessmentRequest, AssessmentResponse};
    pub use crate::application::use_cases::AssessDependenciesUseCase;
    pub use crate::ports::outbound::{
        DependencyLister, DependentsSource, OutputPresenter, PackageRegistry, PolicyRepository,
        ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::error::{ExitCode, TrustError};
    pub use crate::shared::Result;
    pub use crate::trust_assessment::domain::{
        AssessmentReport, DependencyAssessment, DependencyRef, MetricSet, Policy, PublishingInfo,
        Thresholds, Timeline, VersionCeilings, Warning, WarningCounts,
    };
    pub use crate::trust_assessment::services::{AssessmentRules, ReportAggregator};
}
