pub mod dependency;
pub mod metrics;
pub mod policy;
pub mod report;
pub mod warning;

pub use dependency::{DependencyRef, PackageName, Version};
pub use metrics::{MetricSet, PublishingInfo, Timeline};
pub use policy::{Policy, Thresholds, VersionCeilings};
pub use report::{AssessmentReport, DependencyAssessment, WarningCounts};
pub use warning::Warning;
