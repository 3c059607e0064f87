/// Use cases module containing application business logic orchestration
mod assess_dependencies;
mod collect_metrics;
mod resolve_dependencies;

pub use assess_dependencies::AssessDependenciesUseCase;
pub use collect_metrics::{CollectedMetrics, MetricsCollector};
pub use resolve_dependencies::{DependencyResolver, ResolvedDependencies};
