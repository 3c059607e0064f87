/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (package manager, registry website,
/// policy file, console).
pub mod dependency_lister;
pub mod dependents_source;
pub mod output_presenter;
pub mod package_registry;
pub mod policy_repository;
pub mod progress_reporter;
pub mod report_formatter;

pub use dependency_lister::DependencyLister;
pub use dependents_source::DependentsSource;
pub use output_presenter::OutputPresenter;
pub use package_registry::PackageRegistry;
pub use policy_repository::PolicyRepository;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
