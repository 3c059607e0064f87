/// Mock implementations for testing
mod mock_dependency_lister;
mod mock_dependents_source;
mod mock_package_registry;
mod mock_progress_reporter;

pub use mock_dependency_lister::MockDependencyLister;
pub use mock_dependents_source::MockDependentsSource;
pub use mock_package_registry::{MockPackage, MockPackageRegistry};
pub use mock_progress_reporter::MockProgressReporter;
