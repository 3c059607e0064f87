/// Console adapters for progress output and report presentation
mod progress_reporter;
mod stdout_presenter;

pub use progress_reporter::StderrProgressReporter;
pub use stdout_presenter::StdoutPresenter;
