use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// AssessmentRequest - Internal request DTO for the assessment use case
#[derive(Debug, Clone)]
pub struct AssessmentRequest {
    /// Directory in which the package manager lists dependencies
    pub project_path: PathBuf,
    /// Reference time for every age and interval computed during the run
    pub evaluated_at: DateTime<Utc>,
}

impl AssessmentRequest {
    /// Creates a request evaluated against the current time
    pub fn new(project_path: PathBuf) -> Self {
        Self::with_evaluation_time(project_path, Utc::now())
    }

    pub fn with_evaluation_time(project_path: PathBuf, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            project_path,
            evaluated_at,
        }
    }
}
