use crate::shared::Result;
use crate::trust_assessment::domain::AssessmentReport;

/// ReportFormatter port for rendering an assessment report
pub trait ReportFormatter {
    /// Renders the report as text ready for presentation
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn format(&self, report: &AssessmentReport) -> Result<String>;
}
