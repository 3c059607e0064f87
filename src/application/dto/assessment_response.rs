use crate::trust_assessment::domain::AssessmentReport;

/// AssessmentResponse - Internal response DTO from the assessment use case
///
/// Carries the report plus the bookkeeping of how the run degraded, which
/// the report itself does not record.
#[derive(Debug, Clone)]
pub struct AssessmentResponse {
    pub report: AssessmentReport,
    /// Dependencies removed by the policy exclusion list
    pub excluded_count: usize,
    /// Dependencies whose version could not be resolved
    pub unresolved_count: usize,
    /// Metric lookups that failed and fell back to a default value
    pub failed_lookup_count: usize,
}

impl AssessmentResponse {
    pub fn new(
        report: AssessmentReport,
        excluded_count: usize,
        unresolved_count: usize,
        failed_lookup_count: usize,
    ) -> Self {
        Self {
            report,
            excluded_count,
            unresolved_count,
            failed_lookup_count,
        }
    }
}
