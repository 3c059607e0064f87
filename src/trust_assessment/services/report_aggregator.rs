use crate::trust_assessment::domain::{
    AssessmentReport, DependencyAssessment, DependencyRef, Warning, WarningCounts,
};

/// ReportAggregator - the single accumulation point of an assessment run
///
/// Dependencies must be recorded in resolver order. Only dependencies with at
/// least one warning become report entries, and every recorded warning is
/// counted exactly once in the totals.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    entries: Vec<DependencyAssessment>,
    totals: WarningCounts,
    assessed_count: usize,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        dependency: DependencyRef,
        warnings: Vec<Warning>,
        latest_version: Option<String>,
    ) {
        self.assessed_count += 1;

        if warnings.is_empty() {
            return;
        }

        for warning in &warnings {
            self.totals.increment(*warning);
        }
        self.entries
            .push(DependencyAssessment::new(dependency, warnings, latest_version));
    }

    pub fn finish(self) -> AssessmentReport {
        AssessmentReport::new(self.entries, self.totals, self.assessed_count)
    }
}
