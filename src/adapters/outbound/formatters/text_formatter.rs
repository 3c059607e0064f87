use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::trust_assessment::domain::{AssessmentReport, DependencyAssessment};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// TextReportFormatter adapter rendering the report for a terminal
///
/// The summary is always rendered. Verbose mode adds one block per flagged
/// dependency before it, in the order the dependencies were resolved.
pub struct TextReportFormatter {
    verbose: bool,
    use_colors: bool,
}

impl TextReportFormatter {
    pub fn new(verbose: bool, use_colors: bool) -> Self {
        Self {
            verbose,
            use_colors,
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_entry(&self, out: &mut String, entry: &DependencyAssessment) -> std::fmt::Result {
        let dependency = entry.dependency();
        let name = if self.use_colors {
            dependency.to_string().bold().to_string()
        } else {
            dependency.to_string()
        };

        match entry.latest_version() {
            Some(latest) if entry.is_outdated() => writeln!(out, "{} (latest: {})", name, latest)?,
            _ => writeln!(out, "{}", name)?,
        }

        for warning in entry.warnings() {
            let tag = if self.use_colors {
                warning.tag().yellow().to_string()
            } else {
                warning.tag().to_string()
            };
            writeln!(out, "  ⚠️  {} - {}", tag, warning.description())?;
        }

        Ok(())
    }

    fn write_summary(&self, out: &mut String, report: &AssessmentReport) -> std::fmt::Result {
        writeln!(out, "{}", self.heading("Summary"))?;

        if report.is_clean() {
            let line = format!(
                "✅ No warnings for {} assessed package(s)",
                report.assessed_count()
            );
            if self.use_colors {
                writeln!(out, "{}", line.green())?;
            } else {
                writeln!(out, "{}", line)?;
            }
            return Ok(());
        }

        writeln!(
            out,
            "{} of {} assessed package(s) raised {} warning(s)",
            report.entries().len(),
            report.assessed_count(),
            report.totals().total()
        )?;
        for line in report.summary_lines() {
            writeln!(out, "  {}", line)?;
        }

        Ok(())
    }
}

impl ReportFormatter for TextReportFormatter {
    fn format(&self, report: &AssessmentReport) -> Result<String> {
        let mut out = String::new();

        if self.verbose && !report.is_clean() {
            writeln!(out, "{}", self.heading("Dependency trust report"))?;
            writeln!(out)?;
            for entry in report.entries() {
                self.write_entry(&mut out, entry)?;
                writeln!(out)?;
            }
        }

        self.write_summary(&mut out, report)?;
        Ok(out)
    }
}
