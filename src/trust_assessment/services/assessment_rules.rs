use crate::trust_assessment::domain::{MetricSet, Thresholds, VersionCeilings, Warning};
use chrono::{DateTime, Utc};

/// AssessmentRules - the pure predicate rules of a trust assessment
///
/// Every rule compares one metric with one threshold and yields at most one
/// warning. A rule is skipped when its threshold is disabled or its input is
/// unknown. Rules hold no state, so evaluating the same metrics twice yields
/// the same warnings.
pub struct AssessmentRules;

impl AssessmentRules {
    /// Evaluates every rule in display order:
    /// version, publish frequency, dependency count, dependents count, age,
    /// deprecation.
    pub fn evaluate(metrics: &MetricSet, thresholds: &Thresholds, now: DateTime<Utc>) -> Vec<Warning> {
        let publishing = &metrics.publishing;

        [
            metrics.dependency.version().and_then(|version| {
                thresholds
                    .version_segment_ceilings
                    .as_ref()
                    .and_then(|ceilings| Self::assess_version(version, ceilings))
            }),
            Self::assess_publish_frequency(
                publishing.avg_publish_interval_days(),
                thresholds.publish_frequency_max_days,
            ),
            Self::assess_dependency_count(
                metrics.transitive_dependency_count,
                thresholds.dependency_count_max,
            ),
            Self::assess_dependents_count(metrics.dependents_count, thresholds.dependents_count_min),
            Self::assess_age(publishing.age_days(now), thresholds.min_age_days),
            Self::assess_deprecation(
                metrics.deprecation_message.as_deref(),
                thresholds.flag_deprecation,
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Flags versions whose major, minor or patch segment reaches its ceiling.
    ///
    /// Segments are checked in that order and checking stops at the first hit.
    /// A segment is read from its leading digits (`3-beta` is 3); segments
    /// without digits or without a ceiling are not compared.
    pub fn assess_version(version: &str, ceilings: &VersionCeilings) -> Option<Warning> {
        let mut segments = version.trim_start_matches('v').split('.');

        for ceiling in ceilings.in_order() {
            let segment = segments.next()?;
            let (Some(ceiling), Some(value)) = (ceiling, leading_number(segment)) else {
                continue;
            };
            if value >= ceiling {
                return Some(Warning::SuspiciousVersion);
            }
        }

        None
    }

    /// Flags packages released less often than every `max_days` days on average
    pub fn assess_publish_frequency(avg_interval_days: Option<f64>, max_days: Option<u64>) -> Option<Warning> {
        let (interval, max_days) = (avg_interval_days?, max_days?);
        (interval > max_days as f64).then_some(Warning::LowPublishFrequency)
    }

    pub fn assess_dependency_count(count: u64, max: Option<u64>) -> Option<Warning> {
        (count > max?).then_some(Warning::HighDependencyCount)
    }

    /// Flags packages with fewer dependents than `min`.
    ///
    /// An unknown count is never flagged; it is not the same as zero.
    pub fn assess_dependents_count(count: Option<u64>, min: Option<u64>) -> Option<Warning> {
        (count? < min?).then_some(Warning::LowDependentsCount)
    }

    pub fn assess_age(age_days: Option<f64>, min_days: Option<u64>) -> Option<Warning> {
        let (age, min_days) = (age_days?, min_days?);
        (age < min_days as f64).then_some(Warning::TooRecentlyPublished)
    }

    pub fn assess_deprecation(message: Option<&str>, flag: Option<bool>) -> Option<Warning> {
        let flagged = flag? && message.is_some_and(|m| !m.trim().is_empty());
        flagged.then_some(Warning::Deprecated)
    }
}

fn leading_number(segment: &str) -> Option<u64> {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment.get(..end).and_then(|digits| digits.parse().ok())
}
