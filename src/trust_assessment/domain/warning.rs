use std::fmt;

/// A finding attached to one dependency by one assessment rule.
///
/// The variant order is the rule evaluation order, which is also the order
/// categories are listed in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Warning {
    SuspiciousVersion,
    LowPublishFrequency,
    HighDependencyCount,
    LowDependentsCount,
    TooRecentlyPublished,
    Deprecated,
}

impl Warning {
    /// Every category, in evaluation order
    pub const ALL: [Warning; 6] = [
        Warning::SuspiciousVersion,
        Warning::LowPublishFrequency,
        Warning::HighDependencyCount,
        Warning::LowDependentsCount,
        Warning::TooRecentlyPublished,
        Warning::Deprecated,
    ];

    /// Stable machine-readable tag
    pub fn tag(self) -> &'static str {
        match self {
            Warning::SuspiciousVersion => "SUSPICIOUS_VERSION",
            Warning::LowPublishFrequency => "LOW_PUBLISH_FREQUENCY",
            Warning::HighDependencyCount => "HIGH_DEPENDENCY_COUNT",
            Warning::LowDependentsCount => "LOW_DEPENDENTS_COUNT",
            Warning::TooRecentlyPublished => "TOO_RECENTLY_PUBLISHED",
            Warning::Deprecated => "DEPRECATED",
        }
    }

    /// Human-readable description used in summary lines
    pub fn description(self) -> &'static str {
        match self {
            Warning::SuspiciousVersion => "suspicious version number",
            Warning::LowPublishFrequency => "infrequent releases",
            Warning::HighDependencyCount => "too many dependencies",
            Warning::LowDependentsCount => "few dependents",
            Warning::TooRecentlyPublished => "recently published",
            Warning::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
