use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Ceilings for the `major.minor.patch` segments of a version.
///
/// A segment without a ceiling is never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCeilings {
    #[serde(
        default,
        deserialize_with = "lenient::threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub major: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub minor: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub patch: Option<u64>,
}

impl VersionCeilings {
    pub fn new(major: Option<u64>, minor: Option<u64>, patch: Option<u64>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Ceilings in segment order: major, minor, patch
    pub fn in_order(&self) -> [Option<u64>; 3] {
        [self.major, self.minor, self.patch]
    }
}

/// One threshold set: either the policy default or a per-package override.
///
/// A `None` field disables its rule. Zero and empty-string values in the
/// policy file are read as `None` too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    #[serde(
        default,
        deserialize_with = "lenient::threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependency_count_max: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependents_count_min: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub publish_frequency_max_days: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_segment_ceilings: Option<VersionCeilings>,
    #[serde(
        default,
        deserialize_with = "lenient::threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_age_days: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub flag_deprecation: Option<bool>,
}

impl Thresholds {
    /// Thresholds written to a freshly created policy file
    pub fn recommended() -> Self {
        Self {
            dependency_count_max: Some(10),
            dependents_count_min: Some(5),
            publish_frequency_max_days: Some(14),
            version_segment_ceilings: Some(VersionCeilings::new(Some(9), Some(99), Some(999))),
            min_age_days: Some(3),
            flag_deprecation: Some(true),
        }
    }
}

/// Assessment policy: default thresholds, per-package overrides and the
/// names excluded from assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default = "Thresholds::recommended")]
    pub default: Thresholds,
    #[serde(default)]
    pub excluded: BTreeSet<String>,
    #[serde(default)]
    pub custom: BTreeMap<String, Thresholds>,
    /// Captures unknown top-level keys so they can be warned about
    #[serde(flatten, skip_serializing)]
    pub unknown_fields: BTreeMap<String, serde_json::Value>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            default: Thresholds::recommended(),
            excluded: BTreeSet::new(),
            custom: BTreeMap::new(),
            unknown_fields: BTreeMap::new(),
        }
    }
}

impl Policy {
    /// Returns the threshold set that applies to `name`.
    ///
    /// A custom entry replaces the default set as a whole.
    pub fn resolve(&self, name: &str) -> &Thresholds {
        self.custom.get(name).unwrap_or(&self.default)
    }
}

/// Deserializers accepting numbers or numeric strings for thresholds.
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawThreshold {
        Whole(u64),
        Fractional(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Whole(u64),
        Text(String),
    }

    pub fn threshold<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<RawThreshold>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(RawThreshold::Whole(n)) => n,
            Some(RawThreshold::Fractional(f)) => whole_number(f).map_err(D::Error::custom)?,
            Some(RawThreshold::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                match text.parse::<u64>() {
                    Ok(n) => n,
                    Err(_) => {
                        let f = text.parse::<f64>().map_err(|_| {
                            D::Error::custom(format!("expected a number, found \"{}\"", text))
                        })?;
                        whole_number(f).map_err(D::Error::custom)?
                    }
                }
            }
        };

        Ok((value != 0).then_some(value))
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawFlag>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawFlag::Bool(b)) => Ok(Some(b)),
            Some(RawFlag::Whole(n)) => Ok(Some(n != 0)),
            Some(RawFlag::Text(text)) => match text.trim().to_lowercase().as_str() {
                "" => Ok(None),
                "true" | "yes" | "1" => Ok(Some(true)),
                "false" | "no" | "0" => Ok(Some(false)),
                other => Err(D::Error::custom(format!(
                    "expected true or false, found \"{}\"",
                    other
                ))),
            },
        }
    }

    fn whole_number(f: f64) -> Result<u64, String> {
        if f < 0.0 || f.fract() != 0.0 || !f.is_finite() {
            return Err(format!("expected a non-negative whole number, found {}", f));
        }
        Ok(f as u64)
    }
}
