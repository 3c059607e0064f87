use super::constraint_parser::{ConstraintParseError, ConstraintParser, VersionConstraint};
use crate::shared::Result;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct RawListing {
    #[serde(default)]
    dependencies: Map<String, Value>,
    #[serde(default)]
    problems: Vec<String>,
}

/// A dependency listing split into the entries npm resolved itself and the
/// problem constraints that still need a registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyListing {
    /// `(name, version)` pairs taken from the installed tree, in listing order
    pub resolved: Vec<(String, String)>,
    /// Parsed problem entries, in listing order
    pub constraints: Vec<std::result::Result<VersionConstraint, ConstraintParseError>>,
}

impl DependencyListing {
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.constraints.is_empty()
    }
}

/// Parses the JSON produced by `npm ls --json`
pub struct ListingParser;

impl ListingParser {
    /// Parses a raw listing.
    ///
    /// Top-level `dependencies` entries without a `version` (npm marks missing
    /// packages that way) are left to the `problems` path.
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON object
    pub fn parse(raw: &str) -> Result<DependencyListing> {
        let listing: RawListing = serde_json::from_str(raw)
            .map_err(|e| anyhow::anyhow!("dependency listing is not valid JSON: {}", e))?;

        let resolved = listing
            .dependencies
            .iter()
            .filter_map(|(name, entry)| {
                entry
                    .get("version")
                    .and_then(Value::as_str)
                    .map(|version| (name.clone(), version.to_string()))
            })
            .collect();

        let constraints = listing
            .problems
            .iter()
            .map(|problem| ConstraintParser::parse(problem))
            .collect();

        Ok(DependencyListing {
            resolved,
            constraints,
        })
    }
}
