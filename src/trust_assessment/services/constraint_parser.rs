use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// `<prefix>: <name>@<range>,` as found in npm listing problems,
/// e.g. `missing: left-pad@^1.3.0, required by app@1.0.0`
static CONSTRAINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^:]+:\s*(?P<name>@?[^@\s,]+)@(?P<range>[^,]+),").expect("invalid regex")
});

/// Marker identifying a range that points at a local path
const LOCAL_RANGE_MARKER: &str = "file";

/// A `name@range` requirement extracted from a listing problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub name: String,
    pub range: String,
}

impl VersionConstraint {
    /// True when the range refers to a local directory or tarball
    /// rather than to registry versions.
    pub fn is_local_path(&self) -> bool {
        self.range.contains(LOCAL_RANGE_MARKER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintParseError {
    #[error("Unparseable dependency problem: \"{text}\"")]
    Unparseable { text: String },
}

/// Parses the free-text problem descriptions of an npm listing
pub struct ConstraintParser;

impl ConstraintParser {
    pub fn parse(text: &str) -> Result<VersionConstraint, ConstraintParseError> {
        let captures = CONSTRAINT_REGEX
            .captures(text.trim())
            .ok_or_else(|| ConstraintParseError::Unparseable {
                text: text.to_string(),
            })?;

        let name = captures.name("name").map(|m| m.as_str().to_string());
        let range = captures.name("range").map(|m| m.as_str().trim().to_string());

        match (name, range) {
            (Some(name), Some(range)) if !range.is_empty() => Ok(VersionConstraint { name, range }),
            _ => Err(ConstraintParseError::Unparseable {
                text: text.to_string(),
            }),
        }
    }
}
