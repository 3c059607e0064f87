use crate::shared::error::TrustError;
use crate::shared::Result;

/// Maximum length for package names (npm registry limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 214;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// NewType wrapper for an npm package name with validation
///
/// Scoped names (`@scope/name`) are accepted; a `/` anywhere else is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(validation("Package name cannot be empty"));
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            return Err(validation(format!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            )));
        }

        let bare = match name.strip_prefix('@') {
            Some(scoped) => match scoped.split_once('/') {
                Some((scope, rest)) if !scope.is_empty() && !rest.is_empty() => {
                    format!("{}{}", scope, rest)
                }
                _ => {
                    return Err(validation(format!(
                        "Scoped package name '{}' must look like @scope/name",
                        name
                    )))
                }
            },
            None => name.clone(),
        };

        if !bare
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
        {
            return Err(validation(format!(
                "Package name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores, dots and tildes are allowed.",
                name
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for a concrete package version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            return Err(validation("Package version cannot be empty"));
        }

        if version.len() > MAX_VERSION_LENGTH {
            return Err(validation(format!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            )));
        }

        if !version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+'))
        {
            return Err(validation(format!(
                "Package version '{}' contains invalid characters. Only alphanumeric, dots, hyphens and plus are allowed.",
                version
            )));
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dependency of the assessed project.
///
/// The version is absent when a range from the fallback listing could not
/// be resolved; version-dependent rules are skipped for such dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    name: PackageName,
    version: Option<Version>,
}

impl DependencyRef {
    pub fn new(name: String, version: Option<String>) -> Result<Self> {
        Ok(Self {
            name: PackageName::new(name)?,
            version: version.map(Version::new).transpose()?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_ref().map(Version::as_str)
    }
}

impl std::fmt::Display for DependencyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => write!(f, "{}@<unresolved>", self.name),
        }
    }
}

fn validation(message: impl Into<String>) -> anyhow::Error {
    TrustError::Validation {
        message: message.into(),
    }
    .into()
}
