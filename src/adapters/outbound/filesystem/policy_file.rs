use crate::ports::outbound::PolicyRepository;
use crate::shared::error::TrustError;
use crate::shared::security::{read_checked_file, MAX_POLICY_FILE_SIZE};
use crate::shared::Result;
use crate::trust_assessment::domain::Policy;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name of the policy, looked up in the working directory
pub const POLICY_FILE_NAME: &str = "npm-trust.config.json";

/// JsonPolicyFile adapter storing the policy as pretty-printed JSON
///
/// On first use the default policy is written to disk so that users have a
/// file to edit. An existing file is never rewritten.
pub struct JsonPolicyFile {
    path: PathBuf,
}

impl JsonPolicyFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Policy file inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(POLICY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing(&self) -> Result<Policy> {
        let content = read_checked_file(&self.path, "policy file", MAX_POLICY_FILE_SIZE).map_err(
            |e| TrustError::PolicyReadError {
                path: self.path.clone(),
                details: e.to_string(),
            },
        )?;

        let policy: Policy =
            serde_json::from_str(&content).map_err(|e| TrustError::PolicyParseError {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        warn_unknown_fields(&policy);
        Ok(policy)
    }

    fn create_default(&self) -> Result<Policy> {
        let policy = Policy::default();
        let write_failed = |details: String| TrustError::PolicyWriteError {
            path: self.path.clone(),
            details,
        };

        let mut content =
            serde_json::to_string_pretty(&policy).map_err(|e| write_failed(e.to_string()))?;
        content.push('\n');

        // create_new refuses to follow a link planted at the path
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| write_failed(e.to_string()))?;
        file.write_all(content.as_bytes())
            .map_err(|e| write_failed(e.to_string()))?;

        log::info!("Created default policy file {}", self.path.display());
        Ok(policy)
    }
}

impl PolicyRepository for JsonPolicyFile {
    fn load(&self) -> Result<Policy> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => self.read_existing(),
            Err(e) if e.kind() == ErrorKind::NotFound => self.create_default(),
            Err(e) => Err(TrustError::PolicyReadError {
                path: self.path.clone(),
                details: e.to_string(),
            }
            .into()),
        }
    }
}

fn warn_unknown_fields(policy: &Policy) {
    for key in policy.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown policy field '{}' will be ignored.",
            key
        );
    }
}
