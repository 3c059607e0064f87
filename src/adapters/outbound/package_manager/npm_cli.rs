use crate::ports::outbound::{DependencyLister, PackageRegistry};
use crate::shared::error::TrustError;
use crate::shared::Result;
use crate::trust_assessment::domain::Timeline;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

const VIEW_TIMEOUT: Duration = Duration::from_secs(30);
const LISTING_TIMEOUT: Duration = Duration::from_secs(120);

#[cfg(windows)]
const NPM_PROGRAM: &str = "npm.cmd";
#[cfg(not(windows))]
const NPM_PROGRAM: &str = "npm";

/// NpmCli adapter driving the `npm` executable
///
/// Implements both the DependencyLister port (`npm ls --json`) and the
/// PackageRegistry port (`npm view <spec> <field> --json`). Every invocation
/// runs under a timeout and the child is killed if the timeout fires.
pub struct NpmCli {
    program: PathBuf,
    view_timeout: Duration,
    listing_timeout: Duration,
}

impl NpmCli {
    pub fn new() -> Self {
        Self::with_program(NPM_PROGRAM)
    }

    /// Uses a specific npm executable instead of the one on PATH
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            view_timeout: VIEW_TIMEOUT,
            listing_timeout: LISTING_TIMEOUT,
        }
    }

    /// Overrides the `npm view` and `npm ls` timeouts
    pub fn with_timeouts(mut self, view_timeout: Duration, listing_timeout: Duration) -> Self {
        self.view_timeout = view_timeout;
        self.listing_timeout = listing_timeout;
        self
    }

    async fn run(
        &self,
        args: &[&str],
        working_dir: Option<&Path>,
        timeout: Duration,
    ) -> Result<Output> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|e| {
            anyhow::anyhow!("could not spawn '{}': {}", self.program.display(), e)
        })?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(anyhow::anyhow!(
                "'npm {}' failed to run: {}",
                args.join(" "),
                e
            )),
            Err(_) => anyhow::bail!(
                "'npm {}' timed out after {:?}",
                args.join(" "),
                timeout
            ),
        }
    }

    /// Runs `npm view <spec> <field> --json` and returns its stdout
    async fn view(&self, spec: &str, field: &str) -> Result<String> {
        validate_view_spec(spec)?;

        let output = self
            .run(&["view", spec, field, "--json"], None, self.view_timeout)
            .await?;
        check_npm_output(&output, &format!("npm view {} {}", spec, field))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for NpmCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DependencyLister for NpmCli {
    async fn list_dependencies(&self, project_path: &Path) -> Result<String> {
        let listing_failed = |details: String| TrustError::DependencyListingFailed {
            path: project_path.to_path_buf(),
            details,
        };

        let output = self
            .run(&["ls", "--json"], Some(project_path), self.listing_timeout)
            .await
            .map_err(|e| listing_failed(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(listing_failed(format!(
                "npm ls produced no output ({}): {}",
                output.status,
                stderr.trim()
            ))
            .into());
        }

        // npm exits non-zero when the tree has problems but still prints the listing
        if !output.status.success() {
            log::debug!("npm ls exited with {}, using its JSON output", output.status);
        }

        Ok(stdout)
    }
}

#[async_trait]
impl PackageRegistry for NpmCli {
    async fn fetch_timeline(&self, package_name: &str) -> Result<Timeline> {
        let raw = self.view(package_name, "time").await?;
        parse_timeline(&raw)
    }

    async fn fetch_dependency_count(&self, package_name: &str, version: Option<&str>) -> Result<u64> {
        let raw = self
            .view(&package_spec(package_name, version), "dependencies")
            .await?;
        parse_dependency_count(&raw)
    }

    async fn fetch_deprecation(&self, package_name: &str, version: Option<&str>) -> Result<Option<String>> {
        let raw = self
            .view(&package_spec(package_name, version), "deprecated")
            .await?;
        parse_deprecation(&raw)
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String> {
        let raw = self.view(package_name, "version").await?;
        parse_version_list(&raw)
    }

    async fn resolve_range(&self, package_name: &str, range: &str) -> Result<String> {
        let raw = self
            .view(&package_spec(package_name, Some(range)), "version")
            .await?;
        parse_version_list(&raw)
            .map_err(|e| anyhow::anyhow!("no published version satisfies the range: {}", e))
    }
}

fn package_spec(package_name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{}@{}", package_name, version),
        None => package_name.to_string(),
    }
}

/// Rejects specs npm would read as an option
fn validate_view_spec(spec: &str) -> Result<()> {
    if spec.is_empty() || spec.starts_with('-') {
        anyhow::bail!("Security: '{}' is not a valid package specifier", spec);
    }
    Ok(())
}

fn check_npm_output(output: &Output, operation: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "{} failed with {}: {}",
            operation,
            output.status,
            stderr.trim()
        );
    }
    Ok(())
}

/// Parses `npm view <name> time --json`; entries that are not timestamps are skipped
fn parse_timeline(raw: &str) -> Result<Timeline> {
    let entries: BTreeMap<String, Value> = serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("publish timeline is not a JSON object: {}", e))?;

    let mut timeline = Timeline::new();
    for (key, value) in entries {
        let Some(text) = value.as_str() else {
            continue;
        };
        match DateTime::parse_from_rfc3339(text) {
            Ok(time) => {
                timeline.insert(key, time.with_timezone(&Utc));
            }
            Err(e) => log::debug!("Skipping timeline entry '{}': {}", key, e),
        }
    }

    Ok(timeline)
}

/// npm prints nothing for a release without dependencies
fn parse_dependency_count(raw: &str) -> Result<u64> {
    if raw.trim().is_empty() {
        return Ok(0);
    }

    let value: Value = serde_json::from_str(raw)?;
    // Several releases matched; the last one is the highest
    let declared = if let Value::Array(releases) = value {
        releases.into_iter().last().unwrap_or(Value::Null)
    } else {
        value
    };

    match declared {
        Value::Object(dependencies) => Ok(dependencies.len() as u64),
        Value::Null => Ok(0),
        other => anyhow::bail!("unexpected dependencies value: {}", other),
    }
}

fn parse_deprecation(raw: &str) -> Result<Option<String>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(raw)?;
    let message = match value {
        Value::String(message) => Some(message),
        Value::Array(releases) => releases
            .last()
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };

    Ok(message.filter(|m| !m.trim().is_empty()))
}

/// Parses a `version` answer: one string, or a list in ascending order
fn parse_version_list(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        anyhow::bail!("npm returned no version");
    }

    match serde_json::from_str::<Value>(raw)? {
        Value::String(version) => Ok(version),
        Value::Array(versions) => versions
            .iter()
            .rev()
            .find_map(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("npm returned an empty version list")),
        other => anyhow::bail!("unexpected version value: {}", other),
    }
}

/// Writes an executable stand-in for npm that never answers
#[cfg(all(test, unix))]
pub(crate) fn stalled_npm(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("npm");
    std::fs::write(&script, "#!/bin/sh\nexec sleep 30\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}
