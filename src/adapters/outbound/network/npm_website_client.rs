use crate::ports::outbound::DependentsSource;
use crate::shared::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://www.npmjs.com/package";

static DEPENDENTS_COUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""dependentsCount"\s*:\s*(\d+)"#).expect("invalid regex"));

#[derive(Debug, Error)]
enum PageError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status code {status}")]
    Status { url: String, status: StatusCode },
}

impl PageError {
    /// Network errors, timeouts, server errors and rate limiting are worth another try
    fn is_transient(&self) -> bool {
        match self {
            PageError::Request { .. } => true,
            PageError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
        }
    }
}

/// NpmWebsiteClient adapter reading the dependents count from package pages
///
/// The npm registry API does not expose dependents, so the count is scanned
/// out of the embedded page state of `https://www.npmjs.com/package/<name>`.
pub struct NpmWebsiteClient {
    client: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl NpmWebsiteClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client for a different package page root (mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("npm-trust/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_attempts: 2,
            retry_delay: Duration::from_millis(500),
        })
    }

    fn package_url(&self, package_name: &str) -> String {
        format!("{}/{}", self.base_url, encode_package_path(package_name))
    }

    async fn fetch_page(&self, url: &str) -> std::result::Result<String, PageError> {
        let request_failed = |source| PageError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(request_failed)
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.fetch_page(url).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    log::debug!("Retrying after transient failure: {}", e);
                    tokio::time::sleep(self.retry_delay * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl DependentsSource for NpmWebsiteClient {
    async fn fetch_dependents_count(&self, package_name: &str) -> Result<Option<u64>> {
        let url = self.package_url(package_name);
        let page = self.fetch_with_retry(&url).await?;
        Ok(extract_dependents_count(&page))
    }
}

/// Finds the `"dependentsCount": <n>` marker in a package page
pub fn extract_dependents_count(page: &str) -> Option<u64> {
    DEPENDENTS_COUNT_REGEX
        .captures(page)
        .and_then(|captures| captures[1].parse().ok())
}

/// Encodes each path segment; the scope marker `@` stays literal
fn encode_package_path(package_name: &str) -> String {
    package_name
        .split('/')
        .map(|segment| match segment.strip_prefix('@') {
            Some(scope) => format!("@{}", urlencoding::encode(scope)),
            None => urlencoding::encode(segment).into_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
