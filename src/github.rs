use anyhow::{anyhow, Context, Result};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;

const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";
const MAX_ACCOUNT_LEN: usize = 39;

/// One repository object from `GET /users/{account}/repos`.
///
/// Only the fields the project document needs are decoded; the rest of the
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRepository {
    pub html_url: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub topics: Vec<String>,
    /// ISO-8601 timestamp, kept verbatim
    pub updated_at: String,
}

/// Result of a repository listing request
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The service answered 200 with this listing, in service order
    Fetched(Vec<RemoteRepository>),
    /// The service answered with a non-200 status
    Failed { status: StatusCode },
}

impl FetchOutcome {
    /// Collapse a failed fetch into an empty listing
    pub fn into_records(self) -> Vec<RemoteRepository> {
        match self {
            FetchOutcome::Fetched(records) => records,
            FetchOutcome::Failed { .. } => Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed { .. })
    }

    pub fn failed_status(&self) -> Option<StatusCode> {
        match self {
            FetchOutcome::Failed { status } => Some(*status),
            FetchOutcome::Fetched(_) => None,
        }
    }
}

/// Unauthenticated client for the public repository listing
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a client pointed at the configured API
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_base: config.api_base().to_string(),
        })
    }

    /// Listing endpoint for an account
    pub fn repos_url(&self, account: &str) -> String {
        format!("{}/users/{}/repos", self.api_base, account)
    }

    /// Fetch the public repositories of `account` with a single request.
    ///
    /// Non-200 statuses come back as [`FetchOutcome::Failed`]. Transport
    /// failures and undecodable bodies are errors.
    pub async fn fetch_repositories(&self, account: &str) -> Result<FetchOutcome> {
        validate_account(account)?;

        let url = self.repos_url(account);
        debug!("Fetching repositories from {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .with_context(|| format!("Failed to request repositories for {}", account))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, account, "Repository listing request was not successful");
            return Ok(FetchOutcome::Failed { status });
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read repository listing for {}", account))?;

        let records: Vec<RemoteRepository> = serde_json::from_str(&body)
            .with_context(|| format!("Unexpected repository listing format for {}", account))?;

        info!("Found {} repositories for {}", records.len(), account);
        Ok(FetchOutcome::Fetched(records))
    }
}

/// Check an account name against the service's username rules
pub fn validate_account(account: &str) -> Result<()> {
    if account.is_empty() {
        return Err(anyhow!("Account name must not be empty"));
    }

    if account.len() > MAX_ACCOUNT_LEN {
        return Err(anyhow!(
            "Account name '{}' is longer than {} characters",
            account,
            MAX_ACCOUNT_LEN
        ));
    }

    if !account.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(anyhow!(
            "Account name '{}' may only contain ASCII letters, digits and hyphens",
            account
        ));
    }

    if account.starts_with('-') || account.ends_with('-') {
        return Err(anyhow!(
            "Account name '{}' must not start or end with a hyphen",
            account
        ));
    }

    Ok(())
}
