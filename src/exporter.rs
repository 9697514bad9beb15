//! Export pipeline - fetch, order, project and persist
//!
//! Runs the single linear workflow: one listing request for the configured
//! account, then a whole-file overwrite of the project document.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::github::{FetchOutcome, GitHubClient};
use crate::project::{build_project_document, write_project_document, ProjectEntry};

/// Results from a complete export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub account: String,
    pub output_path: PathBuf,
    pub entries_written: usize,
    /// False when a strict run left the existing document untouched
    pub document_written: bool,
    /// Set when the service answered with a non-200 status
    pub failed_status: Option<StatusCode>,
    pub duration: Duration,
}

impl ExportSummary {
    pub fn fetch_failed(&self) -> bool {
        self.failed_status.is_some()
    }
}

/// Drives the export for one account
#[derive(Debug, Clone)]
pub struct Exporter {
    config: Config,
    client: GitHubClient,
}

impl Exporter {
    pub fn new(config: Config) -> Result<Self> {
        let client = GitHubClient::new(&config)?;
        Ok(Self { config, client })
    }

    pub fn account(&self) -> &str {
        &self.config.github.account
    }

    /// Fetch the configured account's repositories
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        self.client
            .fetch_repositories(self.account())
            .await
            .context("Failed to fetch repositories")
    }

    /// Fetch and order entries without writing anything
    pub async fn preview(&self) -> Result<(Vec<ProjectEntry>, Option<StatusCode>)> {
        let outcome = self.fetch().await?;
        let failed_status = outcome.failed_status();
        Ok((build_project_document(outcome.into_records()), failed_status))
    }

    /// Run the full export.
    ///
    /// A non-200 response overwrites the document with an empty sequence,
    /// unless `output.strict` is set, in which case the existing document is
    /// left untouched. Either way the summary records the status so callers
    /// can tell it apart from an account without repositories.
    pub async fn run(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let output_path = self.config.output_path();

        info!("Exporting repositories for {}", self.account());

        let outcome = self.fetch().await?;
        let failed_status = outcome.failed_status();

        if failed_status.is_some() && self.config.output.strict {
            debug!("Keeping {} after failed fetch", output_path.display());
            return Ok(ExportSummary {
                account: self.account().to_string(),
                output_path,
                entries_written: 0,
                document_written: false,
                failed_status,
                duration: start_time.elapsed(),
            });
        }

        let entries_written = write_project_document(outcome.into_records(), &output_path)?;

        info!(
            "Wrote {} projects to {}",
            entries_written,
            output_path.display()
        );

        Ok(ExportSummary {
            account: self.account().to_string(),
            output_path,
            entries_written,
            document_written: true,
            failed_status,
            duration: start_time.elapsed(),
        })
    }
}
