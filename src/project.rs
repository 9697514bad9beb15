//! Project document model and serialization
//!
//! A project document is a YAML sequence of [`ProjectEntry`] values, most
//! recently updated repository first, consumed by static site generators.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::github::RemoteRepository;

/// One repository as it appears in the project document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub link: String,
    pub info: ProjectInfo,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub title: String,
    /// Rendered as `null` when the repository has no description
    pub description: Option<String>,
}

impl From<RemoteRepository> for ProjectEntry {
    fn from(repo: RemoteRepository) -> Self {
        Self {
            link: repo.html_url,
            info: ProjectInfo {
                title: repo.name,
                description: repo.description,
            },
            tags: repo.topics,
        }
    }
}

/// Order records most recently updated first and project them into entries.
///
/// Timestamps are compared as raw strings. The sort is stable, so records
/// with equal timestamps keep the order the service returned them in.
pub fn build_project_document(mut records: Vec<RemoteRepository>) -> Vec<ProjectEntry> {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    records.into_iter().map(ProjectEntry::from).collect()
}

/// Serialize entries as a block-style YAML sequence
pub fn render_project_document(entries: &[ProjectEntry]) -> Result<String> {
    serde_yaml::to_string(entries).context("Failed to serialize project document")
}

/// Build the document from `records` and overwrite `path` with it.
///
/// The parent directory of `path` is not created. Returns the number of
/// entries written.
pub fn write_project_document(records: Vec<RemoteRepository>, path: &Path) -> Result<usize> {
    let entries = build_project_document(records);
    let content = render_project_document(&entries)?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write project document: {:?}", path))?;

    debug!("Wrote {} entries to {:?}", entries.len(), path);
    Ok(entries.len())
}
