//! repofolio - GitHub repository list exporter
//!
//! repofolio fetches an account's public repositories from the GitHub REST API
//! and writes them as a YAML project list for static site generators.
//!
//! ## Modules
//!
//! - [`config`]: Configuration management and parsing
//! - [`github`]: Repository listing client and response model
//! - [`project`]: Project document model, ordering and serialization
//! - [`exporter`]: The fetch-and-write pipeline

pub mod config;
pub mod exporter;
pub mod github;
pub mod project;

pub use config::Config;
pub use exporter::{ExportSummary, Exporter};
pub use github::{FetchOutcome, GitHubClient, RemoteRepository};
pub use project::{ProjectEntry, ProjectInfo};
