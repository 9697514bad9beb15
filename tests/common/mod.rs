//! Common test utilities and helpers for repofolio tests
#![allow(dead_code)]

use assert_fs::prelude::*;
use assert_fs::TempDir;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Isolated working directory with its own XDG config home
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        temp_dir
            .child("data")
            .create_dir_all()
            .expect("Failed to create data dir");
        temp_dir
            .child("xdg")
            .create_dir_all()
            .expect("Failed to create config home");

        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The default relative destination, resolved against this environment
    pub fn default_output(&self) -> PathBuf {
        self.path().join("data").join("projects.yaml")
    }

    pub fn create_test_config(&self, content: &str) -> PathBuf {
        let config = self.temp_dir.child("config.yml");
        config.write_str(content).expect("Failed to write test config");
        config.path().to_path_buf()
    }

    /// Run the binary inside this environment without blocking the async runtime
    pub async fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_repofolio"));
        command
            .args(args)
            .current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("HOME", self.path())
            .env_remove("RUST_LOG");

        tokio::task::spawn_blocking(move || command.output().expect("Failed to execute command"))
            .await
            .expect("Command task panicked")
    }
}

/// Mock GitHub repository data for testing
#[derive(Debug, Clone)]
pub struct MockRepository {
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub updated_at: String,
}

impl MockRepository {
    pub fn new(name: &str, owner: &str) -> Self {
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
            description: Some(format!("About {}", name)),
            topics: Vec::new(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    pub fn updated(mut self, updated_at: &str) -> Self {
        self.updated_at = updated_at.to_string();
        self
    }

    pub fn without_description(mut self) -> Self {
        self.description = None;
        self
    }

    pub fn with_topics(mut self, topics: &[&str]) -> Self {
        self.topics = topics.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }

    /// Render the repository the way the listing endpoint does
    pub fn to_json(&self) -> Value {
        json!({
            "id": 1296269,
            "name": self.name,
            "full_name": format!("{}/{}", self.owner, self.name),
            "private": false,
            "html_url": self.html_url(),
            "description": self.description,
            "fork": false,
            "topics": self.topics,
            "updated_at": self.updated_at,
            "pushed_at": self.updated_at,
        })
    }
}

/// Test data sets for common scenarios
pub struct TestDataSets;

impl TestDataSets {
    /// Repositories in service order, deliberately not sorted by update time
    pub fn mixed_repositories() -> Vec<MockRepository> {
        vec![
            MockRepository::new("dotfiles", "dougdomingos")
                .updated("2022-11-03T08:15:00Z")
                .without_description(),
            MockRepository::new("site", "dougdomingos")
                .updated("2024-06-20T17:45:12Z")
                .with_topics(&["hugo", "blog"]),
            MockRepository::new("parser", "dougdomingos")
                .updated("2023-09-01T00:00:00Z")
                .with_topics(&["rust"]),
        ]
    }
}

/// Serve `repos` from `/users/{account}/repos`
pub async fn mount_listing(server: &MockServer, account: &str, repos: &[MockRepository]) {
    let body: Vec<Value> = repos.iter().map(MockRepository::to_json).collect();

    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", account)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer `/users/{account}/repos` with a bare status
pub async fn mount_status(server: &MockServer, account: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", account)))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(server)
        .await;
}

/// Assertion helpers for test validation
pub fn assert_contains_all(text: &str, expected: &[&str]) {
    for item in expected {
        assert!(
            text.contains(item),
            "Expected text to contain '{}', but it didn't. Text: {}",
            item,
            text
        );
    }
}
