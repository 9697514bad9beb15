use anyhow::{Context, Result};
use dirs::config_dir;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure for repofolio
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// GitHub account and API settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Output document settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GitHubConfig {
    /// Account whose public repositories are exported
    #[serde(default = "default_account")]
    pub account: String,

    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

/// Output document configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Destination of the project document. The parent directory must exist.
    #[serde(default = "default_output_path")]
    pub path: String,

    /// On a failed fetch, keep the existing document and exit with an error
    /// instead of overwriting it with an empty one
    #[serde(default)]
    pub strict: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String, // "info"
}

// Default value functions
fn default_account() -> String {
    "dougdomingos".to_string()
}
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_output_path() -> String {
    "./data/projects.yaml".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations
impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            account: default_account(),
            api_url: default_api_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            strict: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to built-in defaults
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            tracing::debug!("No configuration at {:?}, using defaults", config_path);
            let mut config = Self::default();
            config.expand_paths()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        // Expand environment variables in paths
        config.expand_paths()?;

        Ok(config)
    }

    /// Get the default configuration file path (XDG compliant)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to get user config directory")?;

        Ok(config_dir.join("repofolio").join("config.yml"))
    }

    /// Expand `~` and environment variables in the output path
    pub fn expand_paths(&mut self) -> Result<()> {
        self.output.path = shellexpand::full(&self.output.path)
            .context("Failed to expand output path")?
            .into_owned();

        Ok(())
    }

    /// Destination of the project document
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output.path)
    }

    /// Base API URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.github.api_url.trim_end_matches('/')
    }
}
