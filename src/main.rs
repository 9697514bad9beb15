use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repofolio::{Config, Exporter};

#[derive(Parser)]
#[command(name = "repofolio")]
#[command(about = "Export a GitHub account's public repositories as a YAML project list")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (defaults to XDG config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Account whose repositories are exported
    #[arg(short, long, global = true)]
    account: Option<String>,

    /// Destination of the project document
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Exit with an error when the repository listing request fails
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch repositories and write the project document (default)
    Export,

    /// Print the entries that would be exported without writing them
    List {
        /// Show entry details
        #[arg(long)]
        details: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_logging(cli.verbose, &config.logging.level);

    info!("Starting repofolio v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        None | Some(Commands::Export) => cmd_export(&config).await,
        Some(Commands::List { details }) => cmd_list(details, &config).await,
    }
}

/// Initialize logging on stderr; RUST_LOG takes precedence over flags and config
fn init_logging(verbose: bool, level: &str) {
    let default_level = if verbose { "debug" } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load configuration from the given path or default location, then apply CLI overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };

    if let Some(account) = &cli.account {
        config.github.account = account.clone();
    }
    if let Some(api_url) = &cli.api_url {
        config.github.api_url = api_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
        config.expand_paths()?;
    }
    if cli.strict {
        config.output.strict = true;
    }

    Ok(config)
}

/// Fetch repositories and overwrite the project document
async fn cmd_export(config: &Config) -> Result<()> {
    let exporter = Exporter::new(config.clone())?;
    let summary = exporter.run().await?;

    if let Some(status) = summary.failed_status {
        report_fetch_failure(&summary.account, status, config.output.strict)?;
    }

    info!(
        "Export finished in {:.2}s",
        summary.duration.as_secs_f64()
    );

    Ok(())
}

/// Print the entries that would be exported
async fn cmd_list(details: bool, config: &Config) -> Result<()> {
    let exporter = Exporter::new(config.clone())?;
    let (entries, failed_status) = exporter.preview().await?;

    if let Some(status) = failed_status {
        report_fetch_failure(exporter.account(), status, config.output.strict)?;
    }

    println!("Projects ({}): ", entries.len());

    for entry in entries {
        if details {
            println!("📁 {}", entry.info.title);
            if let Some(description) = &entry.info.description {
                println!("   📝 {}", description);
            }
            if !entry.tags.is_empty() {
                println!("   🏷️  {}", entry.tags.join(", "));
            }
            println!("   🔗 {}", entry.link);
            println!();
        } else {
            println!("  📁 {}", entry.info.title);
        }
    }

    Ok(())
}

/// Print the failure line; in strict mode the failure also becomes an error
fn report_fetch_failure(account: &str, status: StatusCode, strict: bool) -> Result<()> {
    println!(
        "Failed to fetch repositories for {}: HTTP {}",
        account,
        status.as_u16()
    );

    if strict {
        return Err(anyhow!(
            "Repository listing for {} failed with HTTP {}",
            account,
            status
        ));
    }

    Ok(())
}
