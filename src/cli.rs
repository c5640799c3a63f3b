//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Octostats - GitHub profile statistics aggregator
///
/// Analyze any GitHub user: dominant-language personas, per-repository
/// fork/star/watcher and issue/pull breakdowns, category totals, and a
/// monthly commit calendar. Markdown/JSON reports. Built in Rust.
///
/// Examples:
///   octostats octocat
///   octostats octocat --token ghp_xxx --format json -o octocat.json
///   octostats octocat --skip-orgs --no-calendar
///   octostats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// GitHub username to analyze
    ///
    /// Not required when using --init-config.
    #[arg(value_name = "USER", required_unless_present = "init_config")]
    pub user: Option<String>,

    /// GitHub personal access token
    ///
    /// Optional, but anonymous requests hit much lower rate limits.
    /// Can also be set via the GITHUB_TOKEN env var or .octostats.toml.
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API endpoint URL (override for GitHub Enterprise)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .octostats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip organization language data
    #[arg(long)]
    pub skip_orgs: bool,

    /// Skip the monthly commit calendar
    #[arg(long)]
    pub no_calendar: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .octostats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the subject username (should be validated first).
    pub fn subject(&self) -> &str {
        self.user.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        let user = self.user.as_deref().unwrap_or("");

        if user.is_empty() {
            return Err("A GitHub username is required".to_string());
        }
        if user.contains('/') {
            return Err(
                "Expected a username, not a repository path (drop the '/')".to_string(),
            );
        }

        if let Some(ref api_url) = self.api_url {
            if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
