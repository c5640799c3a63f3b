//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.octostats.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "octostats_report.md".to_string()
}

/// GitHub API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API endpoint URL (override for GitHub Enterprise).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Personal access token. Kept out of generated config files; usually
    /// supplied via the GITHUB_TOKEN environment variable instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include organization language data.
    #[serde(default = "default_true")]
    pub include_orgs: bool,

    /// Include the monthly commit calendar.
    #[serde(default = "default_true")]
    pub include_calendar: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_orgs: true,
            include_calendar: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".octostats.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref token) = args.token {
            self.github.token = Some(token.clone());
        }
        if let Some(ref api_url) = args.api_url {
            self.github.api_url = api_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.github.timeout_seconds = timeout;
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
        if args.skip_orgs {
            self.report.include_orgs = false;
        }
        if args.no_calendar {
            self.report.include_calendar = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.general.output, "octostats_report.md");
        assert!(config.report.include_orgs);
        assert!(config.github.token.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "profile.md"
verbose = true

[github]
api_url = "https://github.example.com/api/v3"
timeout_seconds = 60

[report]
include_calendar = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "profile.md");
        assert!(config.general.verbose);
        assert_eq!(config.github.api_url, "https://github.example.com/api/v3");
        assert_eq!(config.github.timeout_seconds, 60);
        assert!(!config.report.include_calendar);
        assert!(config.report.include_orgs);
    }

    #[test]
    fn test_default_toml_generation_omits_token() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[github]"));
        assert!(toml_str.contains("[report]"));
        assert!(!toml_str.contains("token"));
    }
}
