//! GitHub API boundary.
//!
//! This module defines the fetch capabilities the aggregation core depends
//! on, plus the reqwest-backed client that implements them.

pub mod client;

pub use client::GitHubClient;

use crate::models::{ForkActivity, IssueActivity, LanguageBytes, MonthlyCalendar, RepoInventory};
use thiserror::Error;

/// Failure from an upstream fetch. Propagated unchanged through the
/// aggregation core; no retries happen below this boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned status {status} for {url}")]
    Status { status: u16, url: String },
}

/// The fetch capabilities consumed by the aggregation core.
///
/// The core treats every call as an opaque fetch: failures abort the whole
/// aggregation and no partial results are synthesized. Tests substitute an
/// in-memory implementation.
#[allow(async_fn_in_trait)]
pub trait StatsSource {
    /// Language byte counts summed over the user's own repositories.
    async fn user_languages(&self, user: &str) -> Result<LanguageBytes, FetchError>;

    /// Language byte counts summed over the user's organizations' repositories.
    async fn org_languages(&self, user: &str) -> Result<LanguageBytes, FetchError>;

    /// Categorized repository inventory for a subject.
    async fn repo_inventory(&self, subject: &str) -> Result<RepoInventory, FetchError>;

    /// Fork/star/watcher counts for one repository ("owner/name").
    async fn fork_activity(&self, repo: &str) -> Result<ForkActivity, FetchError>;

    /// Issue and pull request counts for one repository ("owner/name").
    async fn issue_activity(&self, repo: &str) -> Result<IssueActivity, FetchError>;

    /// Commit counts per month, keyed "01".."12".
    async fn monthly_commits(&self, user: &str) -> Result<MonthlyCalendar, FetchError>;
}
