//! Reqwest-backed GitHub REST API client.
//!
//! One client is constructed at process start and passed by reference into
//! every request-scoped aggregation call. Authentication is optional; an
//! unauthenticated client works but hits much lower rate limits.

use super::{FetchError, StatsSource};
use crate::config::GithubConfig;
use crate::models::{
    ForkActivity, IssueActivity, LanguageBytes, MonthlyCalendar, RepoInventory, UserProfile,
};
use chrono::{DateTime, Utc};
use futures::future;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const PER_PAGE: usize = 100;
// The events API serves at most 300 events.
const MAX_EVENT_PAGES: u32 = 3;

/// Authenticated (or anonymous) GitHub API client.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

/// Repository listing entry, reduced to the fields categorization needs.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepoSummary {
    pub full_name: String,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub mirror_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrgSummary {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepoDetail {
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    subscribers_count: u64,
}

#[derive(Debug, Deserialize)]
struct SearchCount {
    total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EventPayload {
    /// Number of commits in a PushEvent; absent for other event kinds.
    #[serde(default)]
    pub size: u64,
}

impl GitHubClient {
    /// Create a client from the `[github]` config section.
    pub fn new(config: &GithubConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("octostats/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        if config.token.is_none() {
            warn!("No GitHub token configured; anonymous rate limits apply");
        }

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Look up a user, distinguishing "not found" from transport failures.
    pub async fn user_profile(&self, user: &str) -> Result<Option<UserProfile>, FetchError> {
        match self.get_json::<UserProfile>(&format!("users/{user}"), &[]).await {
            Ok(profile) => Ok(Some(profile)),
            Err(FetchError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.api_url, path);
        debug!("GET {}", url);

        let mut request = self
            .http
            .get(&url)
            .query(query)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response.json().await?)
    }

    async fn get_paginated<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let query = [
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            let batch: Vec<T> = self.get_json(path, &query).await?;
            let last_page = batch.len() < PER_PAGE;
            all.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    async fn owned_repos(&self, user: &str) -> Result<Vec<RepoSummary>, FetchError> {
        self.get_paginated(&format!("users/{user}/repos")).await
    }

    async fn repo_languages(&self, repo: &str) -> Result<LanguageBytes, FetchError> {
        self.get_json(&format!("repos/{repo}/languages"), &[]).await
    }

    /// Sum language bytes across every non-fork repository in the list.
    ///
    /// Fetches run concurrently but are merged in listing order, so the
    /// resulting insertion order is stable for a given inventory.
    async fn sum_languages(&self, repos: &[RepoSummary]) -> Result<LanguageBytes, FetchError> {
        let fetches: Vec<_> = repos
            .iter()
            .filter(|r| !r.fork)
            .map(|r| self.repo_languages(&r.full_name))
            .collect();
        let per_repo = future::try_join_all(fetches).await?;

        let mut total = LanguageBytes::new();
        for langs in per_repo {
            for (language, bytes) in langs {
                *total.entry(language).or_insert(0) += bytes;
            }
        }
        Ok(total)
    }

    async fn search_count(&self, query: String) -> Result<u64, FetchError> {
        let result: SearchCount = self
            .get_json("search/issues", &[("q", query), ("per_page", "1".to_string())])
            .await?;
        Ok(result.total_count)
    }
}

/// Split a repository listing into the four inventory categories.
pub(crate) fn categorize_repos(repos: &[RepoSummary]) -> RepoInventory {
    let mut inventory = RepoInventory::default();

    for repo in repos {
        if repo.private {
            inventory.privates.push(repo.full_name.clone());
        } else {
            inventory.public.push(repo.full_name.clone());
        }
        if repo.fork {
            inventory.forks.push(repo.full_name.clone());
        }
        if repo.mirror_url.is_some() {
            inventory.mirrors.push(repo.full_name.clone());
        }
    }

    inventory
}

/// Bucket pushed commits into per-month totals, keyed "01".."12".
///
/// All twelve keys are present in calendar order even when a month saw no
/// activity, so relabeling produces a full-year calendar.
pub(crate) fn bucket_push_events(events: &[EventEnvelope]) -> MonthlyCalendar {
    let mut calendar = MonthlyCalendar::new();
    for month in 1..=12u32 {
        calendar.insert(format!("{month:02}"), 0);
    }

    for event in events {
        if event.kind != "PushEvent" {
            continue;
        }
        let key = event.created_at.format("%m").to_string();
        if let Some(count) = calendar.get_mut(&key) {
            *count += event.payload.size;
        }
    }

    calendar
}

impl StatsSource for GitHubClient {
    async fn user_languages(&self, user: &str) -> Result<LanguageBytes, FetchError> {
        let repos = self.owned_repos(user).await?;
        self.sum_languages(&repos).await
    }

    async fn org_languages(&self, user: &str) -> Result<LanguageBytes, FetchError> {
        let orgs: Vec<OrgSummary> = self.get_paginated(&format!("users/{user}/orgs")).await?;

        let mut total = LanguageBytes::new();
        for org in orgs {
            let repos: Vec<RepoSummary> = self
                .get_paginated(&format!("orgs/{}/repos", org.login))
                .await?;
            for (language, bytes) in self.sum_languages(&repos).await? {
                *total.entry(language).or_insert(0) += bytes;
            }
        }
        Ok(total)
    }

    async fn repo_inventory(&self, subject: &str) -> Result<RepoInventory, FetchError> {
        let repos = self.owned_repos(subject).await?;
        Ok(categorize_repos(&repos))
    }

    async fn fork_activity(&self, repo: &str) -> Result<ForkActivity, FetchError> {
        let detail: RepoDetail = self.get_json(&format!("repos/{repo}"), &[]).await?;
        Ok(ForkActivity {
            forks: detail.forks_count,
            stars: detail.stargazers_count,
            watchers: detail.subscribers_count,
        })
    }

    async fn issue_activity(&self, repo: &str) -> Result<IssueActivity, FetchError> {
        Ok(IssueActivity {
            open_issues: self
                .search_count(format!("repo:{repo} type:issue state:open"))
                .await?,
            closed_issues: self
                .search_count(format!("repo:{repo} type:issue state:closed"))
                .await?,
            open_pulls: self
                .search_count(format!("repo:{repo} type:pr state:open"))
                .await?,
            merged_pulls: self
                .search_count(format!("repo:{repo} type:pr is:merged"))
                .await?,
            closed_pulls: self
                .search_count(format!("repo:{repo} type:pr is:unmerged state:closed"))
                .await?,
        })
    }

    async fn monthly_commits(&self, user: &str) -> Result<MonthlyCalendar, FetchError> {
        let mut events: Vec<EventEnvelope> = Vec::new();
        for page in 1..=MAX_EVENT_PAGES {
            let query = [
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            let batch: Vec<EventEnvelope> = self
                .get_json(&format!("users/{user}/events"), &query)
                .await?;
            let last_page = batch.len() < PER_PAGE;
            events.extend(batch);
            if last_page {
                break;
            }
        }

        Ok(bucket_push_events(&events))
    }
}
