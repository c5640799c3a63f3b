//! Data models for the profile statistics aggregator.
//!
//! This module contains all the core data structures used throughout
//! the application for representing language distributions, repository
//! inventories, chart series, and totals.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Language name to byte count, in upstream fetch order.
///
/// Insertion order is significant: persona tie-breaks and color ordering
/// follow map iteration order, so the map must preserve the order in which
/// languages were first seen.
pub type LanguageBytes = IndexMap<String, u64>;

/// Hex display color, e.g. `#dea584`.
pub type Color = String;

/// Two-digit month key ("01".."12") or relabeled month name, to a metric.
pub type MonthlyCalendar = IndexMap<String, u64>;

/// A generated persona for a language distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// "<adjective> <demonym>", e.g. "Intrepid Rustacean".
    pub fancy_name: String,
    /// One color per language, in distribution iteration order.
    pub colors: Vec<Color>,
}

/// One branch of the language report: the raw bytes plus its persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageBreakdown {
    pub bytes: LanguageBytes,
    pub persona: Persona,
}

impl LanguageBreakdown {
    /// Total bytes across all languages in this branch.
    pub fn total_bytes(&self) -> u64 {
        self.bytes.values().sum()
    }
}

/// Language data for a subject: personal, organization, and combined views.
///
/// `combined` is present exactly when both `user` and `org` are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<LanguageBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<LanguageBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<LanguageBreakdown>,
}

impl LanguageReport {
    /// True when neither personal nor organization data exists.
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.org.is_none()
    }
}

/// Categorized repository identifiers ("owner/name") for a subject.
///
/// `forks` is used purely as an exclusion filter against `public`; an id
/// may appear in more than one set and no validation is performed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoInventory {
    pub public: Vec<String>,
    pub forks: Vec<String>,
    pub mirrors: Vec<String>,
    pub privates: Vec<String>,
}

/// Raw fork/star/watcher counts for a single repository.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ForkActivity {
    pub forks: u64,
    pub stars: u64,
    pub watchers: u64,
}

/// Raw issue and pull request counts for a single repository.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IssueActivity {
    pub open_issues: u64,
    pub closed_issues: u64,
    pub open_pulls: u64,
    pub merged_pulls: u64,
    pub closed_pulls: u64,
}

/// A named, ordered series of (label, value) rows for chart rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<(String, u64)>,
}

impl ChartSeries {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Sum of all row values in this series.
    pub fn sum(&self) -> u64 {
        self.data.iter().map(|(_, v)| v).sum()
    }
}

/// Per-category repository counts. No cross-set deduplication: a public
/// repository that is also a fork is counted in both categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCounts {
    pub public: usize,
    pub forks: usize,
    pub mirrors: usize,
    pub privates: usize,
}

/// Issue totals across all counted repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTotals {
    pub open: u64,
    pub closed: u64,
}

/// Pull request totals across all counted repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullTotals {
    pub open: u64,
    pub merged: u64,
    pub closed: u64,
}

/// Scalar totals reduced from the fork and issue series groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub issues: IssueTotals,
    pub pulls: PullTotals,
    pub forks: u64,
    pub stars: u64,
    pub watchers: u64,
}

/// Basic profile information for the analyzed subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Metadata about a generated profile report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// The user account that was analyzed.
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Date and time of the analysis.
    pub generated_at: DateTime<Utc>,
    /// API endpoint the data came from.
    pub api_url: String,
    /// Duration of the analysis in seconds.
    pub duration_seconds: f64,
}

/// The complete profile statistics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub metadata: ReportMetadata,
    pub languages: LanguageReport,
    pub counts: RepoCounts,
    /// Forks, Stargazers, Watchers series.
    pub fork_series: Vec<ChartSeries>,
    /// Open/Closed Issues and Open/Merged/Closed Pulls series.
    pub issue_series: Vec<ChartSeries>,
    pub totals: Totals,
    /// Commit calendar keyed by full month name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<MonthlyCalendar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_series_sum() {
        let series = ChartSeries {
            name: "Forks".to_string(),
            data: vec![("a".to_string(), 2), ("b".to_string(), 3)],
        };
        assert_eq!(series.sum(), 5);
        assert_eq!(ChartSeries::new("Empty").sum(), 0);
    }

    #[test]
    fn test_language_report_empty() {
        let report = LanguageReport::default();
        assert!(report.is_empty());
    }

    #[test]
    fn test_language_bytes_preserves_insertion_order() {
        let mut bytes = LanguageBytes::new();
        bytes.insert("Zig".to_string(), 10);
        bytes.insert("Ada".to_string(), 20);
        bytes.insert("C".to_string(), 30);

        let keys: Vec<_> = bytes.keys().cloned().collect();
        assert_eq!(keys, vec!["Zig", "Ada", "C"]);
    }

    #[test]
    fn test_total_bytes() {
        let mut bytes = LanguageBytes::new();
        bytes.insert("Rust".to_string(), 100);
        bytes.insert("Go".to_string(), 50);

        let breakdown = LanguageBreakdown {
            bytes,
            persona: Persona {
                fancy_name: "Keen Rustacean".to_string(),
                colors: vec!["#dea584".to_string(), "#00ADD8".to_string()],
            },
        };
        assert_eq!(breakdown.total_bytes(), 150);
    }
}
