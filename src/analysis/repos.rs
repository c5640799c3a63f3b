//! Per-repository chart series and inventory counts.

use super::StatsError;
use crate::github::StatsSource;
use crate::models::{ChartSeries, RepoCounts, RepoInventory};
use tracing::debug;

const FORK_SERIES_NAMES: [&str; 3] = ["Forks", "Stargazers", "Watchers"];
const ISSUE_SERIES_NAMES: [&str; 5] = [
    "Open Issues",
    "Closed Issues",
    "Open Pulls",
    "Merged Pulls",
    "Closed Pulls",
];

/// Build the Forks/Stargazers/Watchers series for a subject's own work.
///
/// Forked repositories are skipped entirely: a fork's counts describe the
/// upstream project, not the subject. A repository whose three counts are
/// all zero contributes a row to none of the series. Rows keep encounter
/// order, and the three series always stay row-aligned.
pub async fn fork_series<S: StatsSource>(
    owner: &str,
    inventory: &RepoInventory,
    source: &S,
) -> Result<Vec<ChartSeries>, StatsError> {
    let mut series: Vec<ChartSeries> = FORK_SERIES_NAMES.iter().map(|n| ChartSeries::new(n)).collect();
    let prefix = format!("{owner}/");

    for repo in owned_repos(inventory) {
        let activity = source.fork_activity(repo).await?;
        if activity.forks < 1 && activity.stars < 1 && activity.watchers < 1 {
            continue;
        }
        let label = display_name(&prefix, repo);
        series[0].data.push((label.clone(), activity.forks));
        series[1].data.push((label.clone(), activity.stars));
        series[2].data.push((label, activity.watchers));
    }

    debug!("{} fork-series rows for {}", series[0].data.len(), owner);
    Ok(series)
}

/// Build the five issue/pull series for a subject's own work.
///
/// Same shape as [`fork_series`]: forks are skipped, all-zero repositories
/// are dropped from the whole group, encounter order is preserved.
pub async fn issue_series<S: StatsSource>(
    owner: &str,
    inventory: &RepoInventory,
    source: &S,
) -> Result<Vec<ChartSeries>, StatsError> {
    let mut series: Vec<ChartSeries> =
        ISSUE_SERIES_NAMES.iter().map(|n| ChartSeries::new(n)).collect();
    let prefix = format!("{owner}/");

    for repo in owned_repos(inventory) {
        let activity = source.issue_activity(repo).await?;
        let values = [
            activity.open_issues,
            activity.closed_issues,
            activity.open_pulls,
            activity.merged_pulls,
            activity.closed_pulls,
        ];
        if values.iter().all(|v| *v < 1) {
            continue;
        }
        let label = display_name(&prefix, repo);
        for (slot, value) in series.iter_mut().zip(values) {
            slot.data.push((label.clone(), value));
        }
    }

    debug!("{} issue-series rows for {}", series[0].data.len(), owner);
    Ok(series)
}

/// Tally the inventory by category. No cross-set deduplication: an id
/// present in both `public` and `forks` counts toward both.
pub fn count_repos(inventory: &RepoInventory) -> RepoCounts {
    RepoCounts {
        public: inventory.public.len(),
        forks: inventory.forks.len(),
        mirrors: inventory.mirrors.len(),
        privates: inventory.privates.len(),
    }
}

/// Public repositories minus forks, in encounter order.
fn owned_repos(inventory: &RepoInventory) -> impl Iterator<Item = &String> {
    inventory
        .public
        .iter()
        .filter(|r| !inventory.forks.contains(r))
}

/// Strip the "<owner>/" prefix for display. The prefix is built once per
/// series group, not per repository.
fn display_name(prefix: &str, repo: &str) -> String {
    repo.strip_prefix(prefix).unwrap_or(repo).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::FetchError;
    use crate::models::{ForkActivity, IssueActivity, LanguageBytes, MonthlyCalendar};
    use std::collections::HashMap;

    struct MockSource {
        forks: HashMap<String, ForkActivity>,
        issues: HashMap<String, IssueActivity>,
    }

    impl MockSource {
        fn with_forks(entries: Vec<(&str, ForkActivity)>) -> Self {
            Self {
                forks: entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                issues: HashMap::new(),
            }
        }

        fn with_issues(entries: Vec<(&str, IssueActivity)>) -> Self {
            Self {
                forks: HashMap::new(),
                issues: entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            }
        }
    }

    impl StatsSource for MockSource {
        async fn user_languages(&self, _user: &str) -> Result<LanguageBytes, FetchError> {
            Ok(LanguageBytes::new())
        }

        async fn org_languages(&self, _user: &str) -> Result<LanguageBytes, FetchError> {
            Ok(LanguageBytes::new())
        }

        async fn repo_inventory(&self, _subject: &str) -> Result<RepoInventory, FetchError> {
            Ok(RepoInventory::default())
        }

        async fn fork_activity(&self, repo: &str) -> Result<ForkActivity, FetchError> {
            Ok(self.forks.get(repo).copied().unwrap_or_default())
        }

        async fn issue_activity(&self, repo: &str) -> Result<IssueActivity, FetchError> {
            Ok(self.issues.get(repo).copied().unwrap_or_default())
        }

        async fn monthly_commits(&self, _user: &str) -> Result<MonthlyCalendar, FetchError> {
            Ok(MonthlyCalendar::new())
        }
    }

    fn inventory(public: &[&str], forks: &[&str]) -> RepoInventory {
        RepoInventory {
            public: public.iter().map(|s| s.to_string()).collect(),
            forks: forks.iter().map(|s| s.to_string()).collect(),
            mirrors: Vec::new(),
            privates: Vec::new(),
        }
    }

    #[test]
    fn test_fork_series_excludes_forked_repos() {
        let source = MockSource::with_forks(vec![
            (
                "me/a",
                ForkActivity {
                    forks: 2,
                    stars: 0,
                    watchers: 0,
                },
            ),
            (
                "me/b",
                ForkActivity {
                    forks: 5,
                    stars: 5,
                    watchers: 5,
                },
            ),
        ]);
        let inv = inventory(&["me/a", "me/b"], &["me/b"]);

        let series = tokio_test::block_on(fork_series("me", &inv, &source)).unwrap();

        assert_eq!(series[0].name, "Forks");
        assert_eq!(series[0].data, vec![("a".to_string(), 2)]);
        assert_eq!(series[1].data, vec![("a".to_string(), 0)]);
        assert_eq!(series[2].data, vec![("a".to_string(), 0)]);
    }

    #[test]
    fn test_fork_series_drops_all_zero_repos() {
        let source = MockSource::with_forks(vec![
            ("me/quiet", ForkActivity::default()),
            (
                "me/busy",
                ForkActivity {
                    forks: 0,
                    stars: 3,
                    watchers: 0,
                },
            ),
        ]);
        let inv = inventory(&["me/quiet", "me/busy"], &[]);

        let series = tokio_test::block_on(fork_series("me", &inv, &source)).unwrap();

        // "quiet" appears in none of the group's series; "busy" in all three.
        for s in &series {
            assert_eq!(s.data.len(), 1);
            assert_eq!(s.data[0].0, "busy");
        }
    }

    #[test]
    fn test_fork_series_preserves_encounter_order() {
        let active = ForkActivity {
            forks: 1,
            stars: 0,
            watchers: 0,
        };
        let source = MockSource::with_forks(vec![
            ("me/z", active),
            ("me/a", active),
            ("me/m", active),
        ]);
        let inv = inventory(&["me/z", "me/a", "me/m"], &[]);

        let series = tokio_test::block_on(fork_series("me", &inv, &source)).unwrap();
        let labels: Vec<_> = series[0].data.iter().map(|(l, _)| l.clone()).collect();

        assert_eq!(labels, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_issue_series_names_and_group_filter() {
        let source = MockSource::with_issues(vec![
            (
                "me/a",
                IssueActivity {
                    open_issues: 0,
                    closed_issues: 0,
                    open_pulls: 0,
                    merged_pulls: 1,
                    closed_pulls: 0,
                },
            ),
            ("me/b", IssueActivity::default()),
        ]);
        let inv = inventory(&["me/a", "me/b"], &[]);

        let series = tokio_test::block_on(issue_series("me", &inv, &source)).unwrap();

        let names: Vec<_> = series.iter().map(|s| s.name.clone()).collect();
        assert_eq!(
            names,
            vec![
                "Open Issues",
                "Closed Issues",
                "Open Pulls",
                "Merged Pulls",
                "Closed Pulls"
            ]
        );
        // A single non-zero dimension keeps the repo in every series.
        for s in &series {
            assert_eq!(s.data.len(), 1);
            assert_eq!(s.data[0].0, "a");
        }
        assert_eq!(series[3].data[0].1, 1);
    }

    #[test]
    fn test_empty_inventory_yields_named_empty_series() {
        let source = MockSource::with_forks(Vec::new());
        let inv = inventory(&[], &[]);

        let series = tokio_test::block_on(fork_series("me", &inv, &source)).unwrap();

        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.data.is_empty()));
        assert_eq!(series[2].name, "Watchers");
    }

    /// Source whose per-repo metric fetches always fail.
    struct FailingSource;

    impl StatsSource for FailingSource {
        async fn user_languages(&self, _user: &str) -> Result<LanguageBytes, FetchError> {
            Ok(LanguageBytes::new())
        }

        async fn org_languages(&self, _user: &str) -> Result<LanguageBytes, FetchError> {
            Ok(LanguageBytes::new())
        }

        async fn repo_inventory(&self, _subject: &str) -> Result<RepoInventory, FetchError> {
            Ok(RepoInventory::default())
        }

        async fn fork_activity(&self, repo: &str) -> Result<ForkActivity, FetchError> {
            Err(FetchError::Status {
                status: 500,
                url: format!("https://api.example/repos/{repo}"),
            })
        }

        async fn issue_activity(&self, repo: &str) -> Result<IssueActivity, FetchError> {
            Err(FetchError::Status {
                status: 500,
                url: format!("https://api.example/search/issues?q=repo:{repo}"),
            })
        }

        async fn monthly_commits(&self, _user: &str) -> Result<MonthlyCalendar, FetchError> {
            Ok(MonthlyCalendar::new())
        }
    }

    #[test]
    fn test_fetch_failure_aborts_series_with_no_partial_result() {
        let inv = inventory(&["me/a", "me/b"], &[]);

        let forks = tokio_test::block_on(fork_series("me", &inv, &FailingSource));
        assert!(matches!(forks, Err(StatsError::Fetch(_))));

        let issues = tokio_test::block_on(issue_series("me", &inv, &FailingSource));
        assert!(matches!(issues, Err(StatsError::Fetch(_))));
    }

    #[test]
    fn test_count_repos_no_dedup() {
        let inv = RepoInventory {
            public: vec!["me/x".to_string(), "me/y".to_string()],
            forks: vec!["me/y".to_string()],
            mirrors: Vec::new(),
            privates: vec!["me/z".to_string()],
        };

        let counts = count_repos(&inv);

        assert_eq!(
            counts,
            RepoCounts {
                public: 2,
                forks: 1,
                mirrors: 0,
                privates: 1,
            }
        );
    }

    #[test]
    fn test_display_name_strips_only_owner_prefix() {
        assert_eq!(display_name("me/", "me/project"), "project");
        assert_eq!(display_name("me/", "other/project"), "other/project");
    }
}
