//! Scalar totals over the chart series groups.

use crate::models::{ChartSeries, IssueTotals, PullTotals, Totals};

/// Sum every row of the eight series into per-dimension totals.
///
/// Input series are already filtered (forks excluded, all-zero repositories
/// dropped), so this is a plain reduction with no further filtering. Series
/// are matched by position; a missing series contributes zero.
pub fn reduce_totals(fork_series: &[ChartSeries], issue_series: &[ChartSeries]) -> Totals {
    let sum = |group: &[ChartSeries], index: usize| {
        group.get(index).map(ChartSeries::sum).unwrap_or(0)
    };

    Totals {
        issues: IssueTotals {
            open: sum(issue_series, 0),
            closed: sum(issue_series, 1),
        },
        pulls: PullTotals {
            open: sum(issue_series, 2),
            merged: sum(issue_series, 3),
            closed: sum(issue_series, 4),
        },
        forks: sum(fork_series, 0),
        stars: sum(fork_series, 1),
        watchers: sum(fork_series, 2),
    }
}
