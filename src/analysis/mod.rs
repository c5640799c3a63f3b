//! Aggregation core.
//!
//! Pure reductions over already-fetched API data: persona naming, language
//! merging, per-repository chart series, category counts, totals, and
//! calendar relabeling.

pub mod calendar;
pub mod languages;
pub mod repos;
pub mod totals;

pub use calendar::relabel_months;
pub use languages::{aggregate_languages, merge_language_bytes, name_persona};
pub use repos::{count_repos, fork_series, issue_series};
pub use totals::reduce_totals;

use crate::github::FetchError;
use thiserror::Error;

/// Failures the aggregation core can produce.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Persona naming requires at least one language. Aggregators check for
    /// emptiness first and mark the branch absent instead of failing.
    #[error("cannot name a persona for an empty language distribution")]
    EmptyDistribution,

    /// An injected fetch failed; propagated unchanged, aborting the whole
    /// aggregation with no partial results.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
