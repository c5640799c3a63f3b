//! Language distribution aggregation and persona naming.

use super::StatsError;
use crate::github::StatsSource;
use crate::models::{LanguageBreakdown, LanguageBytes, LanguageReport, Persona};
use crate::vocab::Vocabulary;
use tracing::debug;

/// Name a persona for a non-empty language distribution.
///
/// The demonym comes from the label holding the maximum byte count. When
/// several labels tie for the maximum, the last one in map iteration order
/// wins; distributions preserve upstream insertion order, so the result is
/// deterministic for a given fetch. Colors are collected for every label,
/// in the same iteration order.
pub fn name_persona(bytes: &LanguageBytes, vocab: &Vocabulary) -> Result<Persona, StatsError> {
    if bytes.is_empty() {
        return Err(StatsError::EmptyDistribution);
    }

    let max = bytes.values().copied().max().unwrap_or(0);
    let mut demonym = String::new();
    let mut colors = Vec::with_capacity(bytes.len());

    for (language, count) in bytes {
        if *count == max {
            demonym = vocab
                .demonym(language)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("{language} coder"));
        }
        colors.push(vocab.color_for_language(language));
    }

    Ok(Persona {
        fancy_name: format!("{} {}", vocab.random_adjective(), demonym),
        colors,
    })
}

/// Merge two distributions key-wise: overlapping languages sum their byte
/// counts, non-overlapping languages pass through unchanged. Keys of `a`
/// keep their positions; keys only in `b` are appended in `b`'s order.
pub fn merge_language_bytes(a: &LanguageBytes, b: &LanguageBytes) -> LanguageBytes {
    let mut merged = a.clone();
    for (language, count) in b {
        *merged.entry(language.clone()).or_insert(0) += count;
    }
    merged
}

/// Build the full language report for a subject.
///
/// An empty personal or organization distribution is a normal condition
/// (the branch is absent), not an error. The combined branch exists exactly
/// when both sides do; it is never computed from a single side.
pub async fn aggregate_languages<S: StatsSource>(
    subject: &str,
    source: &S,
    vocab: &Vocabulary,
) -> Result<LanguageReport, StatsError> {
    let user_bytes = source.user_languages(subject).await?;
    let org_bytes = source.org_languages(subject).await?;
    debug!(
        "{}: {} personal languages, {} org languages",
        subject,
        user_bytes.len(),
        org_bytes.len()
    );

    let user = language_branch(user_bytes, vocab)?;
    let org = language_branch(org_bytes, vocab)?;

    let combined = match (&user, &org) {
        (Some(u), Some(o)) => {
            let merged = merge_language_bytes(&u.bytes, &o.bytes);
            Some(LanguageBreakdown {
                persona: name_persona(&merged, vocab)?,
                bytes: merged,
            })
        }
        _ => None,
    };

    Ok(LanguageReport {
        user,
        org,
        combined,
    })
}

/// Build one report branch: absent for an empty distribution, otherwise the
/// bytes with their persona.
pub(crate) fn language_branch(
    bytes: LanguageBytes,
    vocab: &Vocabulary,
) -> Result<Option<LanguageBreakdown>, StatsError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(LanguageBreakdown {
        persona: name_persona(&bytes, vocab)?,
        bytes,
    }))
}
