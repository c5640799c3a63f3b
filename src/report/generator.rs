//! Markdown report generation.
//!
//! This module generates Markdown profile reports from the aggregated
//! statistics.

use crate::models::{
    ChartSeries, LanguageBreakdown, MonthlyCalendar, ProfileReport, RepoCounts, ReportMetadata,
    Totals,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &ProfileReport) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("# Octostats Report: {}\n\n", report.metadata.subject));

    // Metadata section
    output.push_str(&generate_metadata_section(&report.metadata));

    // Personas and language breakdowns
    output.push_str(&generate_language_section(report));

    // Repository counts
    output.push_str(&generate_counts_section(&report.counts));

    // Per-repository breakdowns
    output.push_str(&generate_series_section(
        "Forks, Stars & Watchers",
        &report.fork_series,
    ));
    output.push_str(&generate_series_section(
        "Issues & Pull Requests",
        &report.issue_series,
    ));

    // Totals
    output.push_str(&generate_totals_section(&report.totals));

    // Commit calendar
    if let Some(ref calendar) = report.calendar {
        output.push_str(&generate_calendar_section(calendar));
    }

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Subject:** {}\n", metadata.subject));
    if let Some(ref avatar) = metadata.avatar_url {
        section.push_str(&format!("- **Avatar:** {}\n", avatar));
    }
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **API:** {}\n", metadata.api_url));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the personas and per-branch language tables.
fn generate_language_section(report: &ProfileReport) -> String {
    let mut section = String::new();

    section.push_str("## Languages\n\n");

    if report.languages.is_empty() {
        section.push_str("No language data was found for this subject.\n\n");
        return section;
    }

    if let Some(ref user) = report.languages.user {
        section.push_str(&generate_branch_block("Personal", user));
    }
    if let Some(ref org) = report.languages.org {
        section.push_str(&generate_branch_block("Organizations", org));
    }
    if let Some(ref combined) = report.languages.combined {
        section.push_str(&generate_branch_block("Combined", combined));
    }

    section
}

/// Generate one language branch: persona headline plus a byte table.
fn generate_branch_block(title: &str, branch: &LanguageBreakdown) -> String {
    let mut block = String::new();

    block.push_str(&format!("### {}\n\n", title));
    block.push_str(&format!("**{}**\n\n", branch.persona.fancy_name));

    block.push_str("| Language | Bytes | Share | Color |\n");
    block.push_str("|:---|---:|---:|:---|\n");

    let total = branch.total_bytes().max(1);
    for ((language, bytes), color) in branch.bytes.iter().zip(&branch.persona.colors) {
        let share = *bytes as f64 * 100.0 / total as f64;
        block.push_str(&format!(
            "| {} | {} | {:.1}% | `{}` |\n",
            language, bytes, share, color
        ));
    }
    block.push('\n');

    block
}

/// Generate the repository counts table.
fn generate_counts_section(counts: &RepoCounts) -> String {
    let mut section = String::new();

    section.push_str("## Repositories\n\n");
    section.push_str("| Public | Forks | Mirrors | Privates |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} |\n\n",
        counts.public, counts.forks, counts.mirrors, counts.privates
    ));

    section
}

/// Generate one table combining a row-aligned series group.
///
/// All series in a group share the same labels in the same order by
/// construction, so the first series drives the rows.
fn generate_series_section(title: &str, series: &[ChartSeries]) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", title));

    let Some(first) = series.first() else {
        return section;
    };

    if first.data.is_empty() {
        section.push_str("No repositories with activity in this category.\n\n");
        return section;
    }

    section.push_str("| Repository |");
    for s in series {
        section.push_str(&format!(" {} |", s.name));
    }
    section.push('\n');
    section.push_str("|:---|");
    for _ in series {
        section.push_str("---:|");
    }
    section.push('\n');

    for (row, (label, _)) in first.data.iter().enumerate() {
        section.push_str(&format!("| {} |", label));
        for s in series {
            let value = s.data.get(row).map(|(_, v)| *v).unwrap_or(0);
            section.push_str(&format!(" {} |", value));
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

/// Generate the totals section.
fn generate_totals_section(totals: &Totals) -> String {
    let mut section = String::new();

    section.push_str("## Totals\n\n");
    section.push_str(&format!(
        "- **Forks:** {} | **Stars:** {} | **Watchers:** {}\n",
        totals.forks, totals.stars, totals.watchers
    ));
    section.push_str(&format!(
        "- **Issues:** {} open, {} closed\n",
        totals.issues.open, totals.issues.closed
    ));
    section.push_str(&format!(
        "- **Pulls:** {} open, {} merged, {} closed\n\n",
        totals.pulls.open, totals.pulls.merged, totals.pulls.closed
    ));

    section
}

/// Generate the monthly commit calendar table.
fn generate_calendar_section(calendar: &MonthlyCalendar) -> String {
    let mut section = String::new();

    section.push_str("## Commit Calendar\n\n");
    section.push_str("| Month | Commits |\n");
    section.push_str("|:---|---:|\n");
    for (month, commits) in calendar {
        section.push_str(&format!("| {} | {} |\n", month, commits));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by octostats*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &ProfileReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
