//! Octostats - GitHub Profile Statistics Aggregator
//!
//! A CLI tool that fetches a user's GitHub repository statistics and
//! reduces them into language personas, chart-ready per-repository
//! breakdowns, category totals, and a monthly commit calendar.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (user not found, no data, network failure, etc.)

mod analysis;
mod cli;
mod config;
mod github;
mod models;
mod report;
mod vocab;

use analysis::{
    aggregate_languages, count_repos, fork_series, issue_series, reduce_totals, relabel_months,
};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use github::{GitHubClient, StatsSource};
use indicatif::{ProgressBar, ProgressStyle};
use models::{LanguageReport, ProfileReport, ReportMetadata};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use vocab::Vocabulary;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Octostats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the analysis
    if let Err(e) = run_analysis(args).await {
        error!("Analysis failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .octostats.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".octostats.toml");

    if path.exists() {
        eprintln!("⚠️  .octostats.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .octostats.toml")?;

    println!("✅ Created .octostats.toml with default settings.");
    println!("   Edit it to customize API endpoint, report sections, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete analysis workflow.
async fn run_analysis(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let vocab = Vocabulary::builtin().context("Failed to load built-in vocabulary")?;
    let client =
        GitHubClient::new(&config.github).context("Failed to build the GitHub client")?;

    // Step 1: Confirm the user exists before spending API calls
    let subject = args.subject();
    println!("🔎 Analyzing GitHub user: {}", subject);

    let Some(profile) = client.user_profile(subject).await? else {
        anyhow::bail!("GitHub user '{}' was not found", subject);
    };
    let login = profile.login.clone();
    info!("Resolved profile: {}", login);

    // Step 2: Language distributions and personas
    println!("🗣  Aggregating language data...");
    let languages = if config.report.include_orgs {
        aggregate_languages(&login, &client, &vocab).await?
    } else {
        personal_languages_only(&login, &client, &vocab).await?
    };

    if languages.is_empty() {
        anyhow::bail!("No language data found for '{}'", login);
    }

    // Step 3: Repository inventory and per-repository metrics
    let inventory = client.repo_inventory(&login).await?;
    let counts = count_repos(&inventory);
    debug!(
        "Inventory: {} public, {} forks, {} mirrors, {} privates",
        counts.public, counts.forks, counts.mirrors, counts.privates
    );

    let spinner = make_spinner(&args, "Fetching repository metrics...");
    let forks = fork_series(&login, &inventory, &client).await?;
    let issues = issue_series(&login, &inventory, &client).await?;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    // Step 4: Reductions
    let totals = reduce_totals(&forks, &issues);

    let calendar = if config.report.include_calendar {
        let monthly = client.monthly_commits(&login).await?;
        Some(relabel_months(&monthly))
    } else {
        None
    };

    // Step 5: Build and save the report
    println!("📝 Generating report...");

    let duration = start_time.elapsed().as_secs_f64();
    let metadata = ReportMetadata {
        subject: login.clone(),
        avatar_url: profile.avatar_url.clone(),
        generated_at: Utc::now(),
        api_url: config.github.api_url.clone(),
        duration_seconds: duration,
    };

    let profile_report = ProfileReport {
        metadata,
        languages,
        counts,
        fork_series: forks,
        issue_series: issues,
        totals,
        calendar,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&profile_report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&profile_report),
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Print summary
    print_summary(&profile_report);
    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        output_path.display()
    );

    Ok(())
}

/// Build a language report from personal repositories only (--skip-orgs).
async fn personal_languages_only(
    login: &str,
    client: &GitHubClient,
    vocab: &Vocabulary,
) -> Result<LanguageReport> {
    let bytes = client.user_languages(login).await?;

    Ok(LanguageReport {
        user: analysis::languages::language_branch(bytes, vocab)?,
        org: None,
        combined: None,
    })
}

/// Print the terminal summary of the generated report.
fn print_summary(report: &ProfileReport) {
    let persona = report
        .languages
        .combined
        .as_ref()
        .or(report.languages.user.as_ref())
        .or(report.languages.org.as_ref());

    println!("\n📊 Profile Summary:");
    if let Some(branch) = persona {
        println!("   Persona: {}", branch.persona.fancy_name);
        println!("   Languages: {}", branch.bytes.len());
    }
    println!(
        "   Repositories: {} public | {} forks | {} mirrors | {} private",
        report.counts.public, report.counts.forks, report.counts.mirrors, report.counts.privates
    );
    println!(
        "   Totals: ⭐ {} | 🍴 {} | 👀 {}",
        report.totals.stars, report.totals.forks, report.totals.watchers
    );
    println!(
        "   Issues: {} open, {} closed | Pulls: {} open, {} merged, {} closed",
        report.totals.issues.open,
        report.totals.issues.closed,
        report.totals.pulls.open,
        report.totals.pulls.merged,
        report.totals.pulls.closed
    );
    println!(
        "   Duration: {:.1}s",
        report.metadata.duration_seconds
    );
}

/// Create a progress spinner unless running in quiet mode.
fn make_spinner(args: &Args, message: &str) -> Option<ProgressBar> {
    if args.quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .octostats.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
