use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use release_dashboard::analysis::{ReleaseCalculator, SemanticVersion};
use release_dashboard::config::{load_config, Config};
use release_dashboard::enrichment;
use release_dashboard::github::{GitHubClient, RepoFilter};
use release_dashboard::report::{DashboardReport, OutputFormat, ReportGenerator};

#[derive(Parser)]
#[command(name = "release-dashboard")]
#[command(about = "Release statistics for every repository of a GitHub organization")]
struct Cli {
    /// GitHub token (can also be set via GITHUB_TOKEN env var)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Organization name, overrides the config file
    #[arg(short, long, env = "GITHUB_ORG")]
    org: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the organization dashboard
    Summary {
        /// Output format (markdown, json, html)
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,

        /// Output file path (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List parsed releases of one repository, newest first
    Releases {
        #[arg(short, long)]
        repo: String,

        /// Number of newest releases to list
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Mark releases younger than this many days
        #[arg(long)]
        recent_days: Option<u64>,
    },

    /// Show how tag names parse, without contacting GitHub
    Parse {
        #[arg(required = true)]
        tags: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { tags } => {
            for tag in tags {
                match SemanticVersion::parse(&tag) {
                    Some(version) if version.is_semantic() => {
                        println!("{}: {} (release)", tag, version)
                    }
                    Some(version) => println!("{}: {} (pre-release)", tag, version),
                    None => println!("{}: not a semantic version", tag),
                }
            }
        }
        Commands::Summary { format, output } => {
            let client = connect(cli.token, cli.org, &config).await?;

            let format = match format {
                Some(format) => format,
                None => config
                    .output
                    .format
                    .parse::<OutputFormat>()
                    .map_err(anyhow::Error::msg)?,
            };
            let output = output.or_else(|| config.output.path.as_ref().map(PathBuf::from));
            let template = config.output.template.as_ref().map(PathBuf::from);

            let repos = client
                .list_repositories(&RepoFilter::from(&config.repos))
                .await?;
            info!(org = %client.org(), count = repos.len(), "analyzing repositories");

            let enriched =
                enrichment::analyze_all(&client, repos, config.analysis.concurrency).await;
            let report =
                DashboardReport::build(client.org(), &enriched, &config.analysis, Utc::now());

            let generator = ReportGenerator::new(format, template.as_deref())?;
            let content = generator.generate(&report)?;

            if let Some(output_path) = output {
                std::fs::write(&output_path, content)
                    .with_context(|| format!("writing {}", output_path.display()))?;
                info!(path = %output_path.display(), "dashboard written");
            } else {
                println!("{}", content);
            }
        }
        Commands::Releases { repo, limit, recent_days } => {
            let client = connect(cli.token, cli.org, &config).await?;
            let recent_days = recent_days.unwrap_or(config.analysis.recent_window_days);

            let tags = client
                .list_tags(client.org(), &repo, config.analysis.max_tags)
                .await?;
            let releases = ReleaseCalculator::parse_tags(tags);
            let stats = ReleaseCalculator::calculate_stats(&releases);

            println!("Repository: {}/{}", client.org(), repo);
            if !stats.has_releases() {
                println!("  No releases found");
                return Ok(());
            }

            println!(
                "  {} releases, {} semantic, latest {} days ago",
                stats.total_releases(),
                stats.semantic_releases(),
                stats.days_since_latest_release().unwrap_or_default()
            );
            println!();
            for release in &ReleaseCalculator::get_latest_releases(&releases, limit) {
                let kind = if release.has_semantic_version() {
                    "release"
                } else if release.version().is_some() {
                    "pre-release"
                } else {
                    "tag"
                };
                let marker = if ReleaseCalculator::is_recent_release(release, recent_days) {
                    " *"
                } else {
                    ""
                };
                println!(
                    "  - {} [{}] {}{}",
                    release.tag_name(),
                    kind,
                    release.date().format("%Y-%m-%d"),
                    marker
                );
            }
        }
    }

    Ok(())
}

async fn connect(
    token: Option<String>,
    org: Option<String>,
    config: &Config,
) -> Result<GitHubClient> {
    let Some(token) = token else {
        bail!("a GitHub token is required (--token or GITHUB_TOKEN)");
    };
    let org = org.unwrap_or_else(|| config.github.org.clone());
    if org.is_empty() {
        bail!("an organization is required (--org, GITHUB_ORG or github.org in the config)");
    }

    let client = GitHubClient::new(token, org, config.github.api_url.as_deref())
        .await?
        .with_tag_limit(config.analysis.max_tags);
    Ok(client)
}
