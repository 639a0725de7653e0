mod analyze;
mod batch;
mod error;
mod gitea;
mod model;
mod report;
mod utils;

use chrono::NaiveDate;
use clap::Parser;
use log::warn;

use crate::batch::BatchRunner;
use crate::error::FatalError;
use crate::gitea::GiteaCollector;
use crate::model::{IdentSet, IdentityResolver};
use crate::report::select_formats;

const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "contrib-metrics",
    about = "Scores pull-request and issue activity by label across repositories"
)]
struct Args {
    /// Repositories to analyze, each in `owner/repo` form
    #[arg(required = true)]
    repos: Vec<String>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Output directory path
    #[arg(short, long)]
    output: Option<String>,
    /// Output formats: text, csv, chart, html, all
    #[arg(short = 'f', long = "format", num_args = 1..)]
    format: Vec<String>,
    /// Access token for the hosting service
    #[arg(short = 't', long)]
    token: Option<String>,
    /// User ids to include in per-repository dumps and label counts
    #[arg(long = "include-user", num_args = 1..)]
    include_users: Vec<String>,
    /// Only analyze activity created on or after this date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,
    /// Only analyze activity created on or before this date (YYYY-MM-DD)
    #[arg(long)]
    until: Option<NaiveDate>,
    /// Path to a JSON or CSV file mapping user id to display name
    #[arg(long = "user-info")]
    user_info: Option<String>,
    /// Base URL of the hosting service API
    #[arg(long = "gitea-url", default_value = "https://gitea.com")]
    gitea_url: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(&args).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), FatalError> {
    // Fail-fast gates come before any repository is touched.
    let resolver = match &args.user_info {
        Some(path) => IdentityResolver::from_file(path)?,
        None => IdentityResolver::identity(),
    };

    if args.output.is_none() {
        warn!("no output directory given, defaulting to '{DEFAULT_OUTPUT_DIR}/'");
    }
    if args.format.is_empty() {
        warn!("no output format given, defaulting to 'all'");
    }
    let formats = select_formats(&args.format)?;
    let output_dir = args.output.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR);

    let filter = if args.include_users.is_empty() {
        None
    } else {
        Some(args.include_users.iter().collect::<IdentSet>())
    };

    let collector = GiteaCollector::new(&args.gitea_url, args.token.as_deref());
    let runner = BatchRunner::new(
        &collector,
        &resolver,
        &formats,
        output_dir,
        filter.as_ref(),
        args.since,
        args.until,
    );
    let report = runner.run(&args.repos).await;
    report.print_summary();

    Ok(())
}
