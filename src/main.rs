use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Local};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use comicdl::catalog;
use comicdl::cli::{Cli, Commands, FetchArgs};
use comicdl::dates::{date_range, parse_user_date};
use comicdl::fetch::{Fetcher, RetryPolicy, WebClient};
use comicdl::first::find_first_date;
use comicdl::process;
use comicdl::store::ArtifactStore;
use comicdl::{info_took, Result, SITE};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Ls => ls().await,
        Commands::Fetch(args) => tokio::select! {
            res = fetch(args) => res,
            _ = tokio::signal::ctrl_c() => {
                warn!("Ctrl-C pressed. Bailing out...");
                Ok(())
            }
        },
    }
}

async fn ls() -> Result<()> {
    let fetcher = Fetcher::new(WebClient::new()?, RetryPolicy::default());
    let comics = catalog::list_comics(&fetcher).await?;
    catalog::print_listing(&comics);
    Ok(())
}

async fn fetch(args: FetchArgs) -> Result<()> {
    let start_time = Local::now();
    let base_url = format!("{SITE}/{}", args.comic);
    let fetcher = Fetcher::new(WebClient::new()?, RetryPolicy::default());

    // Date parsing and boundary discovery happen before anything is
    // scheduled; failing either aborts the whole run.
    let start = match &args.start_date {
        Some(date) => parse_user_date(date)?,
        None => find_first_date(&fetcher, &base_url).await?,
    };
    let end = match &args.end_date {
        Some(date) => parse_user_date(date)?,
        None => Local::now().date_naive(),
    };
    let dates: Vec<_> = date_range(start, end, Duration::days(1)).collect();

    let out_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&args.comic));
    let store = ArtifactStore::new(out_dir)?;

    process::run(
        Arc::new(fetcher),
        Arc::new(store),
        &base_url,
        &dates,
        args.max_parallel,
    )
    .await;

    info_took!(start_time, "Finished fetching {}", args.comic);
    Ok(())
}
