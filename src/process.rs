//! The fetch-and-persist pipeline: one task per date, a bounded pool of
//! in-flight tasks, and containment of every per-task failure at the task
//! boundary. Nothing an individual date does can take the run down.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::fetch::{FetchOutcome, Fetcher, HttpGet};
use crate::store::ArtifactStore;
use crate::{info_took, parse};

/// Terminal state of one date's task. All of these are "completed" from the
/// orchestrator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Image bytes fetched and persisted.
    Saved,
    /// The artifact already existed on disk.
    SkippedExisting,
    /// The page or its image produced no content; already logged.
    NoContent,
    /// Structural or filesystem failure; already logged.
    Aborted,
}

/// Per-run tally of task outcomes, so callers can assert counts without
/// scraping logs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub saved: usize,
    pub skipped: usize,
    pub missing: usize,
    pub failed: usize,
}

impl RunReport {
    fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Saved => self.saved += 1,
            TaskOutcome::SkippedExisting => self.skipped += 1,
            TaskOutcome::NoContent => self.missing += 1,
            TaskOutcome::Aborted => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.saved + self.skipped + self.missing + self.failed
    }
}

/// Fetches and persists the strip for a single date.
///
/// The item page lives at `base_url/YYYY/MM/DD` and the artifact is named
/// after the date, which makes re-runs cheap: a date whose file already
/// exists never causes a second image download.
pub async fn process_page<C: HttpGet>(
    fetcher: &Fetcher<C>,
    store: &ArtifactStore,
    base_url: &str,
    date: NaiveDate,
) -> TaskOutcome {
    let page_url = format!("{base_url}/{}", date.format("%Y/%m/%d"));
    let Some(html) = fetcher.fetch_page(&page_url).await else {
        return TaskOutcome::NoContent;
    };

    let image_url = match parse::extract_image_url(html).await {
        Ok(url) => url,
        Err(err) => {
            error!(%date, error = %err, "Failed to get page");
            return TaskOutcome::Aborted;
        }
    };

    info!(%date, "Processing...");
    let name = date.to_string();
    if store.exists(&name).await {
        warn!(path = %store.path_for(&name).display(), "Already exists. Skipping...");
        return TaskOutcome::SkippedExisting;
    }

    let FetchOutcome::Success(image) = fetcher.fetch_raw(&image_url).await else {
        return TaskOutcome::NoContent;
    };

    match store.write(&name, &image).await {
        Ok(()) => {
            info!(name, dir = %store.root().display(), "Saved");
            TaskOutcome::Saved
        }
        Err(err) => {
            error!(%date, error = %err, "Couldn't persist the strip");
            TaskOutcome::Aborted
        }
    }
}

/// Maps [`process_page`] over `dates` with at most `pool_size` tasks in
/// flight, waits for all of them and tallies their outcomes. Completion
/// order is unconstrained; every task owns its date's file and nothing else,
/// so no cross-task coordination is needed.
pub async fn run<C: HttpGet + 'static>(
    fetcher: Arc<Fetcher<C>>,
    store: Arc<ArtifactStore>,
    base_url: &str,
    dates: &[NaiveDate],
    pool_size: usize,
) -> RunReport {
    let mut report = RunReport::default();
    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        info!(url = base_url, "No dates to fetch");
        return report;
    };

    let start_time = Local::now();
    info!(
        first = %first,
        last = %last,
        parallel = pool_size,
        url = base_url,
        "Fetching pages"
    );

    let base_url: Arc<str> = base_url.into();
    let semaphore = Arc::new(Semaphore::new(pool_size.max(1)));
    let mut tasks = JoinSet::new();
    for &date in dates {
        tasks.spawn({
            let semaphore = semaphore.clone();
            let fetcher = fetcher.clone();
            let store = store.clone();
            let base_url = base_url.clone();

            async move {
                // Permit held for the whole task, image fetch included.
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_closed) => return TaskOutcome::Aborted,
                };
                process_page(&fetcher, &store, &base_url, date).await
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => report.record(outcome),
            Err(err) => {
                error!(error = %err, "Worker task died");
                report.failed += 1;
            }
        }
    }

    info_took!(
        start_time,
        "Processed {} pages: {} saved, {} skipped, {} missing, {} failed",
        report.total(),
        report.saved,
        report.skipped,
        report.missing,
        report.failed
    );
    report
}
