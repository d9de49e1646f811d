//! One pass of feed → filter → download.

use crate::config::Config;
use crate::downloader::Downloader;
use crate::error::Result;
use crate::filter::{select_episodes, TitleFilter};
use crate::ledger::Ledger;
use crate::requester::Requester;
use crate::saver::{SaveReport, Saver};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries in the feed.
    pub total: usize,
    /// Entries that passed the filter and were not yet downloaded.
    pub selected: usize,
    pub report: SaveReport,
}

/// Run the pipeline once with a freshly built client and saver.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let net = config.http_client()?;
    let requester = Requester::new(net.clone());
    let saver = Saver::new(Downloader::new(net), &config.download_location);
    run_with(config, &requester, &saver).await
}

/// Run the pipeline once using the given collaborators.
///
/// Fails only if the filter is invalid, the feed cannot be read or the ledger
/// cannot be written. Individual episode failures end up in the report.
pub async fn run_with(
    config: &Config,
    requester: &Requester,
    saver: &Saver<'_>,
) -> Result<RunSummary> {
    let filter = TitleFilter::new(config.title_filter.as_str())?;
    let episodes = requester.get_feed(&config.rss_url).await?;
    let mut ledger = Ledger::open(saver.out_dir())?;

    for episode in &episodes {
        if !filter.matches(&episode.title) {
            info!(
                "Skipping: {} (title does not match {:?})",
                episode.title,
                filter.pattern()
            );
        } else if ledger.is_downloaded(&episode.title) {
            info!("Skipping: {} (already downloaded)", episode.title);
        }
    }

    let selected = select_episodes(&episodes, &filter, ledger.downloaded());
    info!(
        "{} of {} feed entries selected for download",
        selected.len(),
        episodes.len()
    );

    let report = saver.save_all(&selected, &mut ledger).await?;
    info!(
        "Run finished: {} downloaded, {} failed",
        report.downloaded.len(),
        report.failed.len()
    );

    Ok(RunSummary {
        total: episodes.len(),
        selected: selected.len(),
        report,
    })
}
