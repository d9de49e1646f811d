use crate::downloader::Downloader;
use crate::error::{Error, Result, TransferError};
use crate::event::Event;
use crate::ledger::Ledger;
use crate::models::{DownloadTarget, EpisodeRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Titles handled by a [`Saver::save_all`] call, in processing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub downloaded: Vec<String>,
    pub failed: Vec<String>,
}

/// Downloads episodes into a directory and records each outcome in the ledger.
pub struct Saver<'a> {
    downloader: Downloader,
    out_dir: PathBuf,
    /// Fires with the raw title when a transfer starts.
    pub on_download: Event<'a, str>,
    /// Fires with the written path after the ledger entry is synced.
    pub on_finish: Event<'a, Path>,
    /// Fires with the raw title after the failure is recorded.
    pub on_failed: Event<'a, str>,
}

impl<'a> Saver<'a> {
    pub fn new(downloader: Downloader, out_dir: impl Into<PathBuf>) -> Self {
        Saver {
            downloader,
            out_dir: out_dir.into(),
            on_download: Event::new(),
            on_finish: Event::new(),
            on_failed: Event::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    async fn save_ep(&self, episode: &EpisodeRecord) -> Result<DownloadTarget> {
        let url = episode
            .enclosure_url
            .as_deref()
            .ok_or(Error::MissingEnclosure)?;
        let target = DownloadTarget::new(&self.out_dir, &episode.title, url);
        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(TransferError::Io)?;

        info!("Downloading: {}", target.sanitized_filename);
        self.on_download.call(&episode.title);
        self.downloader.download(url, &target.full_path).await?;
        Ok(target)
    }

    /// Download each episode in turn. A failed episode is recorded and skipped;
    /// only a ledger write error stops the loop.
    pub async fn save_all(
        &self,
        episodes: &[&EpisodeRecord],
        ledger: &mut Ledger,
    ) -> Result<SaveReport> {
        let mut report = SaveReport::default();
        let mut written: HashMap<PathBuf, &str> = HashMap::new();

        for episode in episodes {
            match self.save_ep(episode).await {
                Ok(target) => {
                    if let Some(earlier) = written.insert(target.full_path.clone(), &episode.title) {
                        warn!(
                            "{} overwrote {}, which was downloaded earlier as {:?}",
                            episode.title,
                            target.full_path.display(),
                            earlier
                        );
                    }
                    ledger.record_downloaded(&episode.title)?;
                    info!("Downloaded: {}", target.full_path.display());
                    self.on_finish.call(&target.full_path);
                    report.downloaded.push(episode.title.clone());
                }
                Err(Error::MissingEnclosure) => {
                    warn!("No downloadable content found for: {}", episode.title);
                    self.record_failure(episode, ledger, &mut report)?;
                }
                Err(e) if e.is_episode_failure() => {
                    warn!("Failed to download {}: {}", episode.title, e);
                    self.record_failure(episode, ledger, &mut report)?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    fn record_failure(
        &self,
        episode: &EpisodeRecord,
        ledger: &mut Ledger,
        report: &mut SaveReport,
    ) -> Result<()> {
        ledger.record_failed(&episode.title)?;
        self.on_failed.call(&episode.title);
        report.failed.push(episode.title.clone());
        Ok(())
    }
}
