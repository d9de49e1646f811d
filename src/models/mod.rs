mod episode;
mod target;

pub use episode::EpisodeRecord;
pub use target::DownloadTarget;
