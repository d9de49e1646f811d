use crate::format::Format;
use crate::util::legalize_filename;
use std::path::{Path, PathBuf};

/// Where an episode's payload lands on disk. Recomputed every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub sanitized_filename: String,
    pub extension: String,
    pub full_path: PathBuf,
}

impl DownloadTarget {
    pub fn new(out_dir: impl AsRef<Path>, title: &str, enclosure_url: &str) -> Self {
        let sanitized_filename = legalize_filename(title);
        let extension = Format::from_url(enclosure_url).get_extension().to_owned();
        let full_path = out_dir
            .as_ref()
            .join(format!("{}{}", sanitized_filename, extension));
        DownloadTarget {
            sanitized_filename,
            extension,
            full_path,
        }
    }
}
