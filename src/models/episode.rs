/// A feed entry, read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    pub title: String,
    pub enclosure_url: Option<String>,
}

impl EpisodeRecord {
    pub fn new(title: impl Into<String>, enclosure_url: Option<String>) -> Self {
        EpisodeRecord {
            title: title.into(),
            enclosure_url,
        }
    }
}
