//! Selecting which feed entries to download.

use crate::error::Result;
use crate::models::EpisodeRecord;
use regex::Regex;
use std::collections::HashSet;

/// A title pattern, matched from the start of the title.
#[derive(Debug, Clone)]
pub struct TitleFilter {
    pattern: String,
    regex: Regex,
}

impl TitleFilter {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(TitleFilter { pattern, regex })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

/// Episodes whose title matches `filter` and is not in `downloaded`, in feed order.
pub fn select_episodes<'e>(
    episodes: &'e [EpisodeRecord],
    filter: &TitleFilter,
    downloaded: &HashSet<String>,
) -> Vec<&'e EpisodeRecord> {
    episodes
        .iter()
        .filter(|ep| filter.matches(&ep.title) && !downloaded.contains(&ep.title))
        .collect()
}
