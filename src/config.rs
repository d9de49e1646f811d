use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const RSS_URL_VAR: &str = "PODCAST_RSS_URL";
pub const DOWNLOAD_LOCATION_VAR: &str = "DOWNLOAD_LOCATION";
pub const TITLE_FILTER_VAR: &str = "TITLE_FILTER";
pub const HTTP_TIMEOUT_VAR: &str = "HTTP_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "HTTP_USER_AGENT";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "podcast_downloader=info";

/// Matches every title.
pub const DEFAULT_TITLE_FILTER: &str = ".*";

/// Settings for a single run, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub rss_url: String,
	pub download_location: PathBuf,
	pub title_filter: String,
	/// Whole-request timeout for the feed fetch and each transfer.
	pub http_timeout: Option<Duration>,
	pub user_agent: String,
}

impl Config {
	/// Read the configuration from the process environment, loading `.env` first if present.
	pub fn from_env() -> Result<Config> {
		dotenvy::dotenv().ok();
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup<F>(lookup: F) -> Result<Config>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
		let required = |key: &str| get(key).ok_or_else(|| Error::Config(format!("{} must be set", key)));

		let rss_url = required(RSS_URL_VAR)?;
		let download_location = PathBuf::from(required(DOWNLOAD_LOCATION_VAR)?);
		let title_filter = get(TITLE_FILTER_VAR).unwrap_or_else(|| DEFAULT_TITLE_FILTER.to_owned());
		let http_timeout = match get(HTTP_TIMEOUT_VAR) {
			None => None,
			Some(raw) => {
				let secs: u64 = raw.trim().parse().map_err(|_| {
					Error::Config(format!("{} must be a whole number of seconds, got {:?}", HTTP_TIMEOUT_VAR, raw))
				})?;
				(secs > 0).then(|| Duration::from_secs(secs))
			}
		};
		let user_agent = get(USER_AGENT_VAR)
			.unwrap_or_else(|| concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned());

		Ok(Config {
			rss_url,
			download_location,
			title_filter,
			http_timeout,
			user_agent,
		})
	}

	/// HTTP client shared by the feed fetch and the episode transfers.
	pub fn http_client(&self) -> Result<reqwest::Client> {
		let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);
		if let Some(timeout) = self.http_timeout {
			builder = builder.timeout(timeout);
		}
		builder
			.build()
			.map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key: &str| map.get(key).cloned()
	}

	#[test]
	fn reads_required_values_and_defaults() {
		let config = Config::from_lookup(lookup(&[
			(RSS_URL_VAR, "https://example.com/feed"),
			(DOWNLOAD_LOCATION_VAR, "/tmp/podcasts"),
		]))
		.unwrap();
		assert_eq!(config.rss_url, "https://example.com/feed");
		assert_eq!(config.download_location, PathBuf::from("/tmp/podcasts"));
		assert_eq!(config.title_filter, ".*");
		assert_eq!(config.http_timeout, None);
		assert!(config.user_agent.starts_with("podcast-downloader/"));
	}

	#[test]
	fn optional_values_override_defaults() {
		let config = Config::from_lookup(lookup(&[
			(RSS_URL_VAR, "https://example.com/feed"),
			(DOWNLOAD_LOCATION_VAR, "out"),
			(TITLE_FILTER_VAR, "^NerdCast"),
			(HTTP_TIMEOUT_VAR, "30"),
			(USER_AGENT_VAR, "tester"),
		]))
		.unwrap();
		assert_eq!(config.title_filter, "^NerdCast");
		assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));
		assert_eq!(config.user_agent, "tester");
	}

	#[test]
	fn missing_required_value_is_config_error() {
		let err = Config::from_lookup(lookup(&[(RSS_URL_VAR, "https://example.com/feed")])).unwrap_err();
		assert!(matches!(err, Error::Config(msg) if msg.contains(DOWNLOAD_LOCATION_VAR)));

		let err = Config::from_lookup(lookup(&[(RSS_URL_VAR, " "), (DOWNLOAD_LOCATION_VAR, "out")])).unwrap_err();
		assert!(matches!(err, Error::Config(msg) if msg.contains(RSS_URL_VAR)));
	}

	#[test]
	fn bad_timeout_is_rejected() {
		let err = Config::from_lookup(lookup(&[
			(RSS_URL_VAR, "https://example.com/feed"),
			(DOWNLOAD_LOCATION_VAR, "out"),
			(HTTP_TIMEOUT_VAR, "soon"),
		]))
		.unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}

	#[test]
	fn zero_timeout_means_none() {
		let config = Config::from_lookup(lookup(&[
			(RSS_URL_VAR, "https://example.com/feed"),
			(DOWNLOAD_LOCATION_VAR, "out"),
			(HTTP_TIMEOUT_VAR, "0"),
		]))
		.unwrap();
		assert_eq!(config.http_timeout, None);
	}
}
