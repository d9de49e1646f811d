use crate::error::{Error, Result};
use crate::models::EpisodeRecord;
use crate::util::fold_newlines;
use reqwest::Client;
use tracing::debug;

/// Fetches a feed and turns it into episode records.
pub struct Requester {
	net: Client,
}

impl Requester {
	pub fn new(net: Client) -> Self {
		Requester { net }
	}

	/// Fetch and parse the feed at `address`, returning its episodes in feed order.
	///
	/// `http://` and `https://` addresses are requested over the network, anything
	/// else is read as a local file.
	pub async fn get_feed(&self, address: &str) -> Result<Vec<EpisodeRecord>> {
		let content = if is_url(address) {
			self.get_as_bytes(address).await?
		} else {
			let path = address.strip_prefix("file://").unwrap_or(address);
			tokio::fs::read(path)
				.await
				.map_err(|e| Error::feed_unavailable(address, e))?
		};
		let episodes = parse_feed(&content).map_err(|reason| Error::feed_unavailable(address, reason))?;
		debug!("Parsed {} entries from {}", episodes.len(), address);
		Ok(episodes)
	}

	async fn get_as_bytes(&self, url: &str) -> Result<Vec<u8>> {
		let response = self
			.net
			.get(url)
			.send()
			.await
			.map_err(|e| Error::feed_unavailable(url, e))?;
		let status = response.status();
		if !status.is_success() {
			return Err(Error::feed_unavailable(
				url,
				format!("Status code was not successful.\nCode: {}", status),
			));
		}
		let bytes = response
			.bytes()
			.await
			.map_err(|e| Error::feed_unavailable(url, e))?;
		Ok(bytes.to_vec())
	}
}

pub fn is_url(address: &str) -> bool {
	let lower = address.trim_start().to_ascii_lowercase();
	lower.starts_with("http://") || lower.starts_with("https://")
}

/// Parse feed content as RSS 2.0, falling back to Atom.
pub fn parse_feed(content: &[u8]) -> std::result::Result<Vec<EpisodeRecord>, String> {
	match parse_as_rss(content) {
		Ok(episodes) => Ok(episodes),
		Err(rss_err) => {
			debug!("Failed to parse as RSS: {}, trying Atom", rss_err);
			parse_as_atom(content).map_err(|atom_err| {
				format!(
					"Could not parse feed as RSS or Atom. RSS error: {}. Atom error: {}",
					rss_err, atom_err
				)
			})
		}
	}
}

fn parse_as_rss(content: &[u8]) -> std::result::Result<Vec<EpisodeRecord>, rss::Error> {
	let channel = rss::Channel::read_from(content)?;
	let episodes = channel
		.items()
		.iter()
		.map(|item| {
			let title = fold_newlines(item.title().unwrap_or(""));
			let enclosure_url = item.enclosure().and_then(|enc| non_empty(enc.url()));
			EpisodeRecord::new(title, enclosure_url)
		})
		.collect();
	Ok(episodes)
}

fn parse_as_atom(content: &[u8]) -> std::result::Result<Vec<EpisodeRecord>, atom_syndication::Error> {
	let feed = atom_syndication::Feed::read_from(content)?;
	let episodes = feed
		.entries()
		.iter()
		.map(|entry| {
			let title = fold_newlines(entry.title().as_str());
			let enclosure_url = entry
				.links()
				.iter()
				.find(|link| link.rel() == "enclosure")
				.and_then(|link| non_empty(link.href()));
			EpisodeRecord::new(title, enclosure_url)
		})
		.collect();
	Ok(episodes)
}

fn non_empty(url: &str) -> Option<String> {
	let url = url.trim();
	(!url.is_empty()).then(|| url.to_owned())
}
