use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Invalid title filter: {0}")]
	InvalidFilter(#[from] regex::Error),

	/// The feed could not be fetched or parsed. Aborts the whole run.
	#[error("Feed unavailable at {address}: {reason}")]
	FeedUnavailable { address: String, reason: String },

	/// The episode carries no media URL.
	#[error("Episode has no enclosure")]
	MissingEnclosure,

	#[error("Transfer failed: {0}")]
	Transfer(#[from] TransferError),

	/// The ledger could not be read or appended to.
	#[error("Ledger error: {0}")]
	Ledger(#[source] std::io::Error),
}

impl Error {
	pub(crate) fn feed_unavailable(address: impl Into<String>, reason: impl ToString) -> Self {
		Error::FeedUnavailable {
			address: address.into(),
			reason: reason.to_string(),
		}
	}

	/// Whether this error only concerns a single episode.
	pub fn is_episode_failure(&self) -> bool {
		matches!(self, Error::MissingEnclosure | Error::Transfer(_))
	}
}

/// Failure while copying an episode payload to disk.
#[derive(Debug, Error)]
pub enum TransferError {
	#[error("request error: {0}")]
	Request(#[from] reqwest::Error),

	#[error("status code was not successful: {0}")]
	Status(StatusCode),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
