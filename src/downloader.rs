use crate::error::TransferError;
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Copies remote payloads to local files.
#[derive(Clone)]
pub struct Downloader {
	net: Client,
}

impl Downloader {
	pub fn new(net: Client) -> Self {
		Downloader { net }
	}

	/// Stream `url` into `path`, replacing any existing file. Returns the bytes written.
	///
	/// On error a partial file may be left behind.
	pub async fn download(&self, url: &str, path: impl AsRef<Path>) -> Result<u64, TransferError> {
		let path = path.as_ref();
		let response = self.net.get(url).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(TransferError::Status(status));
		}

		let mut file = File::create(path).await?;
		let mut stream = response.bytes_stream();
		let mut written = 0u64;
		while let Some(chunk) = stream.next().await {
			let chunk = chunk?;
			file.write_all(&chunk).await?;
			written += chunk.len() as u64;
		}
		file.flush().await?;
		file.sync_all().await?;
		debug!("Wrote {} bytes from {} to {}", written, url, path.display());
		Ok(written)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{method, path as url_path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[tokio::test]
	async fn writes_payload_and_overwrites() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(url_path("/ep.mp3"))
			.respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio-bytes".to_vec()))
			.mount(&server)
			.await;

		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("ep.mp3");
		std::fs::write(&target, b"stale content that is longer").unwrap();

		let downloader = Downloader::new(Client::new());
		let written = downloader
			.download(&format!("{}/ep.mp3", server.uri()), &target)
			.await
			.unwrap();

		assert_eq!(written, 11);
		assert_eq!(std::fs::read(&target).unwrap(), b"audio-bytes");
	}

	#[tokio::test]
	async fn error_status_is_a_transfer_failure() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(404))
			.mount(&server)
			.await;

		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("missing.mp3");
		let err = Downloader::new(Client::new())
			.download(&format!("{}/missing.mp3", server.uri()), &target)
			.await
			.unwrap_err();

		assert!(matches!(err, TransferError::Status(s) if s.as_u16() == 404));
		assert!(!target.exists());
	}

	#[tokio::test]
	async fn unwritable_path_is_an_io_failure() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
			.mount(&server)
			.await;

		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("no-such-dir").join("ep.mp3");
		let err = Downloader::new(Client::new())
			.download(&server.uri(), &target)
			.await
			.unwrap_err();

		assert!(matches!(err, TransferError::Io(_)));
	}
}
