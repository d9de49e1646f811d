use podcast_downloader::config::DEFAULT_LOG_FILTER;
use podcast_downloader::{run, Config};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
	let config = Config::from_env();

	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
		)
		.init();

	let config = match config {
		Ok(config) => config,
		Err(e) => {
			error!("{}", e);
			return ExitCode::FAILURE;
		}
	};
	info!(
		"Fetching {} into {}",
		config.rss_url,
		config.download_location.display()
	);

	match run(&config).await {
		Ok(summary) => {
			info!(
				"Done! {} new, {} failed, {} feed entries",
				summary.report.downloaded.len(),
				summary.report.failed.len(),
				summary.total
			);
			ExitCode::SUCCESS
		}
		Err(e) => {
			error!("{}", e);
			ExitCode::FAILURE
		}
	}
}
