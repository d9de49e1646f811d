#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod downloader;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod ledger;
pub mod models;
pub mod pipeline;
pub mod requester;
pub mod saver;

mod util;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{run, RunSummary};
