use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("Malformed date: {0:?}. Expected YYYY-MM-DD.")]
    BadDate(String),

    #[error("Couldn't discover the first strip date at {url}: {reason}")]
    FirstDate { url: String, reason: String },

    #[error("Couldn't resolve output directory {0:?}: {1}")]
    OutputDir(PathBuf, std::io::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
