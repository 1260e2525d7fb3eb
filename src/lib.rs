//! Concurrent downloader for GoComics strips.
//!
//! One strip is published per calendar date. A `fetch` run walks a date
//! range, scrapes each strip page for its image address and saves the image
//! bytes under the date's name. Dates that already have a file on disk are
//! skipped, so re-running the same range only downloads what is missing.

pub mod catalog;
pub mod cli;
pub mod dates;
mod error;
pub mod fetch;
pub mod first;
mod macros;
mod parse;
pub mod process;
pub mod store;

pub use error::{Error, Result};

/// Site root every comic slug hangs off of.
pub const SITE: &str = "https://www.gocomics.com";
/// Total connection attempts per logical fetch.
pub const DEFAULT_RETRIES: u32 = 5;
/// Default number of dates processed at once.
pub const DEFAULT_PARALLEL: usize = 5;
