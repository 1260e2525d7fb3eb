//! The retrying fetch layer.
//!
//! Every network exchange in the crate goes through [`Fetcher`]: a transport
//! (the [`HttpGet`] seam, so tests can substitute a scripted one), a bounded
//! [`RetryPolicy`] that re-issues requests on connection-level failures only,
//! and a flattening of every terminal state into a [`FetchOutcome`] tag so
//! callers branch on data instead of catching errors.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::DEFAULT_RETRIES;

/// Transport-level classification of a failed GET.
#[derive(Debug, Error)]
pub enum GetError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out")]
    Timeout,
    #[error("nothing published at this address")]
    NotFound,
    #[error("http status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

impl GetError {
    /// Only connection-level failures are worth re-issuing the same request
    /// for; everything else came from a server that already answered.
    pub fn is_transient(&self) -> bool {
        matches!(self, GetError::Connect(_))
    }
}

/// Terminal state of one logical fetch. Callers treat everything but
/// `Success` as "skip this unit of work".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Bytes were obtained.
    Success(Bytes),
    /// The remote answered but has nothing for this address.
    Empty,
    /// Connections kept failing until the retry budget ran out.
    Transient,
    /// A failure retrying can't help with.
    Permanent,
}

impl FetchOutcome {
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            FetchOutcome::Success(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// The one seam between this crate and the network.
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str) -> core::result::Result<Bytes, GetError>;
}

/// Bounded retry for transient failures. `retries` is the total number of
/// attempts a logical fetch may consume.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    retries: u32,
}

impl RetryPolicy {
    pub fn new(retries: u32) -> Self {
        Self {
            retries: retries.max(1),
        }
    }

    pub(crate) async fn run<T, F, Fut>(
        &self,
        url: &str,
        mut attempt: F,
    ) -> core::result::Result<T, GetError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = core::result::Result<T, GetError>>,
    {
        let mut retries = self.retries;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    retries -= 1;
                    if retries == 0 {
                        return Err(err);
                    }
                    warn!(url, retries_left = retries, "Failed to get, retrying...");
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRIES)
    }
}

/// Ties a transport and a retry policy together.
pub struct Fetcher<C> {
    client: C,
    policy: RetryPolicy,
}

impl<C: HttpGet> Fetcher<C> {
    pub fn new(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// One logical GET. Never fails past this boundary: every terminal state
    /// is logged here and folded into a [`FetchOutcome`].
    pub async fn fetch_raw(&self, url: &str) -> FetchOutcome {
        info!(url, "Asking for...");
        match self.policy.run(url, || self.client.get(url)).await {
            Ok(bytes) => {
                debug!(url, size = bytes.len(), "Got...");
                FetchOutcome::Success(bytes)
            }
            Err(GetError::NotFound) => {
                debug!(url, "Nothing published here");
                FetchOutcome::Empty
            }
            Err(err) if err.is_transient() => {
                error!(url, error = %err, "Failed to get, no retries left. Skipping...");
                FetchOutcome::Transient
            }
            Err(err) => {
                error!(url, error = %err, "Failed to get. Skipping...");
                FetchOutcome::Permanent
            }
        }
    }

    /// Fetches a page as text. Absence is the failure signal at this layer;
    /// whatever went wrong was already logged by [`Fetcher::fetch_raw`].
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        self.fetch_raw(url)
            .await
            .into_bytes()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Production transport over a shared `reqwest::Client`.
#[derive(Clone)]
pub struct WebClient {
    client: reqwest::Client,
}

impl WebClient {
    pub fn new() -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("comicdl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpGet for WebClient {
    async fn get(&self, url: &str) -> core::result::Result<Bytes, GetError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(GetError::NotFound),
            status if !status.is_success() => Err(GetError::Status(status.as_u16())),
            _ => response.bytes().await.map_err(classify),
        }
    }
}

fn classify(err: reqwest::Error) -> GetError {
    if err.is_connect() {
        GetError::Connect(err.to_string())
    } else if err.is_timeout() {
        GetError::Timeout
    } else {
        GetError::Transport(err.to_string())
    }
}
