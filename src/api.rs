//! Synchronous client for the comparison dataset endpoint.
//!
//! The dashboard consumes a single JSON document fetched once per session.
//! There is no pagination, no
//! authentication, and no automatic retry: a failed load surfaces as a
//! persistent error state and recovery is left to the caller.
//!
//! Typical usage:
//! ```no_run
//! # use palmares::api::{Client, DataSource};
//! let client = Client::new("https://example.com/data.json");
//! let dataset = client.fetch()?;
//! # Ok::<(), palmares::api::LoadError>(())
//! ```

use crate::models::Dataset;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

/// Why a dataset load failed.
///
/// All variants collapse into the same stable user-facing message
/// ([`LoadError::user_message`]); the raw detail is for logs only.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request never produced a usable response (DNS, connect, timeout...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("request failed with HTTP {0}")]
    Status(u16),
    /// The response body was not a valid comparison document.
    #[error("invalid dataset document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Stable, user-presentable message shared by every failure kind.
    pub fn user_message(&self) -> &'static str {
        "Unable to load rider data. Please refresh to try again."
    }
}

/// Anything that can produce a [`Dataset`]. The HTTP [`Client`] is the
/// production implementation; tests substitute fixtures.
pub trait DataSource {
    fn fetch(&self) -> Result<Dataset, LoadError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub url: String,
    http: HttpClient,
}

impl Client {
    /// Build a client for one dataset URL.
    pub fn new(url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("palmares/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            url: url.into(),
            http,
        }
    }
}

impl DataSource for Client {
    /// Issue one GET against the dataset URL and parse the body.
    ///
    /// ### Errors
    /// - `Transport`: network-level failure
    /// - `Status`: non-2xx response
    /// - `Parse`: body is not a valid document
    fn fetch(&self) -> Result<Dataset, LoadError> {
        let resp = self.http.get(&self.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        let body = resp.text()?;
        Ok(Dataset::from_json(&body)?)
    }
}
