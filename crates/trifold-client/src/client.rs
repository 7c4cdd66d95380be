//! Async HTTP client for the frame server.
//!
//! URL shape and decoding mirror the frame-server contract: `/frame` is the
//! first frame, `/frame/{index}` the rest, `/frames` lists names, and the
//! `X-Frames` response header advertises the total count. Successful
//! responses are cached by URL for the whole session, so layout changes
//! never re-fetch a frame the viewport has already shown.

use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Base URL used when neither the builder nor `API_URL` supplies one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1001";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_CAPACITY: u64 = 64;

/// Client for fetching frames from the frame server.
#[derive(Debug)]
pub struct FrameClient {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<String, String>,
    total_frames: OnceLock<u64>,
}

/// Builder for [`FrameClient`].
#[derive(Debug)]
pub struct FrameClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    cache_capacity: u64,
}

impl Default for FrameClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl FrameClientBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame-server base URL. Trailing slashes are removed.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client, validating the base URL.
    pub fn build(self) -> Result<FrameClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(FrameClient {
            http,
            base_url,
            cache: Cache::new(self.cache_capacity),
            total_frames: OnceLock::new(),
        })
    }
}

impl FrameClient {
    /// Create a builder for a new client.
    #[must_use]
    pub fn builder() -> FrameClientBuilder {
        FrameClientBuilder::new()
    }

    /// The normalized base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Total frame count advertised by the server, once seen.
    #[must_use]
    pub fn total_frames(&self) -> Option<u64> {
        self.total_frames.get().copied()
    }

    /// URL of the frame at `index`: `/frame` for 0, `/frame/{index}` after.
    #[must_use]
    pub fn frame_url(&self, index: usize) -> String {
        if index == 0 {
            format!("{}/frame", self.base_url)
        } else {
            format!("{}/frame/{index}", self.base_url)
        }
    }

    /// Fetch one frame's markup, from cache when possible.
    pub async fn fetch_frame(&self, index: usize) -> Result<String> {
        self.fetch_text(self.frame_url(index)).await
    }

    /// Drop the cached body for one frame, forcing the next fetch to hit
    /// the network.
    pub async fn invalidate_frame(&self, index: usize) {
        self.cache.invalidate(&self.frame_url(index)).await;
    }

    /// List the frame names advertised at `/frames`.
    pub async fn frames(&self) -> Result<Vec<String>> {
        let body = self.fetch_text(format!("{}/frames", self.base_url)).await?;
        serde_json::from_str(&body).map_err(ClientError::InvalidFrameList)
    }

    async fn fetch_text(&self, url: String) -> Result<String> {
        if let Some(hit) = self.cache.get(&url).await {
            debug!(%url, "cache hit");
            return Ok(hit);
        }
        let body = self.fetch_uncached(&url).await?;
        self.cache.insert(url, body.clone()).await;
        Ok(body)
    }

    async fn fetch_uncached(&self, url: &str) -> Result<String> {
        debug!(%url, "fetching");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(total) = response
            .headers()
            .get("x-frames")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&total| total > 0)
        {
            let _ = self.total_frames.set(total);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if content_type.contains("json") || content_type.starts_with("text/") {
            Ok(response.text().await?)
        } else {
            Err(ClientError::BinaryBody {
                content_type,
                url: url.to_string(),
            })
        }
    }
}
