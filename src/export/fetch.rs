use std::time::Duration;

use anyhow::Context;

use crate::{
    export::store::{SourceFetcher, check_not_expired, split_expiry},
    foundation::error::{SlideError, SlideResult},
};

/// Fetches `file://` URLs from disk and `http(s)://` URLs with a blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct UrlFetcher {
    client: reqwest::blocking::Client,
}

impl UrlFetcher {
    /// Fetcher with a fresh HTTP client.
    pub fn new() -> SlideResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("slidetext/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }

    fn fetch_file(url: &str, path: &str) -> SlideResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| SlideError::transport(format!("read {url}: {e}")))
    }

    fn fetch_http(&self, url: &str, timeout: Duration) -> SlideResult<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| SlideError::transport(format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SlideError::transport(format!("GET {url}: HTTP {status}")));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| SlideError::transport(format!("read body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

impl SourceFetcher for UrlFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> SlideResult<Vec<u8>> {
        if let Some(rest) = url.strip_prefix("file://") {
            let (path, expires) = split_expiry(rest)?;
            check_not_expired(url, expires)?;
            return Self::fetch_file(url, path);
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            return self.fetch_http(url, timeout);
        }
        Err(SlideError::transport(format!(
            "unsupported url scheme: {url}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/fetch.rs"]
mod tests;
