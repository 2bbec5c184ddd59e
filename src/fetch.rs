//! Source image fetching.
//!
//! The [`Fetcher`] trait is the pipeline's only view of the network. The
//! production [`HttpFetcher`] streams the response body chunk by chunk and
//! keeps a running byte count against the configured ceiling, so an
//! oversized or adversarial source aborts early instead of buffering into
//! memory. The timeout covers the whole transfer, headers and body. Both
//! overruns fail the request outright; partial data is never returned.

use crate::error::FetchError;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Network collaborator: fetch the full body of `url`, bounded by a timeout
/// and a maximum byte count.
pub trait Fetcher: Send + Sync {
    fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
        max_bytes: u64,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// reqwest-backed fetcher. Clone is cheap; the inner client is shared.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
        max_bytes: u64,
    ) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let mut body = Vec::new();
        let mut received: u64 = 0;
        // Stream so the size check runs while reading, not after buffering.
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| classify(e, timeout))?
        {
            received += chunk.len() as u64;
            if received > max_bytes {
                return Err(FetchError::TooLarge(max_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::TimedOut(timeout.as_millis() as u64)
    } else {
        FetchError::Request(err.to_string())
    }
}
