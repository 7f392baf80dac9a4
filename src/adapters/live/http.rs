//! Live adapter for the `HttpClient` port using `reqwest`.

use std::time::Duration;

use reqwest::Client;

use crate::ports::http::{HttpClient, HttpFuture};
use crate::ports::PortError;

/// Only reference sites served over TLS are fetched.
const REQUIRED_SCHEME: &str = "https://";

/// Live HTTP client that performs real GET requests with a per-request timeout.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Creates a client whose requests fail after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("doclink/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl LiveHttpClient {
    async fn fetch(&self, url: &str) -> Result<String, PortError> {
        if !url.starts_with(REQUIRED_SCHEME) {
            return Err(format!("refusing to fetch {url}: only https:// URLs are allowed").into());
        }

        let response = self.client.get(url).send().await.map_err(|e| -> PortError {
            if e.is_timeout() {
                format!("request timed out: {e}").into()
            } else {
                format!("request failed: {e}").into()
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("server answered {}", status.as_u16()).into());
        }

        Ok(response.text().await.map_err(|e| format!("failed to read response body: {e}"))?)
    }
}

impl HttpClient for LiveHttpClient {
    fn get_text<'a>(&'a self, url: &'a str) -> HttpFuture<'a> {
        Box::pin(self.fetch(url))
    }
}
