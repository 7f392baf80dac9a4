//! HTTP port for fetching search-index documents from reference sites.

use std::future::Future;
use std::pin::Pin;

use super::PortError;

/// Boxed future type alias used by [`HttpClient`] to keep the trait dyn-compatible.
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<String, PortError>> + Send + 'a>>;

/// Fetches text documents over HTTP.
///
/// Abstracting the network allows index construction to be replayed from a
/// cassette or served from memory in tests.
pub trait HttpClient: Send + Sync {
    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is refused, the request fails or times out,
    /// or the server answers with a non-success status.
    fn get_text<'a>(&'a self, url: &'a str) -> HttpFuture<'a>;
}
