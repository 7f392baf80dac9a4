//! Replaying adapter for the `HttpClient` port.

use std::sync::Mutex;

use serde_json::json;

use super::extract_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::http::{HttpClient, HttpFuture};

/// Serves recorded fetches from a cassette, matched by URL.
pub struct ReplayingHttpClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpClient {
    /// Creates a replaying client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl HttpClient for ReplayingHttpClient {
    fn get_text<'a>(&'a self, url: &'a str) -> HttpFuture<'a> {
        let interaction = {
            let mut replayer = match self.replayer.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            replayer.take("http", "get_text", &json!({ "url": url }))
        };

        Box::pin(async move {
            match interaction {
                Some(recorded) => extract_result::<String>(&recorded.output, "http::get_text"),
                None => Err(format!("cassette has no recorded response for {url}").into()),
            }
        })
    }
}
