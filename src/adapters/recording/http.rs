//! Recording adapter for the `HttpClient` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::http::{HttpClient, HttpFuture};

/// Records fetches while delegating to an inner implementation.
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpClient {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn HttpClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct UrlInput<'a> {
    url: &'a str,
}

impl HttpClient for RecordingHttpClient {
    fn get_text<'a>(&'a self, url: &'a str) -> HttpFuture<'a> {
        Box::pin(async move {
            let result = self.inner.get_text(url).await;
            record_result(&self.recorder, "http", "get_text", &UrlInput { url }, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;

    struct FixedHttpClient;

    impl HttpClient for FixedHttpClient {
        fn get_text<'a>(&'a self, url: &'a str) -> HttpFuture<'a> {
            Box::pin(async move {
                if url.ends_with("missing.js") {
                    Err("server answered 404".into())
                } else {
                    Ok(format!("body of {url}"))
                }
            })
        }
    }

    #[tokio::test]
    async fn records_successes_and_failures() {
        let dir = std::env::temp_dir().join("doclink_rec_http_test");
        let cassette_path = dir.join("http.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test")));

        let client = RecordingHttpClient::new(Box::new(FixedHttpClient), Arc::clone(&recorder));
        let ok = client.get_text("https://a.example/index.js").await;
        let err = client.get_text("https://a.example/missing.js").await;
        assert_eq!(ok.unwrap(), "body of https://a.example/index.js");
        assert!(err.is_err());

        recorder.lock().unwrap().save().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        let cassette = Cassette::from_yaml(&content).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].input["url"], "https://a.example/index.js");
        assert_eq!(cassette.interactions[0].output["ok"], "body of https://a.example/index.js");
        assert_eq!(cassette.interactions[1].output["err"], "server answered 404");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
