//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::warn;

use crate::adapters::live::{LiveFileSystem, LiveHttpClient};
use crate::adapters::recording::RecordingHttpClient;
use crate::adapters::replaying::ReplayingHttpClient;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::{Error, Result};
use crate::index::IndexStore;
use crate::ports::filesystem::FileSystem;
use crate::ports::http::HttpClient;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying). The filesystem is always live; only network traffic is
/// recorded and replayed.
pub struct ServiceContext {
    /// HTTP client used to fetch search indexes.
    pub http: Arc<dyn HttpClient>,
    /// Filesystem for config files and pages.
    pub fs: Box<dyn FileSystem>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context fetching with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be initialized.
    pub fn live(timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: Arc::new(live_http(timeout)?),
            fs: Box::new(LiveFileSystem),
            recorder: None,
        })
    }

    /// Creates a live context that records every fetch to a cassette at `path`.
    ///
    /// The cassette is written when this context is dropped. This is the
    /// developer-only mechanism behind the `DOCLINK_RECORD` env var.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be initialized.
    pub fn recording(path: &Path, timeout: Duration) -> Result<Self> {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "doclink-session")));
        let http = RecordingHttpClient::new(Box::new(live_http(timeout)?), Arc::clone(&recorder));
        Ok(Self { http: Arc::new(http), fs: Box::new(LiveFileSystem), recorder: Some(recorder) })
    }

    /// Creates a context whose fetches are served from the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        let fs = LiveFileSystem;
        let content = fs
            .read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let cassette = Cassette::from_yaml(&content).map_err(|e| {
            Error::config(format!("failed to parse cassette file {}: {e}", path.display()))
        })?;

        Ok(Self {
            http: Arc::new(ReplayingHttpClient::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(fs),
            recorder: None,
        })
    }

    /// A fresh [`IndexStore`] fetching through this context.
    #[must_use]
    pub fn index_store(&self) -> IndexStore {
        IndexStore::new(Arc::clone(&self.http))
    }
}

fn live_http(timeout: Duration) -> Result<LiveHttpClient> {
    LiveHttpClient::new(timeout)
        .map_err(|e| Error::config(format!("failed to initialize HTTP client: {e}")))
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            let recorder = recorder.lock().unwrap_or_else(PoisonError::into_inner);
            match recorder.save() {
                Ok(path) => eprintln!("Recording saved to: {}", path.display()),
                Err(e) => {
                    warn!(path = %recorder.path().display(), error = %e, "failed to write cassette");
                }
            }
        }
    }
}
