//! Captures port interactions into a cassette file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Collects interactions in call order and writes them out as one cassette.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Starts an empty cassette named `name`, to be saved at `path`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let cassette =
            Cassette { name: name.into(), recorded_at: Utc::now(), interactions: Vec::new() };
        Self { path: path.into(), cassette }
    }

    /// Where [`save`](Self::save) writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one interaction, numbered after the ones before it.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Writes the cassette, creating missing parent directories.
    ///
    /// Saving again overwrites the file with everything recorded so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> io::Result<PathBuf> {
        let yaml = self.cassette.to_yaml().map_err(io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, yaml)?;
        Ok(self.path.clone())
    }
}
