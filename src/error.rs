//! Error types for index construction and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring reference sites or building their indexes.
///
/// An unresolved reference is never an error: it is reported as `None` by the
/// resolver and rendered as the `Invalid` sentinel by the rewriter.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration, e.g. a reference site that is not `https://`.
    #[error("config error: {message}")]
    Config {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A search-index document could not be fetched (transport failure or timeout).
    #[error("fetch error: {message} (url: {url})")]
    Fetch {
        /// The document URL that failed.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// A search-index document is not `<prefix>JSON_ARRAY<suffix>` or the JSON is invalid.
    #[error("parse error: {message} (url: {url})")]
    Parse {
        /// The document URL whose body failed to parse.
        url: String,
        /// Parser error description.
        message: String,
    },

    /// Local file I/O failed.
    #[error("io error: {source} (path: {path})")]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Builds a [`Error::Config`] from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

/// Convenience alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
