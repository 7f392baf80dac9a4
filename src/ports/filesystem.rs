//! Disk access for config files and rendered pages.

use std::path::Path;

use super::PortError;

/// Reads and writes whole text files.
pub trait FileSystem: Send + Sync {
    /// Contents of the UTF-8 file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Replaces the file at `path` with `contents`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Whether a file exists at `path`; used to probe for the default config file.
    fn exists(&self, path: &Path) -> bool;
}
