//! Layered settings: YAML file, environment, then command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::index::SiteSet;
use crate::ports::filesystem::FileSystem;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "doclink.yaml";

/// Comma-separated reference-site URLs.
pub const SITES_ENV: &str = "DOCLINK_SITES";

/// Request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DOCLINK_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Reference-site base URLs in priority order.
    pub sites: Vec<String>,
    /// Per-request fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sites: Vec::new(), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Explicit config file; unlike the default file it must exist.
    pub config: Option<PathBuf>,
    /// `--site` values.
    pub sites: Vec<String>,
    /// `--timeout` value.
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Loads settings from the config file, then `env`, then `overrides`.
    ///
    /// `env` looks up an environment variable by name, so callers can pass
    /// `|k| std::env::var(k).ok()` or a fixed map in tests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if an explicit config file cannot be read and
    /// [`Error::Config`] if a file or variable is malformed.
    pub fn load(
        fs: &dyn FileSystem,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let mut settings = match &overrides.config {
            Some(path) => Self::from_file(fs, path)?,
            None if fs.exists(Path::new(DEFAULT_CONFIG_FILE)) => {
                Self::from_file(fs, Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Some(sites) = env(SITES_ENV) {
            settings.sites = split_sites(&sites);
        }
        if let Some(timeout) = env(TIMEOUT_ENV) {
            settings.timeout_secs = timeout.trim().parse().map_err(|e| {
                Error::config(format!("{TIMEOUT_ENV}={timeout:?} is not a number of seconds: {e}"))
            })?;
        }

        if !overrides.sites.is_empty() {
            settings.sites.clone_from(&overrides.sites);
        }
        if let Some(timeout) = overrides.timeout_secs {
            settings.timeout_secs = timeout;
        }

        Ok(settings)
    }

    fn from_file(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let text = fs
            .read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&text)
            .map_err(|e| Error::config(format!("invalid config file {}: {e}", path.display())))
    }

    /// The configured sites as a validated [`SiteSet`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no site is configured or any URL is not `https://`.
    pub fn site_set(&self) -> Result<SiteSet> {
        if self.sites.is_empty() {
            return Err(Error::config(format!(
                "no reference sites configured; use --site, {SITES_ENV} or {DEFAULT_CONFIG_FILE}"
            )));
        }
        SiteSet::new(self.sites.iter().cloned())
    }

    /// The fetch timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn split_sites(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
