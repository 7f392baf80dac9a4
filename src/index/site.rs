//! Reference sites and the ordered site sets used as cache keys.

use std::fmt;

use crate::error::{Error, Result};

/// Scheme every reference site must use.
pub const REQUIRED_SCHEME: &str = "https://";

/// File name of the member search index published by a reference site.
pub const MEMBER_INDEX_FILE: &str = "member-search-index.js";

/// File name of the package search index published by a reference site.
pub const PACKAGE_INDEX_FILE: &str = "package-search-index.js";

/// Base URL of a generated API-documentation site.
///
/// Identity is the exact URL string as configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceSite {
    url: String,
}

impl ReferenceSite {
    /// Validates and wraps a reference-site base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL does not start with `https://`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if !url.starts_with(REQUIRED_SCHEME) {
            return Err(Error::config(format!(
                "reference site {url:?} must be an {REQUIRED_SCHEME} URL"
            )));
        }
        Ok(Self { url })
    }

    /// The base URL exactly as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// URL of `file` directly under the site root.
    #[must_use]
    pub fn document_url(&self, file: &str) -> String {
        format!("{}/{file}", self.url.trim_end_matches('/'))
    }

    /// URL of the member search index.
    #[must_use]
    pub fn member_index_url(&self) -> String {
        self.document_url(MEMBER_INDEX_FILE)
    }

    /// URL of the package search index.
    #[must_use]
    pub fn package_index_url(&self) -> String {
        self.document_url(PACKAGE_INDEX_FILE)
    }

    /// Prefix for class page URLs, always ending in `/`.
    pub(crate) fn page_base(&self) -> String {
        if self.url.ends_with('/') {
            self.url.clone()
        } else {
            format!("{}/", self.url)
        }
    }
}

impl fmt::Display for ReferenceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Ordered, de-duplicated list of reference sites.
///
/// Order is part of the identity: earlier sites shadow later ones when a class
/// name is defined by more than one site, so `[a, b]` and `[b, a]` are
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SiteSet {
    sites: Vec<ReferenceSite>,
}

impl SiteSet {
    /// Builds a site set from configured URLs, keeping the first occurrence of duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any URL is not `https://`. No URL is fetched.
    pub fn new<I, S>(urls: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sites: Vec<ReferenceSite> = Vec::new();
        for url in urls {
            let site = ReferenceSite::new(url)?;
            if !sites.contains(&site) {
                sites.push(site);
            }
        }
        Ok(Self { sites })
    }

    /// Sites in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceSite> {
        self.sites.iter()
    }

    /// Sites in configured order.
    #[must_use]
    pub fn as_slice(&self) -> &[ReferenceSite] {
        &self.sites
    }

    /// Number of distinct sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns `true` if no site is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
