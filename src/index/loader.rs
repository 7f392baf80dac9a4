//! Fetches and parses the search-index documents of reference sites.

use futures::future::join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::entry::{MemberEntry, MemberIndex, PackageEntry, PackageIndex};
use super::site::{ReferenceSite, SiteSet};
use super::{SiteIndex, SiteIndexes};
use crate::error::{Error, Result};
use crate::ports::http::HttpClient;

/// Assignment that opens `member-search-index.js`.
pub const MEMBER_INDEX_PREFIX: &str = "memberSearchIndex = ";

/// Assignment that opens `package-search-index.js`.
pub const PACKAGE_INDEX_PREFIX: &str = "packageSearchIndex = ";

/// Call that closes both index documents.
pub const INDEX_SUFFIX: &str = ";updateSearchResults();";

/// Strips the `<prefix>…<suffix>` wrapper from an index document and parses the JSON array.
///
/// # Errors
///
/// Returns [`Error::Parse`] naming `url` if the wrapper is missing or the JSON is invalid.
pub fn parse_search_index<T: DeserializeOwned>(
    url: &str,
    text: &str,
    prefix: &str,
) -> Result<Vec<T>> {
    let parse_error = |message: String| Error::Parse { url: url.to_string(), message };

    let json = text
        .trim()
        .strip_prefix(prefix)
        .ok_or_else(|| parse_error(format!("document does not start with {prefix:?}")))?
        .strip_suffix(INDEX_SUFFIX)
        .ok_or_else(|| parse_error(format!("document does not end with {INDEX_SUFFIX:?}")))?
        .trim();

    serde_json::from_str(json).map_err(|e| parse_error(format!("invalid index JSON: {e}")))
}

async fn fetch(http: &dyn HttpClient, url: &str) -> Result<String> {
    let body = http
        .get_text(url)
        .await
        .map_err(|e| Error::Fetch { url: url.to_string(), message: e.to_string() })?;
    debug!(url, bytes = body.len(), "fetched search index");
    Ok(body)
}

/// Loads both index documents of one site.
///
/// # Errors
///
/// Returns [`Error::Fetch`] or [`Error::Parse`] naming the document that failed.
/// No partial index is ever returned.
pub async fn load_site(http: &dyn HttpClient, site: &ReferenceSite) -> Result<SiteIndex> {
    let member_url = site.member_index_url();
    let package_url = site.package_index_url();

    let (member_text, package_text) =
        tokio::join!(fetch(http, &member_url), fetch(http, &package_url));

    let members: Vec<MemberEntry> =
        parse_search_index(&member_url, &member_text?, MEMBER_INDEX_PREFIX)?;
    let packages: Vec<PackageEntry> =
        parse_search_index(&package_url, &package_text?, PACKAGE_INDEX_PREFIX)?;

    Ok(SiteIndex {
        site: site.clone(),
        members: MemberIndex::from_entries(members),
        packages: PackageIndex::from_entries(packages),
    })
}

/// Loads every site of `sites` concurrently.
///
/// Each site loads independently; when several fail, all failures are logged
/// and the first one in configured order is returned.
///
/// # Errors
///
/// Returns the error of the first failing site.
pub async fn load_sites(http: &dyn HttpClient, sites: &SiteSet) -> Result<SiteIndexes> {
    let results = join_all(sites.iter().map(|site| load_site(http, site))).await;

    for (site, result) in sites.iter().zip(&results) {
        if let Err(e) = result {
            warn!(site = %site, error = %e, "failed to load reference site");
        }
    }

    let sites = results.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(SiteIndexes::new(sites))
}
