//! Resolve compact Javadoc cross-reference tokens into documentation URLs.
//!
//! Documentation pages link to API members with short tokens such as
//! `com.example.Widget#build(int)`. This crate loads the search indexes
//! published by one or more Javadoc sites, resolves each token to the page
//! (and anchor) documenting it, and rewrites link targets in place. Tokens
//! that cannot be resolved become the literal href `Invalid`.
//!
//! ```no_run
//! # async fn demo() -> doclink::Result<()> {
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use doclink::adapters::live::LiveHttpClient;
//! use doclink::{IndexStore, LinkRewriter, Resolver, SiteSet};
//!
//! let http = LiveHttpClient::new(Duration::from_secs(20))
//!     .map_err(|e| doclink::Error::config(e.to_string()))?;
//! let store = IndexStore::new(Arc::new(http));
//! let sites = SiteSet::new(["https://docs.example.com/api/"])?;
//! let rewriter = LinkRewriter::new(Resolver::new(store.get_or_build(&sites).await?));
//! assert_eq!(rewriter.rewrite_href("https://example.org/"), None);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod html;
pub mod index;
pub mod ports;
pub mod resolve;
pub mod rewrite;
pub mod token;

use clap::Parser;

pub use error::{Error, Result};
pub use index::{IndexStore, ReferenceSite, SiteSet};
pub use resolve::Resolver;
pub use rewrite::{Anchor, LinkRewriter, RewriteStats, INVALID_HREF};
pub use token::{parse as parse_token, ParsedHref, Reference};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["doclink", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_rejects_insecure_site_before_fetching() {
        let err = run(["doclink", "--site", "http://docs.example.com/", "resolve", "Widget"])
            .unwrap_err();
        assert!(err.contains("https://"));
    }
}
