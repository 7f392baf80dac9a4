//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

/// Top-level CLI parser for `doclink`.
#[derive(Debug, Parser)]
#[command(name = "doclink", version, about = "Resolve Javadoc cross-reference links")]
pub struct Cli {
    /// Settings shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options that select and configure the reference sites.
///
/// They are accepted before the subcommand only, so every `--site` lands in
/// one ordered list.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file (defaults to ./doclink.yaml when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Reference-site base URL; repeat in priority order.
    #[arg(long = "site", value_name = "URL")]
    pub sites: Vec<String>,
    /// Fetch timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl GlobalArgs {
    /// Command-line overrides for settings loading.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            sites: self.sites.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the documentation URL for each token.
    Resolve {
        /// Tokens such as `com.example.Widget#build(int)`.
        #[arg(required = true, value_name = "TOKEN")]
        tokens: Vec<String>,
    },
    /// Rewrite reference links in HTML files.
    Rewrite {
        /// HTML files to rewrite in place.
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
        /// Print rewritten pages to stdout instead of overwriting them.
        #[arg(long)]
        stdout: bool,
        /// Exit with an error if any link could not be resolved.
        #[arg(long)]
        deny_invalid: bool,
    },
}
