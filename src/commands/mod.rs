//! Command dispatch and handlers.

pub mod resolve;
pub mod rewrite;

use std::env;
use std::io;
use std::path::PathBuf;

use crate::adapters::live::LiveFileSystem;
use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::resolve::Resolver;
use crate::rewrite::LinkRewriter;

/// Records every index fetch to the cassette file named by this variable.
pub const RECORD_ENV: &str = "DOCLINK_RECORD";

/// Serves every index fetch from the cassette file named by this variable.
pub const REPLAY_ENV: &str = "DOCLINK_REPLAY";

/// Dispatch a parsed command line to its handler.
///
/// When `DOCLINK_RECORD` is set to a file path, all index fetches are recorded
/// to that cassette; when `DOCLINK_REPLAY` is set, they are served from it.
///
/// # Errors
///
/// Returns an error string if configuration, index construction, or the
/// selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = Settings::load(&LiveFileSystem, |k| env::var(k).ok(), &cli.global.overrides())
        .map_err(|e| e.to_string())?;

    let ctx = if let Ok(path) = env::var(REPLAY_ENV) {
        ServiceContext::replaying(&PathBuf::from(path))
    } else if let Ok(path) = env::var(RECORD_ENV) {
        ServiceContext::recording(&PathBuf::from(path), settings.timeout())
    } else {
        ServiceContext::live(settings.timeout())
    }
    .map_err(|e| e.to_string())?;

    dispatch_with_context(&cli.command, &ctx, &settings)
}

/// Dispatch a command with the given service context and settings.
///
/// # Errors
///
/// Returns an error string if index construction or the command fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), String> {
    let rewriter = build_rewriter(ctx, settings)?;
    let mut stdout = io::stdout().lock();

    match command {
        Command::Resolve { tokens } => resolve::run(&rewriter, tokens, &mut stdout),
        Command::Rewrite { files, stdout: to_stdout, deny_invalid } => {
            let options = rewrite::Options { to_stdout: *to_stdout, deny_invalid: *deny_invalid };
            rewrite::run(ctx.fs.as_ref(), &rewriter, files, options, &mut stdout)
        }
    }
}

/// Builds the site indexes for the configured sites and wraps them in a rewriter.
fn build_rewriter(ctx: &ServiceContext, settings: &Settings) -> Result<LinkRewriter, String> {
    let sites = settings.site_set().map_err(|e| e.to_string())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;

    let store = ctx.index_store();
    let indexes = runtime.block_on(store.get_or_build(&sites)).map_err(|e| e.to_string())?;
    Ok(LinkRewriter::new(Resolver::new(indexes)))
}
