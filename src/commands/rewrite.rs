//! `doclink rewrite` command.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::html::HtmlDocument;
use crate::ports::filesystem::FileSystem;
use crate::rewrite::{LinkRewriter, RewriteStats};

/// Output options for the rewrite command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print pages instead of overwriting them.
    pub to_stdout: bool,
    /// Fail when any reference could not be resolved.
    pub deny_invalid: bool,
}

/// Rewrite reference links in each file.
///
/// Files without any rewritten link are not written back.
///
/// # Errors
///
/// Returns an error string if a file cannot be read or written, or if
/// `deny_invalid` is set and some reference was unresolved.
pub fn run(
    fs: &dyn FileSystem,
    rewriter: &LinkRewriter,
    files: &[PathBuf],
    options: Options,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut total = RewriteStats::default();

    for path in files {
        let stats = rewrite_file(fs, rewriter, path, options, out)?;
        eprintln!(
            "{}: {} resolved, {} invalid",
            path.display(),
            stats.resolved,
            stats.invalid
        );
        total.merge(stats);
    }

    info!(
        resolved = total.resolved,
        invalid = total.invalid,
        files = files.len(),
        "rewrite finished"
    );

    if options.deny_invalid && total.invalid > 0 {
        return Err(format!("{} reference(s) could not be resolved", total.invalid));
    }
    Ok(())
}

fn rewrite_file(
    fs: &dyn FileSystem,
    rewriter: &LinkRewriter,
    path: &Path,
    options: Options,
    out: &mut impl Write,
) -> Result<RewriteStats, String> {
    let source = fs
        .read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;

    let mut document = HtmlDocument::parse(source);
    let stats = rewriter.rewrite(document.anchors_mut());

    if options.to_stdout {
        out.write_all(document.render().as_bytes())
            .map_err(|e| format!("failed to write output: {e}"))?;
    } else if stats.resolved + stats.invalid > 0 {
        fs.write(path, &document.render())
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    }

    Ok(stats)
}
