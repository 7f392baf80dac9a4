//! `doclink resolve` command.

use std::io::Write;

use crate::rewrite::LinkRewriter;

/// Print `<token>\t<target>` for each token.
///
/// Tokens that are not cross-references are echoed unchanged as their own
/// target, matching what the rewriter does to such links.
///
/// # Errors
///
/// Returns an error string if writing to `out` fails.
pub fn run(rewriter: &LinkRewriter, tokens: &[String], out: &mut impl Write) -> Result<(), String> {
    for token in tokens {
        let target = rewriter.rewrite_href(token).unwrap_or_else(|| token.clone());
        writeln!(out, "{token}\t{target}").map_err(|e| format!("failed to write output: {e}"))?;
    }
    Ok(())
}
