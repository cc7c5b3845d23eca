mod applying;
mod filesystem;
mod model;
mod parsing;
mod text;

use std::path::Path;

use super::common::Outcome;

pub use applying::{apply_change, splice_hunks};
pub use filesystem::apply_diff_within;
pub use model::{DiffChange, DiffHunk, DiffLine, LineKind};
pub use parsing::parse_diff;
pub use text::preview;

#[derive(Debug)]
pub enum DiffError {
    /// `+++ b/` names a different file than the `--- a/` before it.
    PathMismatch { old: String, new: String },
    /// A hunk starts inside or before the previous hunk of the same file.
    HunkOrder { path: String, hunk: usize },
    Read { path: String, source: std::io::Error },
    Write { path: String, source: std::io::Error },
}

impl DiffError {
    /// Parse failures reject the whole diff before any file is touched.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            DiffError::PathMismatch { .. } | DiffError::HunkOrder { .. }
        )
    }
}

impl std::fmt::Display for DiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffError::PathMismatch { old, new } => write!(
                f,
                "failed to parse diff: mismatched file paths in diff: {old} vs {new}"
            ),
            DiffError::HunkOrder { path, hunk } => write!(
                f,
                "failed to parse diff: hunk {hunk} of {path} overlaps or precedes the previous hunk"
            ),
            DiffError::Read { path, source } => write!(
                f,
                "failed to apply change to {path}: failed to read file: {source}"
            ),
            DiffError::Write { path, source } => write!(
                f,
                "failed to apply change to {path}: failed to write file: {source}"
            ),
        }
    }
}

impl std::error::Error for DiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiffError::Read { source, .. } | DiffError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Apply a unified diff under `root`. Inline diffs may carry literal `\n` escapes.
pub async fn call(diff: &str, root: &Path) -> Outcome {
    let diff = text::unescape_newlines(diff);
    tracing::debug!("diff: applying {}", preview(&diff));

    match apply_diff_within(root, &diff) {
        Ok(paths) => {
            let mut out = String::from("Diff applied successfully to the repository");
            for path in paths {
                out.push_str(&format!("\nApplied changes to: {path}"));
            }
            Outcome::ok(out)
        }
        Err(e) => {
            tracing::warn!(parse = e.is_parse(), "diff: {e}");
            Outcome::failed(format!("Error applying diff: {e}"))
        }
    }
}

#[cfg(test)]
mod tests;
