use std::fs;
use std::path::Path;

use super::DiffError;
use super::applying::apply_change;
use super::model::DiffChange;
use super::parsing::parse_diff;
use crate::tools::common::resolve_path_within;

/// Parse `raw` and patch each named file under `root`, in diff order.
/// Stops at the first file that fails; files already written stay written.
/// Returns the paths that were patched.
pub fn apply_diff_within(root: &Path, raw: &str) -> Result<Vec<String>, DiffError> {
    let changes = parse_diff(raw)?;
    tracing::debug!(files = changes.len(), "diff: parsed");

    let mut applied = Vec::with_capacity(changes.len());
    for change in changes {
        apply_file_change(root, &change)?;
        tracing::info!(
            path = %change.file_path,
            hunks = change.hunks.len(),
            "diff: applied changes"
        );
        applied.push(change.file_path);
    }
    Ok(applied)
}

fn apply_file_change(root: &Path, change: &DiffChange) -> Result<(), DiffError> {
    let read_error = |source| DiffError::Read {
        path: change.file_path.clone(),
        source,
    };
    let target = resolve_path_within(root, &change.file_path).map_err(read_error)?;
    let before = fs::read_to_string(&target).map_err(read_error)?;

    let after = apply_change(&before, change);

    fs::write(&target, after).map_err(|source| DiffError::Write {
        path: change.file_path.clone(),
        source,
    })
}
