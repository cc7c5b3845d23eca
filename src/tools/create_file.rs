use std::fs;
use std::path::Path;

use super::common::{Outcome, resolve_path_within};

/// Write `payload` verbatim, creating parent directories as needed.
pub async fn call(path: &str, payload: &str, root: &Path) -> Outcome {
    let target = match resolve_path_within(root, path) {
        Ok(target) => target,
        Err(e) => return Outcome::failed(format!("Error creating file: {e}")),
    };
    if let Some(parent) = target.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        return Outcome::failed(format!("Error creating directory: {e}"));
    }
    match fs::write(&target, payload) {
        Ok(()) => {
            tracing::info!(%path, bytes = payload.len(), "create: written");
            Outcome::ok(format!("File created successfully: {path}"))
        }
        Err(e) => Outcome::failed(format!("Error creating file: {e}")),
    }
}
