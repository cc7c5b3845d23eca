use std::fs;
use std::path::Path;

use super::common::{Outcome, resolve_path_within};

/// One line per entry, sorted by name: `<d|f> <size> <name>`.
pub async fn call(path: &str, root: &Path) -> Outcome {
    let res = (|| -> std::io::Result<String> {
        let dir = resolve_path_within(root, path)?;
        let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|e| e.file_name());

        let mut out = String::from("Directory contents:\n");
        for entry in entries {
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            let kind = if meta.is_dir() { 'd' } else { 'f' };
            out.push_str(&format!(
                "{kind} {:>8} {}\n",
                meta.len(),
                entry.file_name().to_string_lossy()
            ));
        }
        Ok(out)
    })();

    match res {
        Ok(listing) => Outcome::ok(listing),
        Err(e) => Outcome::failed(format!("Error reading directory: {e}")),
    }
}
