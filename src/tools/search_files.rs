use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::common::{Outcome, relative_display, resolve_path_within};

fn is_excluded_dir(name: &str) -> bool {
    matches!(name, ".git" | "target" | "node_modules")
}

/// Binary files have a NUL somewhere in their first KiB.
fn is_text(content: &[u8]) -> bool {
    !content.iter().take(1024).any(|b| *b == 0)
}

/// Plain substring search over text files under `directory`, in path order.
pub async fn call(pattern: &str, directory: &str, root: &Path) -> Outcome {
    let res = (|| -> std::io::Result<String> {
        let base = resolve_path_within(root, directory)?;
        let walker = WalkDir::new(&base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.depth() > 0
                    && e.file_type().is_dir()
                    && is_excluded_dir(&e.file_name().to_string_lossy()))
            });

        let mut out = String::from("Search results:\n");
        let mut hits = 0usize;
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(content) = fs::read(entry.path()) else {
                continue;
            };
            if !is_text(&content) {
                continue;
            }
            if String::from_utf8_lossy(&content).contains(pattern) {
                hits += 1;
                out.push_str(&format!(
                    "Found in: {}\n",
                    relative_display(root, entry.path())
                ));
            }
        }
        tracing::debug!(%pattern, hits, "search: done");
        Ok(out)
    })();

    match res {
        Ok(found) => Outcome::ok(found),
        Err(e) => Outcome::failed(format!("Error searching files: {e}")),
    }
}
