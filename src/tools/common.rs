use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// What a handler reports back: the text the model will read, and whether it worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub ok: bool,
    #[serde(rename = "output")]
    pub text: String,
}

impl Outcome {
    pub fn ok(text: impl Into<String>) -> Self {
        Outcome {
            ok: true,
            text: text.into(),
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Outcome {
            ok: false,
            text: text.into(),
        }
    }
}

/// Resolve a model-supplied path to an absolute path confined to `root`
/// (the repository being worked on).
///
/// - Relative paths are joined under the root; `.` / `..` are collapsed without
///   allowing traversal above it.
/// - Absolute paths are accepted **only if** they resolve (after following
///   symlinks) under the canonicalized root.
/// - Symlinks are followed for the deepest existing ancestor; the leaf need not
///   exist, so the result is usable for files about to be created.
///
/// # Errors
/// - `PermissionDenied` if the path escapes the root, directly or via symlinks.
/// - Propagates I/O errors from canonicalizing the root or existing ancestors.
pub fn resolve_path_within(root: &Path, path: &str) -> io::Result<PathBuf> {
    let root = root.canonicalize()?;
    let path = path.trim();
    let input = Path::new(path);

    if path.is_empty() || input == Path::new(".") {
        return Ok(root);
    }

    if input.is_absolute() {
        let abs = soft_canonicalize(input)?;
        if !abs.starts_with(&root) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "absolute paths must resolve under the repository",
            ));
        }
        return Ok(abs);
    }

    let mut rel = PathBuf::new();
    for c in input.components() {
        match c {
            Component::CurDir => {}
            Component::Normal(part) => rel.push(part),
            Component::ParentDir => {
                if !rel.pop() {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        "path attempts to navigate above the repository root",
                    ));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "absolute/rooted components are not allowed",
                ));
            }
        }
    }

    let real = soft_canonicalize(root.join(&rel))?;
    if !real.starts_with(&root) {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "path resolves outside the repository after following symlinks",
        ));
    }
    Ok(real)
}

/// Display `path` relative to `root`, falling back to the full path.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    match path.strip_prefix(&root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Canonicalize the deepest existing ancestor of `p`, then append the missing tail.
pub fn soft_canonicalize<P: AsRef<Path>>(p: P) -> io::Result<PathBuf> {
    let mut probe = p.as_ref();

    let mut tail = Vec::new();
    while fs::symlink_metadata(probe).is_err() {
        match probe.parent() {
            Some(parent) => {
                if let Some(name) = probe.file_name() {
                    tail.push(name.to_os_string());
                }
                probe = parent;
            }
            None => break,
        }
    }

    let mut base = if fs::symlink_metadata(probe).is_ok() {
        probe.canonicalize()?
    } else {
        PathBuf::new()
    };
    for seg in tail.into_iter().rev() {
        base.push(seg);
    }
    Ok(base)
}
