use super::DiffError;
use super::model::{DiffChange, DiffHunk, DiffLine, LineKind};
use super::text::{normalize_eol, parse_range};

const OLD_FILE: &str = "--- a/";
const NEW_FILE: &str = "+++ b/";
const HUNK_HEADER: &str = "@@";

/// Parse unified diff text into per-file changes, in the order encountered.
///
/// A diff indented as a whole is read as if it were not: the indentation of
/// each `--- a/` header is stripped from the lines of that change.
///
/// Blank lines are skipped everywhere, so a hunk cannot carry an empty context
/// line. An empty added line is still expressible as a bare `+`.
pub fn parse_diff(raw: &str) -> Result<Vec<DiffChange>, DiffError> {
    let src = normalize_eol(raw);

    let mut changes: Vec<DiffChange> = Vec::new();
    let mut change: Option<DiffChange> = None;
    let mut hunk: Option<DiffHunk> = None;
    // Leading indentation of the open change's `--- a/` header.
    let mut indent = String::new();

    for raw_line in src.lines() {
        let line = raw_line.trim_end();
        if line.trim_start().is_empty() {
            continue;
        }
        let head = line.trim_start();

        if let Some(path) = head.strip_prefix(OLD_FILE) {
            close_change(&mut changes, &mut change, &mut hunk)?;
            change = Some(DiffChange::new(path.trim()));
            indent = line[..line.len() - head.len()].to_string();
            continue;
        }

        if let Some(path) = head.strip_prefix(NEW_FILE) {
            let path = path.trim();
            if let Some(open) = &change
                && open.file_path != path
            {
                return Err(DiffError::PathMismatch {
                    old: open.file_path.clone(),
                    new: path.to_string(),
                });
            }
            continue;
        }

        if head.starts_with(HUNK_HEADER) {
            close_hunk(&mut change, &mut hunk);
            hunk = Some(parse_hunk_header(head));
            continue;
        }

        if let Some(open) = hunk.as_mut() {
            let body = line.strip_prefix(indent.as_str()).unwrap_or(line);
            open.lines.push(classify_line(body));
        }
    }

    close_change(&mut changes, &mut change, &mut hunk)?;
    Ok(changes)
}

/// `@@ -old_start[,old_count] +new_start[,new_count] @@ optional section`
fn parse_hunk_header(line: &str) -> DiffHunk {
    let mut tokens = line.trim_start_matches('@').split_whitespace();
    let old = tokens.next().unwrap_or("").trim_start_matches('-');
    let new = tokens.next().unwrap_or("").trim_start_matches('+');
    let (old_start, old_count) = parse_range(old);
    let (new_start, new_count) = parse_range(new);
    DiffHunk {
        old_start,
        old_count,
        new_start,
        new_count,
        lines: Vec::new(),
    }
}

fn classify_line(line: &str) -> DiffLine {
    if let Some(rest) = line.strip_prefix('+') {
        DiffLine::new(LineKind::Added, rest)
    } else if let Some(rest) = line.strip_prefix('-') {
        DiffLine::new(LineKind::Removed, rest)
    } else if let Some(rest) = line.strip_prefix(' ') {
        DiffLine::new(LineKind::Context, rest)
    } else {
        DiffLine::new(LineKind::Context, line)
    }
}

fn close_hunk(change: &mut Option<DiffChange>, hunk: &mut Option<DiffHunk>) {
    // A hunk before any file header has no target and is dropped.
    if let Some(h) = hunk.take()
        && let Some(c) = change.as_mut()
    {
        c.hunks.push(h);
    }
}

fn close_change(
    changes: &mut Vec<DiffChange>,
    change: &mut Option<DiffChange>,
    hunk: &mut Option<DiffHunk>,
) -> Result<(), DiffError> {
    close_hunk(change, hunk);
    if let Some(c) = change.take() {
        check_hunk_order(&c)?;
        changes.push(c);
    }
    Ok(())
}

// Hunks are spliced last-first, which is only sound when they ascend and do not overlap.
fn check_hunk_order(change: &DiffChange) -> Result<(), DiffError> {
    for (idx, pair) in change.hunks.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.old_start < prev.old_start.saturating_add(prev.old_count) {
            return Err(DiffError::HunkOrder {
                path: change.file_path.clone(),
                hunk: idx + 1,
            });
        }
    }
    Ok(())
}
