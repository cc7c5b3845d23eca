use super::model::{DiffChange, DiffHunk};

/// Apply every hunk of `change` to `before`, producing the post-image.
/// The result always ends with a newline.
pub fn apply_change(before: &str, change: &DiffChange) -> String {
    let mut lines: Vec<String> = before.split('\n').map(str::to_string).collect();
    splice_hunks(&mut lines, &change.hunks);
    render_lines(&lines)
}

/// Splice hunks last-first so earlier hunks keep their recorded line numbers.
pub fn splice_hunks(lines: &mut Vec<String>, hunks: &[DiffHunk]) {
    for hunk in hunks.iter().rev() {
        splice_hunk(lines, hunk);
    }
}

/// Replace the hunk's pre-image region with its added and context lines.
/// Out-of-range positions are clamped to the end of `lines`.
pub fn splice_hunk(lines: &mut Vec<String>, hunk: &DiffHunk) {
    let start = hunk.old_start.saturating_sub(1).min(lines.len());
    let end = if hunk.old_count > 0 {
        start.saturating_add(hunk.old_count).min(lines.len())
    } else {
        start
    };
    let replacement: Vec<String> = hunk.post_image().map(str::to_string).collect();
    lines.splice(start..end, replacement);
}

pub fn render_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
