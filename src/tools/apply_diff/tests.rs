#![cfg(test)]

use std::fs;

use super::text::{parse_range, unescape_newlines};
use super::*;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn parse_two_hunks_for_one_file() {
    let diff = "--- a/src/lib.rs\n+++ b/src/lib.rs\n@@ -1,1 +1,1 @@\n-a\n+A\n@@ -3,1 +3,1 @@\n-c\n+C\n";
    let changes = parse_diff(diff).unwrap();
    assert_eq!(changes.len(), 1);
    let change = &changes[0];
    assert_eq!(change.file_path, "src/lib.rs");
    assert_eq!(change.hunks.len(), 2);
    assert_eq!(change.hunks[1].old_start, 3);
    assert_eq!(
        change.hunks[0].lines,
        vec![
            DiffLine::new(LineKind::Removed, "a"),
            DiffLine::new(LineKind::Added, "A"),
        ]
    );
}

#[test]
fn reverse_splicing_matches_hand_computed_post_image() {
    let diff = "--- a/f\n+++ b/f\n@@ -1,1 +1,1 @@\n-a\n+A\n@@ -3,1 +3,1 @@\n-c\n+C\n";
    let change = parse_diff(diff).unwrap().remove(0);
    let mut content = lines(&["a", "b", "c", "d"]);
    splice_hunks(&mut content, &change.hunks);
    assert_eq!(content, lines(&["A", "b", "C", "d"]));
}

#[test]
fn growing_hunk_does_not_shift_the_one_below() {
    let diff = "--- a/f\n+++ b/f\n@@ -1,1 +1,3 @@\n-a\n+a1\n+a2\n+a3\n@@ -3,1 +5,1 @@\n-c\n+C\n";
    let change = parse_diff(diff).unwrap().remove(0);
    assert_eq!(apply_change("a\nb\nc\nd", &change), "a1\na2\na3\nb\nC\nd\n");
}

#[test]
fn path_mismatch_is_a_parse_error() {
    let diff = "--- a/one.txt\n+++ b/two.txt\n@@ -1 +1 @@\n-x\n+y\n";
    let err = parse_diff(diff).unwrap_err();
    assert!(err.is_parse());
    assert!(matches!(err, DiffError::PathMismatch { ref old, ref new } if old == "one.txt" && new == "two.txt"));
}

#[test]
fn path_mismatch_in_a_later_file_rejects_everything() {
    let diff = "--- a/ok.txt\n+++ b/ok.txt\n@@ -1 +1 @@\n-x\n+y\n--- a/one.txt\n+++ b/two.txt\n";
    assert!(parse_diff(diff).is_err());
}

#[test]
fn omitted_counts_default_to_one() {
    let diff = "--- a/f\n+++ b/f\n@@ -4 +7 @@\n-x\n+y\n";
    let hunk = &parse_diff(diff).unwrap()[0].hunks[0];
    assert_eq!(
        (hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count),
        (4, 1, 7, 1)
    );
}

#[test]
fn malformed_ranges_parse_as_zero() {
    assert_eq!(parse_range("x,2"), (0, 2));
    assert_eq!(parse_range("3,y"), (3, 0));
    assert_eq!(parse_range(""), (0, 1));

    let diff = "--- a/f\n+++ b/f\n@@ @@\n+only\n";
    let hunk = &parse_diff(diff).unwrap()[0].hunks[0];
    assert_eq!((hunk.old_start, hunk.old_count), (0, 1));
}

#[test]
fn header_without_spaces_after_markers() {
    let diff = "--- a/f\n+++ b/f\n@@-2,3 +2,4@@\n x\n";
    let hunk = &parse_diff(diff).unwrap()[0].hunks[0];
    assert_eq!((hunk.old_start, hunk.old_count), (2, 3));
}

#[test]
fn context_marker_space_is_removed() {
    let diff = "--- a/f\n+++ b/f\n@@ -1,2 +1,2 @@\n     indented\nbare\n";
    let hunk = &parse_diff(diff).unwrap()[0].hunks[0];
    assert_eq!(
        hunk.lines,
        vec![
            DiffLine::new(LineKind::Context, "    indented"),
            DiffLine::new(LineKind::Context, "bare"),
        ]
    );
}

#[test]
fn blank_lines_inside_hunks_are_skipped() {
    // Known limitation: an empty context line cannot be represented.
    let diff = "--- a/f\n+++ b/f\n@@ -1,3 +1,3 @@\n a\n \n-b\n+B\n+\n";
    let hunk = &parse_diff(diff).unwrap()[0].hunks[0];
    assert_eq!(
        hunk.lines,
        vec![
            DiffLine::new(LineKind::Context, "a"),
            DiffLine::new(LineKind::Removed, "b"),
            DiffLine::new(LineKind::Added, "B"),
            DiffLine::new(LineKind::Added, ""),
        ]
    );
}

#[test]
fn files_and_hunks_keep_their_order() {
    let diff = "--- a/z.txt\n+++ b/z.txt\n@@ -1 +1 @@\n-1\n+2\n--- a/a.txt\n+++ b/a.txt\n@@ -1 +1 @@\n-3\n+4\n";
    let paths: Vec<String> = parse_diff(diff)
        .unwrap()
        .into_iter()
        .map(|c| c.file_path)
        .collect();
    assert_eq!(paths, vec!["z.txt", "a.txt"]);
}

#[test]
fn text_outside_hunks_is_ignored() {
    let diff = "Here is the patch:\n@@ -1 +1 @@\n+orphan\n--- a/f\n+++ b/f\nnot in a hunk\n@@ -1 +1 @@\n-x\n+y\n";
    let changes = parse_diff(diff).unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].hunks.len(), 1);
    assert_eq!(changes[0].hunks[0].lines.len(), 2);
}

#[test]
fn out_of_order_hunks_are_rejected() {
    let diff = "--- a/f\n+++ b/f\n@@ -5,1 +5,1 @@\n-e\n+E\n@@ -2,1 +2,1 @@\n-b\n+B\n";
    let err = parse_diff(diff).unwrap_err();
    assert!(matches!(err, DiffError::HunkOrder { ref path, hunk: 1 } if path == "f"));
}

#[test]
fn overlapping_hunks_are_rejected() {
    let diff = "--- a/f\n+++ b/f\n@@ -1,3 +1,3 @@\n-a\n@@ -2,1 +2,1 @@\n-b\n";
    assert!(matches!(
        parse_diff(diff).unwrap_err(),
        DiffError::HunkOrder { .. }
    ));
}

#[test]
fn adjacent_hunks_are_accepted() {
    let diff = "--- a/f\n+++ b/f\n@@ -1,2 +1,2 @@\n-a\n-b\n@@ -3,1 +3,1 @@\n-c\n";
    assert!(parse_diff(diff).is_ok());
}

#[test]
fn oversized_old_count_clamps_at_end_of_file() {
    let diff = "--- a/f\n+++ b/f\n@@ -2,10 +2,1 @@\n-b\n+tail\n";
    let change = parse_diff(diff).unwrap().remove(0);
    assert_eq!(apply_change("a\nb", &change), "a\ntail\n");
}

#[test]
fn start_past_end_of_file_appends() {
    let diff = "--- a/f\n+++ b/f\n@@ -40,0 +40,1 @@\n+late\n";
    let change = parse_diff(diff).unwrap().remove(0);
    assert_eq!(apply_change("a", &change), "a\nlate\n");
}

#[test]
fn huge_old_count_saturates_instead_of_overflowing() {
    let diff = format!("--- a/f\n+++ b/f\n@@ -2,{} +2,1 @@\n-b\n+B\n", usize::MAX);
    let change = parse_diff(&diff).unwrap().remove(0);
    assert_eq!(change.hunks[0].old_count, usize::MAX);
    assert_eq!(apply_change("a\nb\nc\n", &change), "a\nB\n");
}

#[test]
fn huge_old_start_is_an_order_error_not_a_crash() {
    let diff = format!(
        "--- a/f\n+++ b/f\n@@ -{},5 +1 @@\n-x\n@@ -1,1 +1 @@\n-y\n",
        usize::MAX
    );
    let err = parse_diff(&diff).unwrap_err();
    assert!(matches!(err, DiffError::HunkOrder { hunk: 1, .. }));
}

#[test]
fn indented_diff_is_read_as_if_flush_left() {
    let diff = "   --- a/f\n   +++ b/f\n   @@ -1,2 +1,2 @@\n   -old\n   +new\n    keep\n";
    let change = parse_diff(diff).unwrap().remove(0);
    assert_eq!(
        change.hunks[0].lines,
        vec![
            DiffLine::new(LineKind::Removed, "old"),
            DiffLine::new(LineKind::Added, "new"),
            DiffLine::new(LineKind::Context, "keep"),
        ]
    );
    assert_eq!(apply_change("old\nkeep\n", &change), "new\nkeep\n");
}

#[test]
fn indentation_is_tracked_per_file() {
    let diff = "  --- a/one\n  +++ b/one\n  @@ -1 +1 @@\n  -a\n  +A\n--- a/two\n+++ b/two\n@@ -1 +1 @@\n-b\n+B\n";
    let changes = parse_diff(diff).unwrap();
    assert_eq!(apply_change("a\n", &changes[0]), "A\n");
    assert_eq!(apply_change("b\n", &changes[1]), "B\n");
}

#[test]
fn insertion_into_empty_file() {
    let diff = "--- a/new.txt\n+++ b/new.txt\n@@ -1,0 +1,1 @@\n+new line\n";
    let change = parse_diff(diff).unwrap().remove(0);
    assert_eq!(apply_change("", &change), "new line\n");
}

#[test]
fn crlf_diff_text_is_normalized() {
    let diff = "--- a/f\r\n+++ b/f\r\n@@ -1 +1 @@\r\n-x\r\n+y\r\n";
    let change = parse_diff(diff).unwrap().remove(0);
    assert_eq!(change.hunks[0].lines[1], DiffLine::new(LineKind::Added, "y"));
}

#[test]
fn escaped_single_line_diffs_are_unescaped() {
    assert_eq!(unescape_newlines("--- a/f\\n+++ b/f"), "--- a/f\n+++ b/f");
    assert_eq!(unescape_newlines("already\nsplit \\n"), "already\nsplit \\n");
}

#[test]
fn apply_within_root_patches_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "one\ntwo\nthree\n").unwrap();

    let diff = "--- a/notes.txt\n+++ b/notes.txt\n@@ -2,1 +2,1 @@\n-two\n+TWO\n";
    let applied = apply_diff_within(dir.path(), diff).unwrap();

    assert_eq!(applied, vec!["notes.txt"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
        "one\nTWO\nthree\n"
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let diff = "--- a/ghost.txt\n+++ b/ghost.txt\n@@ -1 +1 @@\n-x\n+y\n";
    let err = apply_diff_within(dir.path(), diff).unwrap_err();
    assert!(matches!(err, DiffError::Read { ref path, .. } if path == "ghost.txt"));
    assert!(!err.is_parse());
}

#[test]
fn failure_stops_at_the_failing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("first.txt"), "a\n").unwrap();
    fs::write(dir.path().join("third.txt"), "c\n").unwrap();

    let diff = concat!(
        "--- a/first.txt\n+++ b/first.txt\n@@ -1 +1 @@\n-a\n+A\n",
        "--- a/second.txt\n+++ b/second.txt\n@@ -1 +1 @@\n-b\n+B\n",
        "--- a/third.txt\n+++ b/third.txt\n@@ -1 +1 @@\n-c\n+C\n",
    );
    let err = apply_diff_within(dir.path(), diff).unwrap_err();

    assert!(err.to_string().contains("second.txt"));
    assert_eq!(fs::read_to_string(dir.path().join("first.txt")).unwrap(), "A\n");
    assert_eq!(fs::read_to_string(dir.path().join("third.txt")).unwrap(), "c\n");
}

#[test]
fn paths_escaping_the_root_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    fs::create_dir(&root).unwrap();
    fs::write(dir.path().join("outside.txt"), "x\n").unwrap();

    let diff = "--- a/../outside.txt\n+++ b/../outside.txt\n@@ -1 +1 @@\n-x\n+y\n";
    let err = apply_diff_within(&root, diff).unwrap_err();

    match err {
        DiffError::Read { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied)
        }
        other => panic!("expected read error, got {other}"),
    }
    assert_eq!(fs::read_to_string(dir.path().join("outside.txt")).unwrap(), "x\n");
}

#[tokio::test]
async fn call_reports_success_and_failure_as_text() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "old\n").unwrap();

    let ok = call("--- a/a.txt\\n+++ b/a.txt\\n@@ -1 +1 @@\\n-old\\n+new", dir.path()).await;
    assert!(ok.ok);
    assert_eq!(
        ok.text,
        "Diff applied successfully to the repository\nApplied changes to: a.txt"
    );
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "new\n");

    let failed = call("--- a/b.txt\n+++ b/c.txt\n", dir.path()).await;
    assert!(!failed.ok);
    assert!(failed.text.starts_with("Error applying diff: failed to parse diff"));
}
