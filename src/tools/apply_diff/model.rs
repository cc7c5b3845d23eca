/// All edits targeting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffChange {
    pub file_path: String,
    pub hunks: Vec<DiffHunk>,
}

/// One contiguous region of change, positioned by 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffHunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Context,
    Removed,
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    pub content: String,
}

impl DiffChange {
    pub fn new(file_path: impl Into<String>) -> Self {
        DiffChange {
            file_path: file_path.into(),
            hunks: Vec::new(),
        }
    }
}

impl DiffHunk {
    /// Lines that survive into the post-image, in order.
    pub fn post_image(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|l| matches!(l.kind, LineKind::Added | LineKind::Context))
            .map(|l| l.content.as_str())
    }
}

impl DiffLine {
    pub fn new(kind: LineKind, content: impl Into<String>) -> Self {
        DiffLine {
            kind,
            content: content.into(),
        }
    }
}
