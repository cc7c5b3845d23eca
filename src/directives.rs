//! The line-oriented directive protocol a model uses to ask for work.
//!
//! One directive per line, `LABEL: argument`. Anything that is not a directive
//! is prose and gets ignored. `CREATE_FILE` (and the block form of
//! `APPLY_DIFF`) carry a body on the following lines up to a sentinel line.
mod scanning;

pub use scanning::{Scanner, scan};

/// Ends a `CREATE_FILE` body.
pub const FILE_END: &str = "END_FILE";
/// Ends the block form of `APPLY_DIFF`.
pub const DIFF_END: &str = "END_DIFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    RunCommand,
    ReadFile,
    ListDir,
    TestCommand,
    SearchFiles,
    GenerateDiff,
    ApplyDiff,
    CreateFile,
}

impl Kind {
    pub const ALL: [Kind; 8] = [
        Kind::RunCommand,
        Kind::ReadFile,
        Kind::ListDir,
        Kind::TestCommand,
        Kind::SearchFiles,
        Kind::GenerateDiff,
        Kind::ApplyDiff,
        Kind::CreateFile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Kind::RunCommand => "RUN_COMMAND",
            Kind::ReadFile => "READ_FILE",
            Kind::ListDir => "LIST_DIR",
            Kind::TestCommand => "TEST_COMMAND",
            Kind::SearchFiles => "SEARCH_FILES",
            Kind::GenerateDiff => "GENERATE_DIFF",
            Kind::ApplyDiff => "APPLY_DIFF",
            Kind::CreateFile => "CREATE_FILE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    RunCommand { command: String },
    ReadFile { path: String },
    ListDir { path: String },
    TestCommand { command: String },
    SearchFiles { pattern: String, directory: String },
    GenerateDiff { description: String },
    ApplyDiff { diff: String },
    CreateFile { path: String, payload: String },
}

impl Directive {
    pub fn kind(&self) -> Kind {
        match self {
            Directive::RunCommand { .. } => Kind::RunCommand,
            Directive::ReadFile { .. } => Kind::ReadFile,
            Directive::ListDir { .. } => Kind::ListDir,
            Directive::TestCommand { .. } => Kind::TestCommand,
            Directive::SearchFiles { .. } => Kind::SearchFiles,
            Directive::GenerateDiff { .. } => Kind::GenerateDiff,
            Directive::ApplyDiff { .. } => Kind::ApplyDiff,
            Directive::CreateFile { .. } => Kind::CreateFile,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// The argument as shown in transcripts. Bodies of created files are not echoed.
    pub fn argument(&self) -> String {
        match self {
            Directive::RunCommand { command } | Directive::TestCommand { command } => {
                command.clone()
            }
            Directive::ReadFile { path }
            | Directive::ListDir { path }
            | Directive::CreateFile { path, .. } => path.clone(),
            Directive::SearchFiles { pattern, directory } => format!("{pattern} in {directory}"),
            Directive::GenerateDiff { description } => description.clone(),
            Directive::ApplyDiff { diff } => diff.clone(),
        }
    }
}

/// What a single line introduces.
#[derive(Debug, PartialEq, Eq)]
pub enum LineMatch {
    Complete(Directive),
    /// `CREATE_FILE: <path>`; the body follows up to [`FILE_END`].
    FileBody { path: String },
    /// `APPLY_DIFF:` with nothing after it; the diff follows up to [`DIFF_END`].
    DiffBody,
}

/// Recognize a directive on one line. Prefixes are case-sensitive and the
/// argument is the trimmed remainder after the colon.
pub fn parse_line(line: &str) -> Option<LineMatch> {
    let line = line.trim();
    let (kind, rest) = Kind::ALL.iter().find_map(|&kind| {
        let rest = line.strip_prefix(kind.label())?.strip_prefix(':')?;
        Some((kind, rest.trim()))
    })?;
    let arg = rest.to_string();

    let found = match kind {
        Kind::RunCommand => LineMatch::Complete(Directive::RunCommand { command: arg }),
        Kind::ReadFile => LineMatch::Complete(Directive::ReadFile { path: arg }),
        Kind::ListDir => LineMatch::Complete(Directive::ListDir { path: arg }),
        Kind::TestCommand => LineMatch::Complete(Directive::TestCommand { command: arg }),
        Kind::SearchFiles => {
            let (pattern, directory) = split_search_args(rest)?;
            LineMatch::Complete(Directive::SearchFiles { pattern, directory })
        }
        Kind::GenerateDiff => LineMatch::Complete(Directive::GenerateDiff { description: arg }),
        Kind::ApplyDiff if rest.is_empty() => LineMatch::DiffBody,
        Kind::ApplyDiff => LineMatch::Complete(Directive::ApplyDiff { diff: arg }),
        Kind::CreateFile => LineMatch::FileBody { path: arg },
    };
    Some(found)
}

/// Split `<pattern> <directory>`. A pattern opening with `"` runs to the closing quote.
fn split_search_args(rest: &str) -> Option<(String, String)> {
    let quoted = rest
        .strip_prefix('"')
        .and_then(|q| q.find('"').map(|close| (&q[..close], &q[close + 1..])));
    let (pattern, directory) = match quoted {
        Some(pair) => pair,
        None => {
            let split = rest.find(char::is_whitespace)?;
            (&rest[..split], &rest[split..])
        }
    };
    let directory = directory.trim();
    if pattern.is_empty() || directory.is_empty() {
        return None;
    }
    Some((pattern.to_string(), directory.to_string()))
}
