//! Handlers behind each directive, and the loop that runs a response's directives.
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Dispatch;
use tracing::instrument::WithSubscriber;

pub mod common;

mod apply_diff;
mod create_file;
mod generate_diff;
mod list_dir;
mod read_file;
mod run_command;
mod search_files;
mod transcript;

pub use apply_diff::{
    DiffChange, DiffError, DiffHunk, DiffLine, LineKind, apply_change, apply_diff_within,
    parse_diff, splice_hunks,
};
pub use common::Outcome;
pub use run_command::Flavor;
pub use transcript::{Entry, Report};

use crate::config::DEFAULT_MAX_READ_BYTES;
use crate::directives::{Directive, Scanner};
use crate::display::{self, Display};
use crate::generation::{Generate, Unavailable};

/// Everything a handler may touch: the repository, the model backend, the
/// progress display and the debug log.
pub struct Toolbox {
    pub root: PathBuf,
    pub max_read_bytes: usize,
    pub generator: Arc<dyn Generate>,
    pub display: Display,
    pub log: Dispatch,
}

impl Toolbox {
    /// Silent, unlogged toolbox without a model backend.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Toolbox {
            root: root.into(),
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
            generator: Arc::new(Unavailable),
            display: display::silent(),
            log: Dispatch::none(),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn Generate>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn with_log(mut self, log: Dispatch) -> Self {
        self.log = log;
        self
    }

    pub fn with_max_read_bytes(mut self, max_read_bytes: usize) -> Self {
        self.max_read_bytes = max_read_bytes;
        self
    }
}

/// Run one directive. Failures come back as text; this never errors.
pub async fn invoke(directive: &Directive, toolbox: &Toolbox) -> Outcome {
    let root = toolbox.root.as_path();
    match directive {
        Directive::RunCommand { command } => run_command::call(command, root, Flavor::Run).await,
        Directive::TestCommand { command } => {
            run_command::call(command, root, Flavor::Test).await
        }
        Directive::ReadFile { path } => read_file::call(path, root, toolbox.max_read_bytes).await,
        Directive::ListDir { path } => list_dir::call(path, root).await,
        Directive::SearchFiles { pattern, directory } => {
            search_files::call(pattern, directory, root).await
        }
        Directive::GenerateDiff { description } => {
            generate_diff::call(description, toolbox.generator.as_ref()).await
        }
        Directive::ApplyDiff { diff } => apply_diff::call(diff, root).await,
        Directive::CreateFile { path, payload } => create_file::call(path, payload, root).await,
    }
}

/// Scan `response` and run each directive to completion before reading on.
pub async fn execute(response: &str, toolbox: &Toolbox) -> Report {
    let work = async {
        let mut report = Report::default();
        for directive in Scanner::new(response) {
            let index = report.len() + 1;
            tracing::info!(index, label = directive.label(), "tools: directive detected");
            toolbox.display.directive_detected(index, &directive).await;

            let outcome = invoke(&directive, toolbox).await;

            toolbox.display.directive_finished(&outcome).await;
            report.push(&directive, outcome);
        }
        toolbox.display.summary(report.len()).await;
        tracing::info!(total = report.len(), "tools: response done");
        report
    };
    work.with_subscriber(toolbox.log.clone()).await
}

/// [`execute`], rendered as the transcript returned to the model.
pub async fn execute_to_transcript(response: &str, toolbox: &Toolbox) -> String {
    execute(response, toolbox).await.transcript()
}
