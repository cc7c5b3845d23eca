use std::sync::Arc;

use crate::directives::Directive;
use crate::tools::Outcome;

mod plain;
mod rich;

/// Object-safe progress interface used while directives run.
#[async_trait::async_trait]
pub trait AnyDisplay: Send + Sync {
    /// Announce the `index`-th directive (1-based) before its handler runs.
    async fn directive_detected(&self, index: usize, directive: &Directive);

    /// Report how the directive announced last went.
    async fn directive_finished(&self, outcome: &Outcome);

    /// Close a batch with the number of directives executed.
    async fn summary(&self, total: usize);

    /// Append a streamed piece of the model's reply.
    fn show_delta(&self, delta: &str);
}

/// Dynamically chosen display backend.
pub type Display = Arc<dyn AnyDisplay>;

/// Shows nothing. Used with `--quiet` and in tests.
struct Silent;

#[async_trait::async_trait]
impl AnyDisplay for Silent {
    async fn directive_detected(&self, _index: usize, _directive: &Directive) {}
    async fn directive_finished(&self, _outcome: &Outcome) {}
    async fn summary(&self, _total: usize) {}
    fn show_delta(&self, _delta: &str) {}
}

pub fn silent() -> Display {
    Arc::new(Silent)
}

/// Prefer colored progress on a TTY stderr; fall back to plain lines.
pub fn make_display(quiet: bool) -> Display {
    if quiet {
        return silent();
    }
    if atty::is(atty::Stream::Stderr) {
        return rich::make_display();
    }
    plain::make_display()
}

/// Keep progress lines to one line even for multi-line arguments.
fn one_line(s: &str) -> String {
    let mut it = s.lines();
    let first = it.next().unwrap_or("");
    if it.next().is_some() {
        format!("{first} …")
    } else {
        first.to_string()
    }
}
