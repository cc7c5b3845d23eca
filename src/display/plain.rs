use std::io::Write;

use super::{AnyDisplay, one_line};
use crate::directives::Directive;
use crate::tools::Outcome;

struct Plain;

#[async_trait::async_trait]
impl AnyDisplay for Plain {
    async fn directive_detected(&self, index: usize, directive: &Directive) {
        eprintln!(
            "[{index}] {} detected: {}",
            directive.label(),
            one_line(&directive.argument())
        );
    }

    async fn directive_finished(&self, outcome: &Outcome) {
        if outcome.ok {
            eprintln!("    completed");
        } else {
            eprintln!("    failed: {}", one_line(&outcome.text));
        }
    }

    async fn summary(&self, total: usize) {
        if total == 0 {
            eprintln!("no tools detected in model response");
        } else {
            eprintln!("total tools executed: {total}");
        }
    }

    fn show_delta(&self, delta: &str) {
        let mut out = std::io::stdout();
        let _ = out.write_all(delta.as_bytes());
        let _ = out.flush();
    }
}

/// Minimal display: linear progress on stderr, model text on stdout.
pub fn make_display() -> std::sync::Arc<dyn AnyDisplay> {
    std::sync::Arc::new(Plain)
}
