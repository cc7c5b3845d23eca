use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::sync::Arc;

use super::{AnyDisplay, one_line};
use crate::directives::Directive;
use crate::tools::Outcome;

/// Colored progress on stderr.
struct RichDisplay;

#[async_trait::async_trait]
impl AnyDisplay for RichDisplay {
    async fn directive_detected(&self, index: usize, directive: &Directive) {
        let _ = crossterm::execute!(
            std::io::stderr(),
            SetForegroundColor(Color::DarkCyan),
            Print(format!("[{index}] ")),
            SetAttribute(Attribute::Bold),
            Print(directive.label()),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Color::DarkCyan),
            Print(": "),
            Print(one_line(&directive.argument())),
            ResetColor,
            Print("\n"),
        );
    }

    async fn directive_finished(&self, outcome: &Outcome) {
        let (color, line) = if outcome.ok {
            (Color::DarkGreen, "    completed".to_string())
        } else {
            (
                Color::DarkRed,
                format!("    failed: {}", one_line(&outcome.text)),
            )
        };
        let _ = crossterm::execute!(
            std::io::stderr(),
            SetForegroundColor(color),
            Print(line),
            ResetColor,
            Print("\n"),
        );
    }

    async fn summary(&self, total: usize) {
        let line = if total == 0 {
            "No tools detected in model response".to_string()
        } else {
            format!("Total tools executed: {total}")
        };
        let _ = crossterm::execute!(
            std::io::stderr(),
            SetForegroundColor(Color::DarkGrey),
            Print(line),
            ResetColor,
            Print("\n"),
        );
    }

    fn show_delta(&self, delta: &str) {
        // `stdout` should be free from control sequences so that it could be piped.
        let _ = crossterm::execute!(std::io::stdout(), Print(delta));
    }
}

pub fn make_display() -> Arc<dyn AnyDisplay> {
    Arc::new(RichDisplay)
}
