use serde::Serialize;

use super::common::Outcome;
use crate::directives::Directive;

pub const BANNER: &str = "Tool Execution Results:\n=====================\n\n";
pub const NOTHING_DONE: &str = "No tools detected in model response";

/// Everything one response's directives produced, in execution order.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub entries: Vec<Entry>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct Entry {
    pub label: &'static str,
    pub argument: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Report {
    pub fn push(&mut self, directive: &Directive, outcome: Outcome) {
        self.entries.push(Entry {
            label: directive.label(),
            argument: directive.argument(),
            outcome,
        });
        self.total = self.entries.len();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The text handed back to the model.
    pub fn transcript(&self) -> String {
        let mut out = String::from(BANNER);
        for entry in &self.entries {
            out.push_str(&format!("{}: {}\n", entry.label, entry.argument));
            out.push_str(&entry.outcome.text);
            if !entry.outcome.text.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
        }
        if self.is_empty() {
            out.push_str(NOTHING_DONE);
            out.push('\n');
        } else {
            out.push_str(&format!("Total tools executed: {}\n", self.total));
        }
        out
    }
}
