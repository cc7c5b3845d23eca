use super::{DIFF_END, Directive, FILE_END, LineMatch, parse_line};

/// Yields directives from a model response in the order they appear.
///
/// Bodies are consumed verbatim, blank lines included, up to a line that is
/// exactly the sentinel once trimmed. The sentinel itself is dropped and never
/// scanned; a missing sentinel lets the body run to the end of the input.
pub struct Scanner<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(response: &'a str) -> Self {
        Scanner {
            lines: response.lines().collect(),
            pos: 0,
        }
    }

    fn collect_body(&mut self, sentinel: &str) -> String {
        let start = self.pos;
        while self.pos < self.lines.len() && self.lines[self.pos].trim() != sentinel {
            self.pos += 1;
        }
        let body = self.lines[start..self.pos].join("\n");
        if self.pos < self.lines.len() {
            self.pos += 1;
        }
        body
    }
}

impl Iterator for Scanner<'_> {
    type Item = Directive;

    fn next(&mut self) -> Option<Directive> {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            self.pos += 1;

            match parse_line(line) {
                None => continue,
                Some(LineMatch::Complete(directive)) => return Some(directive),
                Some(LineMatch::FileBody { path }) => {
                    let payload = self.collect_body(FILE_END);
                    return Some(Directive::CreateFile { path, payload });
                }
                Some(LineMatch::DiffBody) => {
                    let diff = self.collect_body(DIFF_END);
                    return Some(Directive::ApplyDiff { diff });
                }
            }
        }
        None
    }
}

pub fn scan(response: &str) -> Vec<Directive> {
    Scanner::new(response).collect()
}
