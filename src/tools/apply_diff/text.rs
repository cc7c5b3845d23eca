pub fn normalize_eol(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Turn a single-line diff carrying literal `\n` escapes into real lines.
/// Text that already spans several lines is returned untouched.
pub fn unescape_newlines(s: &str) -> String {
    if s.contains('\n') || !s.contains("\\n") {
        return s.to_string();
    }
    s.replace("\\r\\n", "\n").replace("\\n", "\n")
}

/// Parse a `start[,count]` range token; an omitted count means one line.
/// Numbers that do not parse become zero.
pub fn parse_range(token: &str) -> (usize, usize) {
    let mut parts = token.splitn(2, ',');
    let start = parts
        .next()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let count = match parts.next() {
        Some(c) => c.trim().parse::<usize>().unwrap_or(0),
        None => 1,
    };
    (start, count)
}

pub fn preview(s: &str) -> String {
    let s = s.replace('\n', "\\n");
    match s.char_indices().nth(160) {
        Some((cut, _)) => format!("{}…", &s[..cut]),
        None => s,
    }
}
