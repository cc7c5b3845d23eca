use eyre::{Result, WrapErr, eyre};
use std::io::Read;
use std::path::Path;

fn stdin_is_tty() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// If stdin is not a TTY, read it fully as a single UTF-8 string.
/// Returns `None` when stdin is a TTY or when the input is empty/whitespace.
pub fn read_whole_stdin() -> Result<Option<String>> {
    if stdin_is_tty() {
        return Ok(None);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| eyre!(e))?;
    if buf.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(buf))
    }
}

/// The model response to execute: the named file, or else all of stdin.
pub fn read_response(file: Option<&Path>) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read response from {}", path.display()));
    }
    match read_whole_stdin()? {
        Some(text) => Ok(text),
        None => Err(eyre!(
            "no model response given; pass a file or pipe one in (see `lathe --help`)"
        )),
    }
}
