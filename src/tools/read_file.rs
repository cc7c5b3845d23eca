use std::io::Read;
use std::path::Path;

use super::common::{Outcome, resolve_path_within};

pub async fn call(path: &str, root: &Path, max_bytes: usize) -> Outcome {
    let res = (|| -> std::io::Result<(String, bool)> {
        let target = resolve_path_within(root, path)?;
        let file = std::fs::File::open(target)?;
        let mut buf: Vec<u8> = Vec::with_capacity(std::cmp::min(max_bytes, 1024 * 1024));
        // One byte past the cap tells us whether anything was cut off.
        let mut limited = file.take(max_bytes as u64 + 1);
        limited.read_to_end(&mut buf)?;
        let truncated = buf.len() > max_bytes;
        buf.truncate(max_bytes);
        Ok((String::from_utf8_lossy(&buf).into_owned(), truncated))
    })();

    match res {
        Ok((text, false)) => Outcome::ok(format!("File contents:\n{text}")),
        Ok((text, true)) => Outcome::ok(format!(
            "File contents:\n{text}\n[truncated after {max_bytes} bytes]"
        )),
        Err(e) => Outcome::failed(format!("Error reading file: {e}")),
    }
}
