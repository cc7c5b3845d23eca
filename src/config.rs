//! Runtime settings, read from `LATHE_*` environment variables.
use std::path::PathBuf;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "qwen3-coder";
pub const DEFAULT_MAX_READ_BYTES: usize = 512 * 1024;
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root every directive path is confined to.
    pub repo: PathBuf,
    /// Debug log destination; `None` disables logging entirely.
    pub log_file: Option<PathBuf>,
    pub ollama_url: String,
    pub model: String,
    /// Byte cap for `READ_FILE`.
    pub max_read_bytes: usize,
    /// Capacity of the queue between the model stream and the reply assembler.
    pub queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            repo: PathBuf::from("."),
            log_file: None,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Settings::default();

        Settings {
            repo: get("LATHE_REPO").map(PathBuf::from).unwrap_or(defaults.repo),
            log_file: get("LATHE_LOG").map(PathBuf::from),
            ollama_url: get("LATHE_OLLAMA_URL").unwrap_or(defaults.ollama_url),
            model: get("LATHE_MODEL").unwrap_or(defaults.model),
            max_read_bytes: number(get("LATHE_MAX_READ_BYTES"), "LATHE_MAX_READ_BYTES")
                .unwrap_or(defaults.max_read_bytes),
            queue_capacity: number(get("LATHE_QUEUE"), "LATHE_QUEUE")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.queue_capacity),
        }
    }
}

fn number(value: Option<String>, key: &str) -> Option<usize> {
    let value = value?;
    match value.parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("config: ignoring {key}={value:?}, not a number");
            None
        }
    }
}
