//! Debug logging is an explicit [`Dispatch`] handed to whoever needs it.
//! Disabled logging is `Dispatch::none()`, never a process-wide switch.
use eyre::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Level filter override, e.g. `LATHE_LOG_LEVEL=info`.
const LEVEL_VAR: &str = "LATHE_LOG_LEVEL";

/// Route tracing events into `log_file`, appending. `None` gives a no-op dispatch.
pub fn make_dispatch(log_file: Option<&Path>) -> Result<Dispatch> {
    let Some(path) = log_file else {
        return Ok(Dispatch::none());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LEVEL_VAR).unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .finish();
    Ok(Dispatch::new(subscriber))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_logging_is_a_no_op() {
        let dispatch = make_dispatch(None).unwrap();
        assert!(dispatch.is::<tracing::subscriber::NoSubscriber>());
    }

    #[test]
    fn events_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let dispatch = make_dispatch(Some(&path)).unwrap();

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(path = "a.txt", "diff: applied changes");
        });

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("diff: applied changes"));
        assert!(written.contains("a.txt"));
    }
}
