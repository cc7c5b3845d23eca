use std::path::Path;
use std::process::{ExitStatus, Stdio};

use super::common::Outcome;

/// `RUN_COMMAND` and `TEST_COMMAND` execute the same way and differ in wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Run,
    Test,
}

impl Flavor {
    fn success(self) -> &'static str {
        match self {
            Flavor::Run => "Command executed successfully",
            Flavor::Test => "Command works successfully",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            Flavor::Run => "Error executing command",
            Flavor::Test => "Command failed",
        }
    }
}

/// Run `command` through `sh -c` inside `root`; stdout followed by stderr.
async fn run_shell(command: &str, root: &Path) -> std::io::Result<(ExitStatus, String)> {
    let child = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;
    let out = child.wait_with_output().await?;

    let mut combined = String::from_utf8_lossy(&out.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&out.stderr));
    Ok((out.status, combined))
}

pub async fn call(command: &str, root: &Path, flavor: Flavor) -> Outcome {
    tracing::info!(%command, ?flavor, "shell: running");
    match run_shell(command, root).await {
        Ok((status, output)) if status.success() => {
            Outcome::ok(format!("{}:\n{output}", flavor.success()))
        }
        Ok((status, output)) => {
            tracing::warn!(%command, %status, "shell: command failed");
            Outcome::failed(format!("{}: {status}\nOutput: {output}", flavor.failure()))
        }
        Err(e) => {
            tracing::warn!(%command, "shell: could not start: {e}");
            Outcome::failed(format!("{}: {e}\nOutput: ", flavor.failure()))
        }
    }
}
