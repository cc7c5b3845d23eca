use eyre::{Result, bail};
use std::sync::Arc;

use crate::cli::args::{self, Mode};
use crate::cli::{io, specials, turn};
use crate::config::Settings;
use crate::display;
use crate::generation::Ollama;
use crate::logging;
use crate::tools::{self, Report, Toolbox};

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.transcript());
    }
    Ok(())
}

/// CLI entrypoint: execute a response from a file or stdin, or ask the model first.
pub async fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if specials::handle_specials_if_needed(argv.first().map(String::as_str)) {
        return Ok(());
    }
    let invocation = args::parse(argv)?;

    let mut settings = Settings::from_env();
    if let Some(repo) = invocation.repo.clone() {
        settings.repo = repo;
    }
    if !settings.repo.is_dir() {
        bail!("repository {} is not a directory", settings.repo.display());
    }

    let log = logging::make_dispatch(settings.log_file.as_deref())?;
    let display = display::make_display(invocation.quiet);
    let generator = Arc::new(Ollama::new(&settings.ollama_url, &settings.model)?);
    let toolbox = Toolbox::new(&settings.repo)
        .with_generator(generator)
        .with_display(display)
        .with_log(log)
        .with_max_read_bytes(settings.max_read_bytes);

    let report = match invocation.mode {
        Mode::Execute { file } => {
            let response = io::read_response(file.as_deref())?;
            tools::execute(&response, &toolbox).await
        }
        Mode::Ask { prompt } => turn::ask(&prompt, &toolbox, settings.queue_capacity).await?,
    };

    print_report(&report, invocation.json)
}
