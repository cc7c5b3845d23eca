//! Hand-rolled argument parsing; the surface is small enough.
use eyre::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Execute the directives in a response read from `file` or stdin.
    Execute { file: Option<PathBuf> },
    /// Ask the model with `prompt`, then execute its reply.
    Ask { prompt: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub repo: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Parse everything after the binary name.
///
/// In `ask` mode flags are only recognized before the first prompt word, so
/// prompts may mention `--json` and the like freely.
pub fn parse<I>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    let asking = args.peek().is_some_and(|a| a == "ask");
    if asking {
        args.next();
    }

    let mut repo = None;
    let mut json = false;
    let mut quiet = false;
    let mut positional: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        let flags_allowed = !(asking && !positional.is_empty());
        if !flags_allowed || !arg.starts_with("--") || arg == "--" {
            if arg == "--" && flags_allowed {
                positional.extend(args.by_ref());
                break;
            }
            positional.push(arg);
            continue;
        }
        match arg.as_str() {
            "--json" => json = true,
            "--quiet" => quiet = true,
            "--repo" => match args.next() {
                Some(dir) => repo = Some(PathBuf::from(dir)),
                None => bail!("--repo needs a directory"),
            },
            other => match other.strip_prefix("--repo=") {
                Some(dir) if !dir.is_empty() => repo = Some(PathBuf::from(dir)),
                Some(_) => bail!("--repo needs a directory"),
                None => bail!("unknown option {other}; see `lathe --help`"),
            },
        }
    }

    let mode = if asking {
        if json {
            bail!("--json cannot be combined with ask");
        }
        let prompt = positional.join(" ");
        if prompt.trim().is_empty() {
            bail!("ask needs a prompt");
        }
        Mode::Ask { prompt }
    } else {
        if positional.len() > 1 {
            bail!("expected at most one response file, got {}", positional.len());
        }
        Mode::Execute {
            file: positional.pop().map(PathBuf::from),
        }
    };

    Ok(Invocation {
        mode,
        repo,
        json,
        quiet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(line: &str) -> Result<Invocation> {
        parse(line.split_whitespace().map(String::from))
    }

    #[test]
    fn bare_invocation_reads_stdin() {
        let inv = parse_str("").unwrap();
        assert_eq!(inv.mode, Mode::Execute { file: None });
        assert!(!inv.json && !inv.quiet);
        assert_eq!(inv.repo, None);
    }

    #[test]
    fn flags_and_file() {
        let inv = parse_str("--json --repo /work reply.txt --quiet").unwrap();
        assert_eq!(
            inv.mode,
            Mode::Execute {
                file: Some(PathBuf::from("reply.txt"))
            }
        );
        assert!(inv.json && inv.quiet);
        assert_eq!(inv.repo, Some(PathBuf::from("/work")));

        let inv = parse_str("--repo=/other").unwrap();
        assert_eq!(inv.repo, Some(PathBuf::from("/other")));
    }

    #[test]
    fn ask_keeps_flag_like_words_in_the_prompt() {
        let inv = parse_str("ask --quiet add a --json flag").unwrap();
        assert!(inv.quiet);
        assert!(!inv.json);
        assert_eq!(
            inv.mode,
            Mode::Ask {
                prompt: "add a --json flag".into()
            }
        );
    }

    #[test]
    fn mistakes_are_reported() {
        assert!(parse_str("--repo").is_err());
        assert!(parse_str("--frobnicate").is_err());
        assert!(parse_str("a.txt b.txt").is_err());
        assert!(parse_str("ask").is_err());
        assert!(parse_str("ask --json hello").is_err());
    }

    #[test]
    fn double_dash_ends_options() {
        let inv = parse_str("-- --weird-name.txt").unwrap();
        assert_eq!(
            inv.mode,
            Mode::Execute {
                file: Some(PathBuf::from("--weird-name.txt"))
            }
        );
    }
}
