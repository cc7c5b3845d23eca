/// Handle one-shot CLI commands like `--help` or `--version`.
/// Returns true if a special action was handled and the program should exit.
pub fn handle_specials_if_needed(first: Option<&str>) -> bool {
    let arg = first.unwrap_or_default();

    if matches!(arg, "help" | "--help" | "-H" | "-h" | "-?") {
        println!(
            "{}",
            concat!(
                "lathe: run the tool directives found in a model response\n\n",
                "  $ lathe reply.txt                 execute directives from a file\n",
                "  $ ollama run qwen3-coder | lathe  execute directives from stdin\n",
                "  $ lathe --json reply.txt          print the report as JSON\n",
                "  $ lathe ask add a --verbose flag  ask the model, then execute\n\n",
                "options: --repo DIR, --json, --quiet\n",
                "environment: LATHE_REPO, LATHE_LOG, LATHE_OLLAMA_URL, LATHE_MODEL,\n",
                "             LATHE_MAX_READ_BYTES, LATHE_QUEUE\n"
            )
        );
        return true;
    }

    if matches!(arg, "version" | "--version" | "-V" | "-v") {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return true;
    }

    false
}
