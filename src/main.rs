//! Command-line entrypoint. Runs the directives found in a model response,
//! or asks the model first and then runs what it answered with.
use eyre::Result;

pub mod cli;
pub mod config;
pub mod directives;
pub mod display;
pub mod generation;
pub mod logging;
pub mod prompting;
pub mod streaming;
pub mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
