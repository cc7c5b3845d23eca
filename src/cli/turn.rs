use eyre::{Result, WrapErr};
use tracing::instrument::WithSubscriber;

use crate::generation::Sampling;
use crate::prompting::with_tool_guidance;
use crate::streaming;
use crate::tools::{Report, Toolbox, execute};

/// One `ask` turn: stream the model's reply to the display through the
/// bounded queue, then execute the directives in the complete reply.
///
/// The queue only feeds the display; a chunk dropped there is still part of
/// the reply that gets executed.
pub async fn ask(prompt: &str, toolbox: &Toolbox, queue_capacity: usize) -> Result<Report> {
    let display = toolbox.display.clone();
    let (sink, mut assembly) =
        streaming::assemble(queue_capacity, move |delta| display.show_delta(delta));

    let request = with_tool_guidance(prompt);
    let generated = toolbox
        .generator
        .generate(&request, Sampling::CONVERSATIONAL, Some(&sink))
        .with_subscriber(toolbox.log.clone())
        .await;
    drop(sink);

    let reply = match generated {
        Ok(reply) => reply,
        Err(e) => {
            assembly.cancel();
            let _ = assembly.finish().await;
            return Err(e).wrap_err("model request failed");
        }
    };

    let shown = assembly.finish().await?;
    if !shown.text.is_empty() && !shown.text.ends_with('\n') {
        toolbox.display.show_delta("\n");
    }
    if shown.dropped > 0 {
        tracing::dispatcher::with_default(&toolbox.log, || {
            tracing::warn!(dropped = shown.dropped, "turn: display lagged behind the model");
        });
    }

    Ok(execute(&reply, toolbox).await)
}
