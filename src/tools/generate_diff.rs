use super::common::Outcome;
use crate::generation::{Generate, Sampling};
use crate::prompting::diff_request;

fn looks_like_diff(reply: &str) -> bool {
    reply.contains("--- a/") && reply.contains("+++ b/")
}

/// Ask the model for a diff. The result is shown to the model, never applied here.
pub async fn call(description: &str, generator: &dyn Generate) -> Outcome {
    let prompt = diff_request(description);
    match generator.generate(&prompt, Sampling::PRECISE, None).await {
        Ok(reply) if looks_like_diff(&reply) => Outcome::ok(format!("Generated diff:\n\n{reply}")),
        Ok(reply) => Outcome::ok(format!(
            "LLM response (may not be valid diff format):\n\n{reply}\n\n\
             Note: This may not be a valid unified diff. \
             You can copy the content above and use APPLY_DIFF if it looks correct."
        )),
        Err(e) => {
            tracing::warn!("generate: {e}");
            Outcome::failed(format!("Error generating diff: {e}"))
        }
    }
}
