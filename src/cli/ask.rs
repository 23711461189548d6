// src/cli/ask.rs — One-shot question mode

use crate::core::dispatcher::{QueryDispatcher, Submission};

use super::render;

/// Ask a single question and print the reply to stdout.
///
/// Refusals and model failures are still printed as replies; only a failed
/// model call makes the process exit non-zero.
pub async fn run_ask(mut dispatcher: QueryDispatcher, question: &str) -> anyhow::Result<()> {
    if !dispatcher.is_configured() {
        render::print_notice("GOOGLE_API_KEY is not set; responses are disabled.");
    }

    let submission = dispatcher.submit(question).await?;
    let message = submission.message();
    println!("{}", render::message_body(message));
    if let Some(ref source) = message.source {
        println!("Source: {}", source);
    }

    if let Submission::Failed(_) = submission {
        anyhow::bail!("model request failed");
    }
    Ok(())
}
