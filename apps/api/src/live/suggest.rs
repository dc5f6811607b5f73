//! Question suggestion engine — one short, directly usable question per
//! transcript increment.
//!
//! Called on every chunk, so the prompt is built for transport-side caching:
//! the directive and the static interview context (job offer, values,
//! candidate profile) go out as cached system blocks, and only the small
//! rolling transcript window rides in the user message. The call never
//! mutates the session context.

use tracing::debug;

use crate::live::prompts::SUGGESTION_SYSTEM;
use crate::live::session::InterviewContext;
use crate::llm_client::{LlmClient, LlmError, SystemBlock};

/// Deterministic output for a given transcript window.
pub const SUGGESTION_TEMPERATURE: f32 = 0.0;

/// Asks for the single next best interview question given the accumulated
/// context. Transport errors propagate to the caller, which decides whether
/// to drop the increment or surface an error event.
pub async fn suggest_next_question(
    llm: &LlmClient,
    ctx: &InterviewContext,
) -> Result<String, LlmError> {
    let static_context = ctx.static_context();
    let system = [
        SystemBlock::cached(SUGGESTION_SYSTEM),
        SystemBlock::cached(&static_context),
    ];
    let prompt = format!("TRANSCRIPT:\n{}", ctx.transcript_window());

    let response = llm.call(&system, &prompt, SUGGESTION_TEMPERATURE).await?;
    let question = response.text().ok_or(LlmError::EmptyContent)?;

    debug!("Suggested question: {question}");
    Ok(question.trim().to_string())
}
