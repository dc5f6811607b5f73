// Shared prompt constants and prompt-building utilities.
// Each component that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond ONLY with a single JSON object. \
    Do NOT include any explanatory text outside the JSON structure. \
    Do NOT use markdown code fences (like ```json). \
    Do NOT include notes or apologies.";
