//! Scorecard — transcript scoring against the fixed interview rubric.
//!
//! `rubric` is the static 7-criterion definition, `engine` runs the LLM call
//! and the validate/repair/normalize pass, `report` renders and exports the
//! normalized result, `handlers` is the HTTP surface.

pub mod engine;
pub mod handlers;
pub mod prompts;
pub mod report;
pub mod rubric;
