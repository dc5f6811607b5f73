//! Scoring engine — one rubric-constrained LLM call, then a strict
//! validate/repair/normalize pass over the reply.
//!
//! The repair policy is asymmetric: the `scores` array feeds numeric
//! aggregation and must be exact (wrong cardinality or entry shape is fatal),
//! while `feedback` is display-only prose and self-heals with placeholders.
//! Marks are always re-derived from levels: the level is the authoritative
//! judgment, the mark only an encoding of it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{strip_json_fences, LlmClient, LlmError, SystemBlock};
use crate::scorecard::prompts::{build_scoring_instruction, SCORING_TEMPERATURE};
use crate::scorecard::rubric::{self, mark_on_scale, Level, MAX_TOTAL_SCORE};

/// Placeholder used when the LLM omits or truncates feedback.
pub const FEEDBACK_PLACEHOLDER: &str = "Feedback generation pending";
const MIN_FEEDBACK_ITEMS: usize = 2;
const EXPECTED_SCORE_COUNT: usize = 7;
const PREVIEW_CHARS: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// Error taxonomy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ScoreError {
    /// Empty or whitespace-only transcript; checked before any external call.
    #[error("Transcript text is empty or invalid")]
    InvalidInput,

    /// The LLM reply is not parseable JSON. Carries the raw text for
    /// diagnostics. Not retried here; retry policy belongs to the transport.
    #[error("LLM reply is not valid JSON: {source}")]
    MalformedResponse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// Parseable JSON that violates the required shape of the scores array.
    #[error("LLM reply violates the score schema: {0}")]
    SchemaViolation(String),

    /// The underlying LLM call failed. Propagated unchanged so callers can
    /// tell infrastructure failure from data-contract failure.
    #[error(transparent)]
    Transport(#[from] LlmError),
}

// ────────────────────────────────────────────────────────────────────────────
// Result data model
// ────────────────────────────────────────────────────────────────────────────

/// One normalized per-criterion judgment. `mark` always equals the mark the
/// criterion's scale assigns to `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub criterion: String,
    pub level: Level,
    pub mark: u32,
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Feedback {
    fn placeholder() -> Self {
        Self {
            positive: vec![FEEDBACK_PLACEHOLDER.to_string(); MIN_FEEDBACK_ITEMS],
            negative: vec![FEEDBACK_PLACEHOLDER.to_string(); MIN_FEEDBACK_ITEMS],
        }
    }
}

/// Derived totals. Never mutated independently of the entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateScore {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub grade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMetrics {
    pub char_count: usize,
    pub word_count: usize,
    pub preview: String,
}

/// Full scoring outcome: the 7 normalized entries, healed feedback,
/// aggregate totals, and basic transcript metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scorecard {
    pub scores: Vec<ScoreEntry>,
    pub feedback: Feedback,
    pub aggregate: AggregateScore,
    pub metrics: TranscriptMetrics,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring operation
// ────────────────────────────────────────────────────────────────────────────

/// Scores an interview transcript against the rubric.
///
/// Fatal errors (`InvalidInput`, `MalformedResponse`, `SchemaViolation`,
/// `Transport`) produce no partial result. No retry is performed at this
/// layer; a caller wanting resilience wraps `score()` itself.
pub async fn score(llm: &LlmClient, transcript: &str) -> Result<Scorecard, ScoreError> {
    if transcript.trim().is_empty() {
        return Err(ScoreError::InvalidInput);
    }

    info!(
        "Scoring transcript ({} chars)",
        transcript.chars().count()
    );

    let instruction = build_scoring_instruction();
    let system = [SystemBlock::text(&instruction)];
    let user_message = format!("Interview transcript:\n\n{transcript}");

    let response = llm.call(&system, &user_message, SCORING_TEMPERATURE).await?;
    let raw = response.text().ok_or(LlmError::EmptyContent)?;

    let value: Value =
        serde_json::from_str(strip_json_fences(raw)).map_err(|source| {
            ScoreError::MalformedResponse {
                raw: raw.to_string(),
                source,
            }
        })?;

    let scorecard = normalize_reply(value, transcript)?;
    info!("Transcript scored: {}", scorecard.aggregate.grade);
    Ok(scorecard)
}

/// Validates, repairs, and normalizes a parsed LLM reply into a `Scorecard`.
///
/// Pure: separated from the LLM call so the whole state machine is testable
/// against synthetic replies.
pub fn normalize_reply(value: Value, transcript: &str) -> Result<Scorecard, ScoreError> {
    let mut root = match value {
        Value::Object(map) => map,
        other => {
            return Err(ScoreError::SchemaViolation(format!(
                "expected a JSON object at the top level, found {}",
                json_type(&other)
            )))
        }
    };

    let raw_scores = match root.remove("scores") {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(ScoreError::SchemaViolation(format!(
                "'scores' should be an array, found {}",
                json_type(&other)
            )))
        }
        None => {
            let keys: Vec<&str> = root.keys().map(String::as_str).collect();
            return Err(ScoreError::SchemaViolation(format!(
                "missing 'scores' key; found keys [{}]",
                keys.join(", ")
            )));
        }
    };

    if raw_scores.len() != EXPECTED_SCORE_COUNT {
        return Err(ScoreError::SchemaViolation(format!(
            "expected {EXPECTED_SCORE_COUNT} score entries, found {}",
            raw_scores.len()
        )));
    }

    if raw_scores.iter().any(Value::is_number) {
        return Err(ScoreError::SchemaViolation(
            "'scores' entries should be objects with 'criterion', 'level', 'mark', and \
             'justification' fields, found a list of bare numbers"
                .to_string(),
        ));
    }

    // Feedback is advisory and degrades gracefully; the scores array above is
    // load-bearing and never does.
    let feedback = heal_feedback(root.remove("feedback"));

    let mut scores = Vec::with_capacity(EXPECTED_SCORE_COUNT);
    for (index, raw_entry) in raw_scores.into_iter().enumerate() {
        scores.push(normalize_entry(index, raw_entry)?);
    }

    let total_score: u32 = scores.iter().map(|entry| entry.mark).sum();
    let aggregate = AggregateScore {
        total_score,
        max_score: MAX_TOTAL_SCORE,
        percentage: f64::from(total_score) / f64::from(MAX_TOTAL_SCORE) * 100.0,
        grade: format!("{total_score}/{MAX_TOTAL_SCORE}"),
    };

    Ok(Scorecard {
        scores,
        feedback,
        aggregate,
        metrics: transcript_metrics(transcript),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Per-entry validation and mark reconciliation
// ────────────────────────────────────────────────────────────────────────────

fn normalize_entry(index: usize, raw: Value) -> Result<ScoreEntry, ScoreError> {
    let mut fields = match raw {
        Value::Object(map) => map,
        other => {
            return Err(ScoreError::SchemaViolation(format!(
                "score entry {index} should be an object, found {}",
                json_type(&other)
            )))
        }
    };

    let criterion = take_string(&mut fields, index, "criterion")?;

    let level: Level = match fields.remove("level") {
        Some(value) => serde_json::from_value(value).map_err(|_| {
            ScoreError::SchemaViolation(format!(
                "score entry {index} field 'level' must be one of Poor, Basic, Advanced"
            ))
        })?,
        None => return Err(missing_field(index, "level")),
    };

    let supplied_mark = match fields.remove("mark") {
        Some(value) => value.as_i64().ok_or_else(|| {
            ScoreError::SchemaViolation(format!(
                "score entry {index} field 'mark' must be an integer"
            ))
        })?,
        None => return Err(missing_field(index, "mark")),
    };

    let justification = take_string(&mut fields, index, "justification")?;

    // Level wins over mark: re-derive the mark from the criterion's scale.
    // An unrecognized criterion name reconciles on the role-based scale
    // instead of failing, to tolerate minor LLM misspellings.
    let max_score = rubric::max_score_for(&criterion).unwrap_or_else(|unknown| {
        warn!("{unknown}; reconciling on the role-based scale");
        4
    });
    let mark = mark_on_scale(level, max_score);
    if supplied_mark != i64::from(mark) {
        warn!(
            "Entry {index} ({criterion}): mark {supplied_mark} disagrees with level {}; corrected to {mark}",
            level.as_str()
        );
    }

    Ok(ScoreEntry {
        criterion,
        level,
        mark,
        justification,
    })
}

fn take_string(
    fields: &mut serde_json::Map<String, Value>,
    index: usize,
    field: &str,
) -> Result<String, ScoreError> {
    match fields.remove(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ScoreError::SchemaViolation(format!(
            "score entry {index} field '{field}' must be a string, found {}",
            json_type(&other)
        ))),
        None => Err(missing_field(index, field)),
    }
}

fn missing_field(index: usize, field: &str) -> ScoreError {
    ScoreError::SchemaViolation(format!("score entry {index} missing required field: {field}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback self-healing
// ────────────────────────────────────────────────────────────────────────────

fn heal_feedback(value: Option<Value>) -> Feedback {
    let mut map = match value {
        Some(Value::Object(map)) => map,
        Some(other) => {
            warn!(
                "'feedback' should be an object, found {}; substituting placeholders",
                json_type(&other)
            );
            return Feedback::placeholder();
        }
        None => {
            warn!("'feedback' missing from reply; substituting placeholders");
            return Feedback::placeholder();
        }
    };

    Feedback {
        positive: heal_feedback_list(map.remove("positive"), "positive"),
        negative: heal_feedback_list(map.remove("negative"), "negative"),
    }
}

fn heal_feedback_list(value: Option<Value>, which: &str) -> Vec<String> {
    let mut items: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(other) => {
            warn!(
                "'feedback.{which}' should be an array, found {}; treating as empty",
                json_type(&other)
            );
            Vec::new()
        }
        None => Vec::new(),
    };

    while items.len() < MIN_FEEDBACK_ITEMS {
        items.push(FEEDBACK_PLACEHOLDER.to_string());
    }
    items
}

// ────────────────────────────────────────────────────────────────────────────
// Transcript metrics
// ────────────────────────────────────────────────────────────────────────────

fn transcript_metrics(transcript: &str) -> TranscriptMetrics {
    let char_count = transcript.chars().count();
    let preview = if char_count > PREVIEW_CHARS {
        let mut head: String = transcript.chars().take(PREVIEW_CHARS).collect();
        head.push_str("...");
        head
    } else {
        transcript.to_string()
    };

    TranscriptMetrics {
        char_count,
        word_count: transcript.split_whitespace().count(),
        preview,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
