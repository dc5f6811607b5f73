//! Wire protocol for the live session: newline-delimited JSON records with an
//! `EVENT_TYPE` discriminator and a free-form `PAYLOAD`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound record as received from the peer. Parsed in two steps so a
/// malformed record (fatal) is distinguishable from an unknown event kind
/// (acknowledged, non-fatal).
#[derive(Debug, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "EVENT_TYPE")]
    pub event_type: String,
    #[serde(rename = "PAYLOAD", default)]
    pub payload: Value,
}

/// Recognized inbound event kinds. Flagging, term definitions, and todo
/// tracking belong to a separate collaborator; this service acknowledges them
/// without acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    TranscriptChunk,
    CandidateInfos,
    FlagMoment,
    TermDefinition,
    TodoItem,
    Unknown,
}

impl EventKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "TRANSCRIPT_CHUNK" => EventKind::TranscriptChunk,
            "CANDIDATE_INFOS" => EventKind::CandidateInfos,
            "FLAG_MOMENT" => EventKind::FlagMoment,
            "TERM_DEFINITION" => EventKind::TermDefinition,
            "TODO_ITEM" => EventKind::TodoItem,
            _ => EventKind::Unknown,
        }
    }

    /// Recognized but intentionally not handled by this service.
    pub fn is_ignored(&self) -> bool {
        matches!(
            self,
            EventKind::FlagMoment | EventKind::TermDefinition | EventKind::TodoItem
        )
    }
}

/// `CANDIDATE_INFOS` payload. Clients send either the upper-case wire keys or
/// their snake_case equivalents.
#[derive(Debug, Default, Deserialize)]
pub struct CandidateInfos {
    #[serde(rename = "CANDIDATES_LINKEDIN", alias = "linkedin_url", default)]
    pub linkedin_url: Option<String>,
    #[serde(rename = "JOB_DESCRIPTION", alias = "job_offer", default)]
    pub job_description: Option<String>,
    #[serde(rename = "COMPANY_VALUES", alias = "company_values", default)]
    pub company_values: Option<String>,
}

/// Outbound records sent back to the peer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum OutboundEvent {
    #[serde(rename = "NEW_SUGGESTED_QUESTION")]
    NewSuggestedQuestion { data: String },
    #[serde(rename = "status")]
    Status { message: String },
    #[serde(rename = "error")]
    Error { message: String },
}
