#![allow(dead_code)]

//! Live session — per-connection interview context and event loop.
//!
//! Each WebSocket connection owns one `LiveSession`; nothing is shared across
//! sessions except the immutable rubric and the cloneable clients. Events are
//! handled strictly sequentially: one inbound record is fully processed,
//! including any LLM or search await, before the next is read, so suggested
//! questions are emitted in the order their transcript chunks arrived.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::{info, warn};
use uuid::Uuid;

use crate::live::events::{CandidateInfos, EventKind, InboundEvent, OutboundEvent};
use crate::live::profile::extract_profile;
use crate::live::suggest::suggest_next_question;
use crate::state::AppState;

/// Trailing transcript slice kept per session; bounds prompt cost and latency
/// of every suggestion call.
pub const TRANSCRIPT_WINDOW_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Closed,
}

/// Accumulated interview context owned by one connection.
#[derive(Debug, Default)]
pub struct InterviewContext {
    pub job_offer: String,
    pub company_values: String,
    pub candidate_profile: String,
    transcript: String,
}

impl InterviewContext {
    /// Appends a chunk and truncates the buffer to the most recent
    /// `TRANSCRIPT_WINDOW_CHARS` characters of the concatenation.
    pub fn push_transcript(&mut self, chunk: &str) {
        self.transcript.push_str(chunk);
        let excess = self
            .transcript
            .chars()
            .count()
            .saturating_sub(TRANSCRIPT_WINDOW_CHARS);
        if excess > 0 {
            self.transcript = self.transcript.chars().skip(excess).collect();
        }
    }

    pub fn transcript_window(&self) -> &str {
        &self.transcript
    }

    /// The stable prompt block: everything that does not change between
    /// transcript increments. Sent as an independently cacheable segment.
    pub fn static_context(&self) -> String {
        format!(
            "# Job offer:\n{}\n\n# Company values:\n{}\n\n# Candidate profile:\n{}",
            self.job_offer, self.company_values, self.candidate_profile
        )
    }
}

/// What handling one inbound record produced.
#[derive(Debug, PartialEq)]
pub enum EventOutcome {
    Reply(OutboundEvent),
    /// Reported best-effort, then the session closes.
    Fatal(OutboundEvent),
}

pub struct LiveSession {
    id: Uuid,
    state: SessionState,
    ctx: InterviewContext,
}

impl LiveSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            ctx: InterviewContext::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &InterviewContext {
        &self.ctx
    }

    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    /// Handles one inbound text record and returns what to send back.
    pub async fn handle_text(&mut self, state: &AppState, text: &str) -> EventOutcome {
        if self.state == SessionState::Idle {
            self.state = SessionState::Active;
        }

        let event: InboundEvent = match serde_json::from_str(text) {
            Ok(event) => event,
            Err(e) => {
                warn!("Session {}: malformed inbound record: {e}", self.id);
                return EventOutcome::Fatal(OutboundEvent::Error {
                    message: format!("Invalid JSON: {e}"),
                });
            }
        };

        let kind = EventKind::parse(&event.event_type);
        match kind {
            EventKind::TranscriptChunk => self.handle_transcript_chunk(state, event).await,
            EventKind::CandidateInfos => self.handle_candidate_infos(state, event).await,
            kind if kind.is_ignored() => EventOutcome::Reply(OutboundEvent::Status {
                message: format!("{} acknowledged", event.event_type),
            }),
            _ => EventOutcome::Reply(OutboundEvent::Error {
                message: format!("Unknown event type: {}", event.event_type),
            }),
        }
    }

    async fn handle_transcript_chunk(
        &mut self,
        state: &AppState,
        event: InboundEvent,
    ) -> EventOutcome {
        let Some(chunk) = event.payload.as_str() else {
            return EventOutcome::Reply(OutboundEvent::Error {
                message: "TRANSCRIPT_CHUNK payload must be a string".to_string(),
            });
        };

        self.ctx.push_transcript(chunk);

        match suggest_next_question(&state.llm, &self.ctx).await {
            Ok(question) => EventOutcome::Reply(OutboundEvent::NewSuggestedQuestion {
                data: question,
            }),
            Err(e) => {
                warn!("Session {}: question suggestion failed: {e}", self.id);
                EventOutcome::Reply(OutboundEvent::Error {
                    message: format!("Question suggestion failed: {e}"),
                })
            }
        }
    }

    async fn handle_candidate_infos(
        &mut self,
        state: &AppState,
        event: InboundEvent,
    ) -> EventOutcome {
        let infos: CandidateInfos = match serde_json::from_value(event.payload) {
            Ok(infos) => infos,
            Err(e) => {
                return EventOutcome::Reply(OutboundEvent::Error {
                    message: format!("Invalid CANDIDATE_INFOS payload: {e}"),
                })
            }
        };

        if let Some(job_offer) = infos.job_description {
            self.ctx.job_offer = job_offer;
        }
        if let Some(values) = infos.company_values {
            self.ctx.company_values = values;
        }

        let profile_url = infos
            .linkedin_url
            .filter(|url| !url.trim().is_empty());

        match profile_url {
            Some(url) => {
                match extract_profile(state.profile_extractor.as_ref(), &url).await {
                    Ok(memo) => {
                        self.ctx.candidate_profile = memo;
                        EventOutcome::Reply(OutboundEvent::Status {
                            message: "Candidate profile extracted".to_string(),
                        })
                    }
                    Err(e) => {
                        warn!("Session {}: profile extraction failed: {e}", self.id);
                        EventOutcome::Reply(OutboundEvent::Error {
                            message: format!("Profile extraction failed: {e}"),
                        })
                    }
                }
            }
            None => EventOutcome::Reply(OutboundEvent::Status {
                message: "Candidate context updated".to_string(),
            }),
        }
    }
}

impl Default for LiveSession {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WebSocket plumbing
// ────────────────────────────────────────────────────────────────────────────

/// GET /ws
/// Upgrades to the live session protocol.
pub async fn live_session_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| run_session(socket, state))
}

async fn run_session(mut socket: WebSocket, state: AppState) {
    let mut session = LiveSession::new();
    info!("Live session {} connected", session.id());

    while let Some(message) = socket.recv().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                warn!("Live session {}: receive error: {e}", session.id());
                break;
            }
        };

        match message {
            Message::Text(text) => match session.handle_text(&state, &text).await {
                EventOutcome::Reply(event) => {
                    if send_event(&mut socket, &event).await.is_err() {
                        break;
                    }
                }
                EventOutcome::Fatal(event) => {
                    // Best-effort report; a failed send is swallowed.
                    let _ = send_event(&mut socket, &event).await;
                    break;
                }
            },
            Message::Close(_) => break,
            // Ping/pong are answered by the stack; binary frames are not part
            // of the protocol.
            _ => {}
        }
    }

    session.close();
    info!("Live session {} closed", session.id());
}

async fn send_event(socket: &mut WebSocket, event: &OutboundEvent) -> Result<(), axum::Error> {
    let text = serde_json::to_string(event).unwrap_or_default();
    socket.send(Message::Text(text)).await
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::search_client::LinkupClient;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState {
            llm: LlmClient::new("test-key".to_string()),
            profile_extractor: Arc::new(LinkupClient::new("test-key".to_string())),
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                linkup_api_key: "test-key".to_string(),
                output_dir: std::env::temp_dir(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    #[test]
    fn test_window_keeps_tail_of_concatenation() {
        let mut ctx = InterviewContext::default();
        ctx.push_transcript(&"a".repeat(200));
        ctx.push_transcript(&"b".repeat(600));

        let window = ctx.transcript_window();
        assert_eq!(window.chars().count(), 500);
        // The tail of a 200-a + 600-b concatenation is all b's.
        assert!(window.chars().all(|c| c == 'b'));
    }

    #[test]
    fn test_window_leaves_short_transcript_alone() {
        let mut ctx = InterviewContext::default();
        ctx.push_transcript("Interviewer: tell me about yourself.");
        assert_eq!(
            ctx.transcript_window(),
            "Interviewer: tell me about yourself."
        );
    }

    #[test]
    fn test_window_truncation_preserves_chunk_boundary_content() {
        let mut ctx = InterviewContext::default();
        ctx.push_transcript(&"x".repeat(499));
        ctx.push_transcript("YZ");
        assert_eq!(ctx.transcript_window().chars().count(), 500);
        assert!(ctx.transcript_window().ends_with("YZ"));
    }

    #[test]
    fn test_static_context_carries_all_three_fields() {
        let ctx = InterviewContext {
            job_offer: "Senior Data Analyst".to_string(),
            company_values: "Curiosity, candor".to_string(),
            candidate_profile: "Summary: 6 years in analytics".to_string(),
            transcript: "recent talk".to_string(),
        };
        let block = ctx.static_context();
        assert!(block.contains("Senior Data Analyst"));
        assert!(block.contains("Curiosity, candor"));
        assert!(block.contains("Summary: 6 years in analytics"));
        // The rolling transcript is NOT part of the cacheable block.
        assert!(!block.contains("recent talk"));
    }

    #[tokio::test]
    async fn test_first_event_transitions_idle_to_active() {
        let state = test_state();
        let mut session = LiveSession::new();
        assert_eq!(session.state(), SessionState::Idle);

        session
            .handle_text(&state, r#"{"EVENT_TYPE": "FLAG_MOMENT"}"#)
            .await;
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_ignored_kinds_are_acknowledged_as_noops() {
        let state = test_state();
        let mut session = LiveSession::new();

        for kind in ["FLAG_MOMENT", "TERM_DEFINITION", "TODO_ITEM"] {
            let outcome = session
                .handle_text(&state, &format!(r#"{{"EVENT_TYPE": "{kind}"}}"#))
                .await;
            match outcome {
                EventOutcome::Reply(OutboundEvent::Status { message }) => {
                    assert!(message.contains(kind));
                }
                other => panic!("expected Status reply for {kind}, got {other:?}"),
            }
        }
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_unknown_kind_errors_but_session_stays_active() {
        let state = test_state();
        let mut session = LiveSession::new();

        let outcome = session
            .handle_text(&state, r#"{"EVENT_TYPE": "SING_A_SONG", "PAYLOAD": {}}"#)
            .await;
        match outcome {
            EventOutcome::Reply(OutboundEvent::Error { message }) => {
                assert!(message.contains("SING_A_SONG"));
            }
            other => panic!("expected Error reply, got {other:?}"),
        }
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_malformed_record_is_fatal() {
        let state = test_state();
        let mut session = LiveSession::new();

        let outcome = session.handle_text(&state, "{not json").await;
        assert!(matches!(
            outcome,
            EventOutcome::Fatal(OutboundEvent::Error { .. })
        ));
    }

    #[tokio::test]
    async fn test_candidate_infos_without_url_stores_context() {
        let state = test_state();
        let mut session = LiveSession::new();

        let outcome = session
            .handle_text(
                &state,
                r#"{"EVENT_TYPE": "CANDIDATE_INFOS", "PAYLOAD": {
                    "JOB_DESCRIPTION": "Senior Data Analyst",
                    "COMPANY_VALUES": "Curiosity, candor"
                }}"#,
            )
            .await;

        assert_eq!(
            outcome,
            EventOutcome::Reply(OutboundEvent::Status {
                message: "Candidate context updated".to_string()
            })
        );
        assert_eq!(session.context().job_offer, "Senior Data Analyst");
        assert_eq!(session.context().company_values, "Curiosity, candor");
        assert!(session.context().candidate_profile.is_empty());
    }

    #[tokio::test]
    async fn test_non_string_transcript_payload_is_rejected_non_fatally() {
        let state = test_state();
        let mut session = LiveSession::new();

        let outcome = session
            .handle_text(&state, r#"{"EVENT_TYPE": "TRANSCRIPT_CHUNK", "PAYLOAD": 42}"#)
            .await;
        match outcome {
            EventOutcome::Reply(OutboundEvent::Error { message }) => {
                assert!(message.contains("must be a string"));
            }
            other => panic!("expected Error reply, got {other:?}"),
        }
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.context().transcript_window().is_empty());
    }
}
