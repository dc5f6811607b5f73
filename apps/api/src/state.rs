use std::sync::Arc;

use crate::config::Config;
use crate::live::profile::ProfileExtractor;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Cheap to clone. Per-session interview context is NOT kept
/// here; each live connection owns its own.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable profile extractor. Default: Linkup sourced-answer search.
    pub profile_extractor: Arc<dyn ProfileExtractor>,
    pub config: Config,
}
