//! Candidate profile extraction — turns a LinkedIn/GitHub profile URL into a
//! recruiter-facing memo via a domain-restricted sourced-answer search.

use async_trait::async_trait;
use tracing::info;

use crate::live::prompts::profile_memo_query;
use crate::search_client::{LinkupClient, SearchError};

/// The profile extraction seam. Carried in `AppState` as
/// `Arc<dyn ProfileExtractor>` so tests can substitute a stub.
#[async_trait]
pub trait ProfileExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<String, SearchError>;
}

#[async_trait]
impl ProfileExtractor for LinkupClient {
    async fn extract(&self, url: &str) -> Result<String, SearchError> {
        let query = profile_memo_query(url);
        // Restrict the search to the profile's own URL: the memo may only
        // report facts hosted there, never inferred from elsewhere.
        self.sourced_answer(&query, &[url]).await
    }
}

/// Prefixes a scheme when the client sent a bare host path.
pub fn normalize_profile_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Normalizes the URL and runs the extraction.
pub async fn extract_profile(
    extractor: &dyn ProfileExtractor,
    url: &str,
) -> Result<String, SearchError> {
    let url = normalize_profile_url(url);
    info!("Extracting candidate profile from {url}");
    extractor.extract(&url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_normalize_adds_scheme_when_missing() {
        assert_eq!(
            normalize_profile_url("linkedin.com/in/x"),
            "https://linkedin.com/in/x"
        );
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(
            normalize_profile_url("https://linkedin.com/in/x"),
            "https://linkedin.com/in/x"
        );
        assert_eq!(
            normalize_profile_url("http://github.com/octocat"),
            "http://github.com/octocat"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_profile_url("  linkedin.com/in/x \n"),
            "https://linkedin.com/in/x"
        );
    }

    /// Stub that records the URL it was asked to extract.
    struct RecordingExtractor {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ProfileExtractor for RecordingExtractor {
        async fn extract(&self, url: &str) -> Result<String, SearchError> {
            self.seen.lock().unwrap().push(url.to_string());
            Ok("Summary: ...".to_string())
        }
    }

    #[tokio::test]
    async fn test_extract_profile_passes_normalized_url_to_extractor() {
        let extractor = RecordingExtractor {
            seen: Mutex::new(Vec::new()),
        };
        let memo = extract_profile(&extractor, "linkedin.com/in/x").await.unwrap();
        assert_eq!(memo, "Summary: ...");
        assert_eq!(
            extractor.seen.lock().unwrap().as_slice(),
            ["https://linkedin.com/in/x"]
        );
    }
}
