//! Search Client — Linkup sourced-answer transport.
//!
//! Used for candidate profile extraction: queries are restricted to the
//! profile's own URL via `include_domains`, so the answer can only draw on
//! content actually hosted at that profile.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const LINKUP_API_URL: &str = "https://api.linkup.so/v1/search";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Search returned no answer")]
    EmptyAnswer,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkupRequest<'a> {
    q: &'a str,
    depth: &'static str,
    output_type: &'static str,
    include_images: bool,
    include_inline_citations: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    include_domains: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LinkupResponse {
    answer: Option<String>,
}

/// Thin Linkup client. Exposes a single `sourced_answer` operation; query
/// construction belongs to the calling domain module.
#[derive(Clone)]
pub struct LinkupClient {
    client: Client,
    api_key: String,
}

impl LinkupClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Runs a standard-depth sourced-answer search, optionally restricted to
    /// the given domains, and returns the synthesized answer prose.
    pub async fn sourced_answer(
        &self,
        query: &str,
        include_domains: &[&str],
    ) -> Result<String, SearchError> {
        let request_body = LinkupRequest {
            q: query,
            depth: "standard",
            output_type: "sourcedAnswer",
            include_images: false,
            include_inline_citations: false,
            include_domains: include_domains.to_vec(),
        };

        let response = self
            .client
            .post(LINKUP_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let linkup_response: LinkupResponse = response.json().await?;

        let answer = linkup_response
            .answer
            .filter(|a| !a.trim().is_empty())
            .ok_or(SearchError::EmptyAnswer)?;

        debug!("Search answer received ({} chars)", answer.len());

        Ok(answer)
    }
}
