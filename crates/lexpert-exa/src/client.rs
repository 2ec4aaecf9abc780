//! HTTP client for the Exa content-search API.
//!
//! Wraps `reqwest` with Exa-specific error handling and typed response
//! deserialization. Every search requests full text and highlights so that
//! contact extraction has something to chew on.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::ExaError;
use crate::types::SearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.exa.ai/";

/// Knobs for a single search call.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub num_results: u32,
    pub use_autoprompt: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            num_results: 10,
            use_autoprompt: true,
        }
    }
}

/// Client for the Exa search API.
///
/// Use [`ExaClient::new`] for production or [`ExaClient::with_base_url`] to
/// point at a mock server in tests.
pub struct ExaClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequestBody<'a> {
    query: &'a str,
    num_results: u32,
    use_autoprompt: bool,
    contents: ContentsSpec,
}

#[derive(Serialize)]
struct ContentsSpec {
    text: bool,
    highlights: bool,
}

impl ExaClient {
    /// Creates a new client pointed at the production Exa API.
    ///
    /// # Errors
    ///
    /// Returns [`ExaError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ExaError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ExaError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ExaError::ApiError`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ExaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("lexpert/0.1 (expert-search)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ExaError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs a content search, returning results with full text and highlights.
    ///
    /// # Errors
    ///
    /// - [`ExaError::ApiError`] if the API returns a non-2xx status.
    /// - [`ExaError::Http`] on network failure.
    /// - [`ExaError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<SearchResponse, ExaError> {
        let url = self
            .base_url
            .join("search")
            .map_err(|e| ExaError::ApiError(format!("invalid endpoint URL: {e}")))?;

        let body = SearchRequestBody {
            query,
            num_results: options.num_results,
            use_autoprompt: options.use_autoprompt,
            contents: ContentsSpec {
                text: true,
                highlights: true,
            },
        };

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ExaError::ApiError(format!("status {status}: {text}")));
        }

        serde_json::from_str(&text).map_err(|e| ExaError::Deserialize {
            context: format!("search(query={query})"),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_options_defaults_match_handler_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.num_results, 10);
        assert!(options.use_autoprompt);
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client =
            ExaClient::with_base_url("k", 30, "https://api.exa.ai//").expect("client builds");
        assert_eq!(client.base_url.as_str(), "https://api.exa.ai/");
    }
}
