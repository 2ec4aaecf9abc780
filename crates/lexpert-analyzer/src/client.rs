//! HTTP client for the Anthropic Messages API.
//!
//! Wraps `reqwest` with typed error handling, API key management, and the
//! case-analysis prompt. The only operation is [`AnalyzerClient::analyze`],
//! which asks the model for a JSON [`CaseAnalysis`] and parses it out of the
//! completion text.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;
use crate::extract::parse_case_analysis;
use crate::types::CaseAnalysis;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Client for the Anthropic Messages API.
///
/// Use [`AnalyzerClient::new`] for production or
/// [`AnalyzerClient::with_base_url`] to point at a mock server in tests.
pub struct AnalyzerClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

impl AnalyzerClient {
    /// Creates a new client pointed at the production Anthropic API.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, AnalyzerError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AnalyzerError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("lexpert/0.1 (expert-search)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| AnalyzerError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
        })
    }

    /// Analyzes a legal-matter description into a [`CaseAnalysis`].
    ///
    /// Sends one user message instructing the model to respond with only a
    /// JSON object, then parses the first text block of the completion.
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::ApiError`] if the API returns a non-2xx status.
    /// - [`AnalyzerError::Http`] on network failure.
    /// - [`AnalyzerError::NoJsonObject`] if the completion has no text block
    ///   or the text contains no `{...}` object.
    /// - [`AnalyzerError::Deserialize`] if the response envelope or the
    ///   embedded object does not match the expected shape.
    pub async fn analyze(&self, case_description: &str) -> Result<CaseAnalysis, AnalyzerError> {
        let url = self
            .base_url
            .join("v1/messages")
            .map_err(|e| AnalyzerError::ApiError(format!("invalid endpoint URL: {e}")))?;

        let prompt = build_prompt(case_description);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AnalyzerError::ApiError(format!(
                "status {status}: {}",
                truncate(&body, 200)
            )));
        }

        let envelope: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| AnalyzerError::Deserialize {
                context: "messages response".to_string(),
                source: e,
            })?;

        let text = envelope
            .content
            .iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .ok_or(AnalyzerError::NoJsonObject)?;

        parse_case_analysis(text)
    }
}

fn build_prompt(case_description: &str) -> String {
    format!(
        r#"Analyze this legal case description and extract key information for finding expert witnesses. Return ONLY valid JSON with this structure:
{{
  "coreConflict": "brief description of the main legal issue",
  "expertiseNeeded": ["list of specific expertise areas needed"],
  "caseType": "type of case (e.g., medical malpractice, construction defect)",
  "jurisdiction": "location if mentioned",
  "keyIssues": ["list of specific technical or factual issues"],
  "suggestedSpecialties": ["expert witness specialties that would be relevant"]
}}

Case description:
{case_description}"#
    )
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
