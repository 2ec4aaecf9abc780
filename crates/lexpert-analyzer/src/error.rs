use thiserror::Error;

/// Errors returned by the case-analysis client.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned an error status with a message body.
    #[error("Anthropic API error: {0}")]
    ApiError(String),

    /// The completion text contained no `{...}` object to parse.
    #[error("completion contained no JSON object")]
    NoJsonObject,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
