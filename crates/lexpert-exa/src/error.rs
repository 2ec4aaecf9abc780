use thiserror::Error;

/// Errors returned by the Exa search client.
#[derive(Debug, Error)]
pub enum ExaError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Exa API returned a non-2xx status with a message body.
    #[error("Exa API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
