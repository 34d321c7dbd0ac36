use thiserror::Error;

/// Errors returned by the `YouTube` comment client.
///
/// Every variant means the comment list could not be fetched; callers that
/// only care about "comments or not" can treat them uniformly.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` comes from the Google error envelope when present.
    #[error("YouTube API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("video id must not be empty")]
    EmptyVideoId,

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
