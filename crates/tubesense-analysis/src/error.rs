use thiserror::Error;

/// Failure of a classifier call. Never caught by the aggregators: one bad
/// classification fails the whole analysis.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("inference HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("inference response parse error: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("unusable classifier output: {0}")]
    InvalidOutput(String),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The comment fetch failed or returned nothing. Callers see one outcome
    /// for both; the underlying fetch error is only logged.
    #[error("No comments found or failed to fetch comments.")]
    NoComments,

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
