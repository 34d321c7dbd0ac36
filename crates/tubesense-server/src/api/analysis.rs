use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;

use tubesense_analysis::{
    AnalysisError, KeywordFrequencies, SentimentSummary, ToxicityCheck, ToxicitySummary,
};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct VideoRequest {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentRequest {
    pub comment: Option<String>,
}

/// Unwraps the JSON body and insists on a non-blank `field`.
fn require_field<T>(
    req_id: &RequestId,
    payload: Result<Json<T>, JsonRejection>,
    field: &'static str,
    pick: impl FnOnce(T) -> Option<String>,
) -> Result<String, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        ApiError::new(req_id.0.clone(), "validation_error", rejection.body_text())
    })?;

    match pick(body) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::new(
            req_id.0.clone(),
            "validation_error",
            format!("{field} is required"),
        )),
    }
}

fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::NoComments => ApiError::new(request_id, "no_comments", error.to_string()),
        AnalysisError::Classifier(e) => {
            tracing::error!(error = %e, "classification failed");
            ApiError::new(request_id, "classifier_error", "classification failed")
        }
    }
}

pub(super) async fn extract_keywords(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<KeywordFrequencies>, ApiError> {
    let video_id = require_field(&req_id, payload, "videoId", |b| b.video_id)?;
    state
        .analyzer
        .extract_keywords(&video_id)
        .await
        .map(Json)
        .map_err(|e| map_analysis_error(req_id.0, &e))
}

pub(super) async fn analyze_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<SentimentSummary>, ApiError> {
    let video_id = require_field(&req_id, payload, "videoId", |b| b.video_id)?;
    state
        .analyzer
        .analyze_sentiment(&video_id)
        .await
        .map(Json)
        .map_err(|e| map_analysis_error(req_id.0, &e))
}

pub(super) async fn analyze_toxicity(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<ToxicitySummary>, ApiError> {
    let video_id = require_field(&req_id, payload, "videoId", |b| b.video_id)?;
    state
        .analyzer
        .analyze_toxicity(&video_id)
        .await
        .map(Json)
        .map_err(|e| map_analysis_error(req_id.0, &e))
}

pub(super) async fn check_toxicity(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Json<ToxicityCheck>, ApiError> {
    let comment = require_field(&req_id, payload, "comment", |b| b.comment)?;
    state
        .analyzer
        .check_toxicity(&comment)
        .await
        .map(Json)
        .map_err(|e| map_analysis_error(req_id.0, &e))
}
