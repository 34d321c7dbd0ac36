//! Fetch-then-aggregate orchestration for the three analyses.

use std::sync::Arc;

use tubesense_youtube::YoutubeClient;

use crate::classifier::{KeywordExtractor, SentimentClassifier, ToxicityClassifier};
use crate::error::AnalysisError;
use crate::keywords::{aggregate_keywords, KeywordFrequencies};
use crate::sentiment::{aggregate_sentiment, SentimentSummary};
use crate::toxicity::{aggregate_toxicity, check_comment, ToxicityCheck, ToxicitySummary};

/// The three classifier handles, built once per process.
#[derive(Clone)]
pub struct Classifiers {
    pub keywords: Arc<dyn KeywordExtractor>,
    pub sentiment: Arc<dyn SentimentClassifier>,
    pub toxicity: Arc<dyn ToxicityClassifier>,
}

/// Runs an analysis end to end: fetch a video's comments, classify each one
/// in order, and fold the results into a summary.
///
/// Holds only read-only handles, so a single `Analyzer` can be shared across
/// concurrent requests behind an `Arc`.
pub struct Analyzer {
    youtube: YoutubeClient,
    max_comments: usize,
    classifiers: Classifiers,
}

impl Analyzer {
    #[must_use]
    pub fn new(youtube: YoutubeClient, max_comments: usize, classifiers: Classifiers) -> Self {
        Self {
            youtube,
            max_comments,
            classifiers,
        }
    }

    /// Keyword frequencies across the video's comments.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::NoComments`] if the fetch failed or found nothing;
    /// [`AnalysisError::Classifier`] if any extraction fails.
    pub async fn extract_keywords(&self, video_id: &str) -> Result<KeywordFrequencies, AnalysisError> {
        let comments = self.fetch(video_id).await?;
        let frequencies = aggregate_keywords(self.classifiers.keywords.as_ref(), &comments).await?;
        tracing::info!(
            video_id,
            comments = comments.len(),
            keywords = frequencies.keywords.len(),
            "keyword extraction complete"
        );
        Ok(frequencies)
    }

    /// Positive / neutral / negative shares of the video's comments.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::NoComments`] if the fetch failed or found nothing;
    /// [`AnalysisError::Classifier`] if any classification fails.
    pub async fn analyze_sentiment(&self, video_id: &str) -> Result<SentimentSummary, AnalysisError> {
        let comments = self.fetch(video_id).await?;
        let summary = aggregate_sentiment(self.classifiers.sentiment.as_ref(), &comments).await?;
        tracing::info!(
            video_id,
            comments = comments.len(),
            positive = summary.positive_pct,
            "sentiment analysis complete"
        );
        Ok(summary)
    }

    /// Toxicity bucket shares and mean toxicity of the video's comments.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::NoComments`] if the fetch failed or found nothing;
    /// [`AnalysisError::Classifier`] if any classification fails.
    pub async fn analyze_toxicity(&self, video_id: &str) -> Result<ToxicitySummary, AnalysisError> {
        let comments = self.fetch(video_id).await?;
        let summary = aggregate_toxicity(self.classifiers.toxicity.as_ref(), &comments).await?;
        tracing::info!(
            video_id,
            comments = summary.total_comments,
            toxic = summary.toxic_pct,
            "toxicity analysis complete"
        );
        Ok(summary)
    }

    /// Scores one comment supplied by the caller.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Classifier`] if the classification fails.
    pub async fn check_toxicity(&self, comment: &str) -> Result<ToxicityCheck, AnalysisError> {
        Ok(check_comment(self.classifiers.toxicity.as_ref(), comment).await?)
    }

    /// Fetches the comment batch, collapsing "fetch failed" and "no comments"
    /// into [`AnalysisError::NoComments`].
    async fn fetch(&self, video_id: &str) -> Result<Vec<String>, AnalysisError> {
        match self.youtube.fetch_comments(video_id, self.max_comments).await {
            Ok(comments) if comments.is_empty() => {
                tracing::info!(video_id, "video has no comments");
                Err(AnalysisError::NoComments)
            }
            Ok(comments) => Ok(comments),
            Err(e) => {
                tracing::warn!(video_id, error = %e, "comment fetch failed");
                Err(AnalysisError::NoComments)
            }
        }
    }
}
