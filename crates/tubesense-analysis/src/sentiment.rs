//! Sentiment bucket aggregation.

use serde::Serialize;

use crate::buckets::{percentage, SentimentBucket};
use crate::classifier::SentimentClassifier;
use crate::error::AnalysisError;

/// Share of comments in each sentiment bucket, in percent (not rounded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    #[serde(rename = "positive_percentage")]
    pub positive_pct: f64,
    #[serde(rename = "neutral_percentage")]
    pub neutral_pct: f64,
    #[serde(rename = "negative_percentage")]
    pub negative_pct: f64,
}

/// Running bucket counts, folded one score at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentTally {
    pub fn record(&mut self, stars: u8) {
        match SentimentBucket::from_score(stars) {
            SentimentBucket::Positive => self.positive += 1,
            SentimentBucket::Neutral => self.neutral += 1,
            SentimentBucket::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Converts counts to percentages of the total.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoComments`] when nothing was recorded.
    pub fn finish(self) -> Result<SentimentSummary, AnalysisError> {
        let total = self.total();
        if total == 0 {
            return Err(AnalysisError::NoComments);
        }
        Ok(SentimentSummary {
            positive_pct: percentage(self.positive, total),
            neutral_pct: percentage(self.neutral, total),
            negative_pct: percentage(self.negative, total),
        })
    }
}

/// Scores each comment in order and buckets the star ratings.
///
/// # Errors
///
/// - [`AnalysisError::NoComments`] for an empty batch (checked before any
///   classifier call).
/// - [`AnalysisError::Classifier`] on the first failed classification.
pub async fn aggregate_sentiment(
    classifier: &dyn SentimentClassifier,
    comments: &[String],
) -> Result<SentimentSummary, AnalysisError> {
    if comments.is_empty() {
        return Err(AnalysisError::NoComments);
    }

    let mut tally = SentimentTally::default();
    for comment in comments {
        tally.record(classifier.score(comment).await?);
    }

    tracing::debug!(
        positive = tally.positive,
        neutral = tally.neutral,
        negative = tally.negative,
        "sentiment tally complete"
    );
    tally.finish()
}
