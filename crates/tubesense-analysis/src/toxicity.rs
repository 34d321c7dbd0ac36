//! Toxicity bucket aggregation and the single-comment check.

use serde::Serialize;

use crate::buckets::{percentage, ToxicityBucket};
use crate::classifier::ToxicityClassifier;
use crate::error::{AnalysisError, ClassifierError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToxicitySummary {
    pub total_comments: usize,
    #[serde(rename = "toxic_percentage")]
    pub toxic_pct: f64,
    #[serde(rename = "safe_percentage")]
    pub safe_pct: f64,
    #[serde(rename = "high_toxicity_percentage")]
    pub high_pct: f64,
    #[serde(rename = "moderate_toxicity_percentage")]
    pub moderate_pct: f64,
    #[serde(rename = "low_toxicity_percentage")]
    pub low_pct: f64,
    /// Arithmetic mean of every per-comment probability.
    pub average_toxicity: f64,
}

/// Running bucket counts plus the score sum for the mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToxicityTally {
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    pub safe: usize,
    score_sum: f64,
}

impl ToxicityTally {
    pub fn record(&mut self, score: f64) {
        self.score_sum += score;
        match ToxicityBucket::from_score(score) {
            ToxicityBucket::High => self.high += 1,
            ToxicityBucket::Moderate => self.moderate += 1,
            ToxicityBucket::Low => self.low += 1,
            ToxicityBucket::Safe => self.safe += 1,
        }
    }

    /// Comments at or above the toxic cutoff (high + moderate + low).
    #[must_use]
    pub fn toxic(&self) -> usize {
        self.high + self.moderate + self.low
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.toxic() + self.safe
    }

    /// Converts counts to percentages and computes the mean score.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoComments`] when nothing was recorded.
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(self) -> Result<ToxicitySummary, AnalysisError> {
        let total = self.total();
        if total == 0 {
            return Err(AnalysisError::NoComments);
        }
        Ok(ToxicitySummary {
            total_comments: total,
            toxic_pct: percentage(self.toxic(), total),
            safe_pct: percentage(self.safe, total),
            high_pct: percentage(self.high, total),
            moderate_pct: percentage(self.moderate, total),
            low_pct: percentage(self.low, total),
            average_toxicity: self.score_sum / total as f64,
        })
    }
}

/// Scores each comment in order and buckets the probabilities.
///
/// # Errors
///
/// - [`AnalysisError::NoComments`] for an empty batch (checked before any
///   classifier call).
/// - [`AnalysisError::Classifier`] on the first failed classification.
pub async fn aggregate_toxicity(
    classifier: &dyn ToxicityClassifier,
    comments: &[String],
) -> Result<ToxicitySummary, AnalysisError> {
    if comments.is_empty() {
        return Err(AnalysisError::NoComments);
    }

    let mut tally = ToxicityTally::default();
    for comment in comments {
        tally.record(classifier.score(comment).await?);
    }

    tracing::debug!(
        high = tally.high,
        moderate = tally.moderate,
        low = tally.low,
        safe = tally.safe,
        "toxicity tally complete"
    );
    tally.finish()
}

/// Result of scoring one caller-supplied comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToxicityCheck {
    pub comment: String,
    pub toxicity_score: f64,
    pub is_toxic: bool,
}

/// Scores a single comment directly, without fetching anything.
///
/// `is_toxic` uses the same cutoff as the aggregate's toxic share.
///
/// # Errors
///
/// Returns the classifier's error unchanged.
pub async fn check_comment(
    classifier: &dyn ToxicityClassifier,
    comment: &str,
) -> Result<ToxicityCheck, ClassifierError> {
    let score = classifier.score(comment).await?;
    Ok(ToxicityCheck {
        comment: comment.to_owned(),
        toxicity_score: score,
        is_toxic: ToxicityBucket::from_score(score).is_toxic(),
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Reads the probability from the comment text itself ("0.75" → 0.75).
    struct EchoProbability;

    #[async_trait]
    impl ToxicityClassifier for EchoProbability {
        async fn score(&self, text: &str) -> Result<f64, ClassifierError> {
            text.parse()
                .map_err(|_| ClassifierError::InvalidOutput(format!("not a probability: {text}")))
        }
    }

    fn batch(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[tokio::test]
    async fn empty_batch_is_an_error() {
        let result = aggregate_toxicity(&EchoProbability, &[]).await;
        assert!(matches!(result, Err(AnalysisError::NoComments)));
    }

    #[tokio::test]
    async fn single_highly_toxic_comment() {
        let summary = aggregate_toxicity(&EchoProbability, &batch(&["0.95"]))
            .await
            .unwrap();
        assert_eq!(summary.total_comments, 1);
        assert_close(summary.toxic_pct, 100.0);
        assert_close(summary.safe_pct, 0.0);
        assert_close(summary.high_pct, 100.0);
        assert_close(summary.moderate_pct, 0.0);
        assert_close(summary.low_pct, 0.0);
        assert_close(summary.average_toxicity, 0.95);
    }

    #[tokio::test]
    async fn boundary_scores_land_in_documented_buckets() {
        let comments = batch(&["0.9", "0.7", "0.5", "0.4999"]);
        let summary = aggregate_toxicity(&EchoProbability, &comments)
            .await
            .unwrap();
        assert_close(summary.high_pct, 25.0);
        assert_close(summary.moderate_pct, 25.0);
        assert_close(summary.low_pct, 25.0);
        assert_close(summary.safe_pct, 25.0);
        assert_close(summary.toxic_pct, 75.0);
    }

    #[tokio::test]
    async fn toxic_and_safe_shares_are_complementary() {
        let comments = batch(&["0.1", "0.2", "0.55", "0.8", "0.99", "0.3", "0.0"]);
        let summary = aggregate_toxicity(&EchoProbability, &comments)
            .await
            .unwrap();
        assert_close(summary.toxic_pct + summary.safe_pct, 100.0);
        assert_close(
            summary.toxic_pct,
            summary.high_pct + summary.moderate_pct + summary.low_pct,
        );
        assert_eq!(summary.total_comments, 7);
    }

    #[tokio::test]
    async fn average_is_mean_of_all_scores() {
        let comments = batch(&["0.2", "0.4", "0.9"]);
        let summary = aggregate_toxicity(&EchoProbability, &comments)
            .await
            .unwrap();
        assert_close(summary.average_toxicity, 0.5);
    }

    #[tokio::test]
    async fn classifier_error_fails_the_aggregate() {
        let result = aggregate_toxicity(&EchoProbability, &batch(&["0.2", "nope"])).await;
        assert!(matches!(result, Err(AnalysisError::Classifier(_))));
    }

    #[tokio::test]
    async fn check_comment_flags_exact_cutoff_as_toxic() {
        let check = check_comment(&EchoProbability, "0.5").await.unwrap();
        assert!(check.is_toxic);
        assert_close(check.toxicity_score, 0.5);
        assert_eq!(check.comment, "0.5");
    }

    #[tokio::test]
    async fn check_comment_below_cutoff_is_not_toxic() {
        let check = check_comment(&EchoProbability, "0.4999").await.unwrap();
        assert!(!check.is_toxic);
    }

    #[test]
    fn summary_serializes_with_original_field_names() {
        let mut tally = ToxicityTally::default();
        tally.record(0.75);
        let json = serde_json::to_value(tally.finish().unwrap()).expect("serialize");
        let keys: Vec<&str> = json
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        for expected in [
            "total_comments",
            "toxic_percentage",
            "safe_percentage",
            "high_toxicity_percentage",
            "moderate_toxicity_percentage",
            "low_toxicity_percentage",
            "average_toxicity",
        ] {
            assert!(keys.contains(&expected), "missing key {expected}");
        }
        assert_eq!(json["moderate_toxicity_percentage"], 100.0);
    }
}
