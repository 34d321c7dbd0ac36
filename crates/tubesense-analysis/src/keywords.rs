//! Keyword-frequency aggregation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classifier::KeywordExtractor;
use crate::error::ClassifierError;

/// Occurrence count per extracted keyword, across one comment batch.
///
/// Keys are the extractor's surface text, unnormalized: `"Rust"` and `"rust"`
/// are counted separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordFrequencies {
    pub keywords: BTreeMap<String, usize>,
}

impl KeywordFrequencies {
    fn record(&mut self, word: String) {
        *self.keywords.entry(word).or_insert(0) += 1;
    }
}

/// Counts every grouped entity the extractor returns for each comment.
///
/// An empty batch yields an empty mapping.
///
/// # Errors
///
/// Returns the first [`ClassifierError`]; no partial result is produced.
pub async fn aggregate_keywords(
    extractor: &dyn KeywordExtractor,
    comments: &[String],
) -> Result<KeywordFrequencies, ClassifierError> {
    let mut frequencies = KeywordFrequencies::default();
    for comment in comments {
        for entity in extractor.extract(comment).await? {
            frequencies.record(entity.word);
        }
    }
    Ok(frequencies)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::classifier::KeywordEntity;

    /// Treats every whitespace-separated token starting with `#` as a keyword.
    struct HashtagExtractor;

    #[async_trait]
    impl KeywordExtractor for HashtagExtractor {
        async fn extract(&self, text: &str) -> Result<Vec<KeywordEntity>, ClassifierError> {
            if text.contains("<fail>") {
                return Err(ClassifierError::InvalidOutput("boom".to_string()));
            }
            Ok(text
                .split_whitespace()
                .filter(|t| t.starts_with('#'))
                .map(|t| KeywordEntity {
                    word: t.to_string(),
                    entity_group: "KEY".to_string(),
                    score: 0.99,
                })
                .collect())
        }
    }

    fn batch(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn empty_batch_returns_empty_mapping() {
        let result = aggregate_keywords(&HashtagExtractor, &[]).await.unwrap();
        assert!(result.keywords.is_empty());
    }

    #[tokio::test]
    async fn counts_accumulate_across_comments() {
        let comments = batch(&["#rust is #fast", "#rust again", "no tags here"]);
        let result = aggregate_keywords(&HashtagExtractor, &comments).await.unwrap();
        assert_eq!(result.keywords.get("#rust"), Some(&2));
        assert_eq!(result.keywords.get("#fast"), Some(&1));
        assert_eq!(result.keywords.len(), 2);
    }

    #[tokio::test]
    async fn repeated_entity_in_one_comment_counts_each_occurrence() {
        let comments = batch(&["#go #go #go"]);
        let result = aggregate_keywords(&HashtagExtractor, &comments).await.unwrap();
        assert_eq!(result.keywords.get("#go"), Some(&3));
    }

    #[tokio::test]
    async fn surface_forms_are_not_normalized() {
        let comments = batch(&["#Rust", "#rust"]);
        let result = aggregate_keywords(&HashtagExtractor, &comments).await.unwrap();
        assert_eq!(result.keywords.get("#Rust"), Some(&1));
        assert_eq!(result.keywords.get("#rust"), Some(&1));
    }

    #[tokio::test]
    async fn classifier_error_propagates() {
        let comments = batch(&["#ok", "<fail>"]);
        let result = aggregate_keywords(&HashtagExtractor, &comments).await;
        assert!(matches!(result, Err(ClassifierError::InvalidOutput(_))));
    }

    #[test]
    fn serializes_under_keywords_key() {
        let mut frequencies = KeywordFrequencies::default();
        frequencies.record("music".to_string());
        let json = serde_json::to_value(&frequencies).expect("serialize");
        assert_eq!(json, serde_json::json!({ "keywords": { "music": 1 } }));
    }
}
