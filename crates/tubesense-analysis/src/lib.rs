//! Comment analysis pipelines for tubesense.
//!
//! Fetches a video's comments, sends each one through a classifier, and folds
//! the per-comment results into a summary: keyword frequencies, sentiment
//! bucket percentages, or toxicity bucket percentages. Classifiers are opaque
//! collaborators behind traits; [`inference`] provides the HTTP-backed ones.

pub mod buckets;
pub mod classifier;
pub mod error;
pub mod inference;
pub mod keywords;
pub mod pipeline;
pub mod sentiment;
pub mod toxicity;

pub use buckets::{SentimentBucket, ToxicityBucket, TOXIC_THRESHOLD};
pub use classifier::{KeywordEntity, KeywordExtractor, Limited, SentimentClassifier, ToxicityClassifier};
pub use error::{AnalysisError, ClassifierError};
pub use inference::{HfKeywordModel, HfSentimentModel, HfToxicityModel, InferenceClient};
pub use keywords::{aggregate_keywords, KeywordFrequencies};
pub use pipeline::{Analyzer, Classifiers};
pub use sentiment::{aggregate_sentiment, SentimentSummary, SentimentTally};
pub use toxicity::{aggregate_toxicity, check_comment, ToxicityCheck, ToxicitySummary, ToxicityTally};
