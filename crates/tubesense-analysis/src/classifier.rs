//! Classifier collaborators.
//!
//! One trait per analysis kind. Implementations are created once at startup
//! and shared read-only across requests, so they must be `Send + Sync`.
//! Backends that are not safe to call concurrently can be wrapped in
//! [`Limited`].

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::error::ClassifierError;

/// A grouped entity span returned by a token-classification model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordEntity {
    /// Surface text of the span, exactly as the model returned it.
    pub word: String,
    #[serde(default, alias = "entity")]
    pub entity_group: String,
    #[serde(default)]
    pub score: f64,
}

#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Extracts grouped keyword spans from `text`.
    async fn extract(&self, text: &str) -> Result<Vec<KeywordEntity>, ClassifierError>;
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Returns a star rating in `1..=5`.
    async fn score(&self, text: &str) -> Result<u8, ClassifierError>;
}

#[async_trait]
pub trait ToxicityClassifier: Send + Sync {
    /// Returns the probability in `[0, 1]` that `text` is toxic.
    async fn score(&self, text: &str) -> Result<f64, ClassifierError>;
}

/// Caps the number of in-flight calls to the wrapped classifier.
///
/// With `max_in_flight == 1` calls are fully serialized, which is the safe
/// setting for a backend whose reentrancy is unknown.
pub struct Limited<C> {
    inner: C,
    permits: Semaphore,
}

impl<C> Limited<C> {
    /// Wraps `inner`. A `max_in_flight` of zero is treated as one.
    #[must_use]
    pub fn new(inner: C, max_in_flight: usize) -> Self {
        Self {
            inner,
            permits: Semaphore::new(max_in_flight.max(1)),
        }
    }

    async fn permit(&self) -> SemaphorePermit<'_> {
        // `permits` is private and never closed, so acquire cannot fail.
        self.permits
            .acquire()
            .await
            .expect("classifier semaphore is never closed")
    }
}

#[async_trait]
impl<C: KeywordExtractor> KeywordExtractor for Limited<C> {
    async fn extract(&self, text: &str) -> Result<Vec<KeywordEntity>, ClassifierError> {
        let _permit = self.permit().await;
        self.inner.extract(text).await
    }
}

#[async_trait]
impl<C: SentimentClassifier> SentimentClassifier for Limited<C> {
    async fn score(&self, text: &str) -> Result<u8, ClassifierError> {
        let _permit = self.permit().await;
        self.inner.score(text).await
    }
}

#[async_trait]
impl<C: ToxicityClassifier> ToxicityClassifier for Limited<C> {
    async fn score(&self, text: &str) -> Result<f64, ClassifierError> {
        let _permit = self.permit().await;
        self.inner.score(text).await
    }
}
