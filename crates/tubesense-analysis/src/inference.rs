//! HTTP client for Hugging Face-style inference endpoints.
//!
//! Works against the hosted Inference API and self-hosted servers that speak
//! the same `{"inputs": ..., "parameters": ...}` protocol. Each model gets its
//! own [`InferenceClient`]; the `Hf*Model` wrappers turn raw model output into
//! the scalar each classifier trait promises.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::classifier::{KeywordEntity, KeywordExtractor, SentimentClassifier, ToxicityClassifier};
use crate::error::ClassifierError;

/// Inference HTTP client bound to one model URL.
pub struct InferenceClient {
    client: reqwest::Client,
    url: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<InferenceParameters>,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceParameters {
    aggregation_strategy: &'static str,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Text-classification output comes back either flat or wrapped once per input.
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelScores {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl LabelScores {
    fn into_flat(self) -> Vec<LabelScore> {
        match self {
            Self::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            Self::Flat(scores) => scores,
        }
    }
}

impl InferenceClient {
    /// Create a new `InferenceClient` for the model served at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        url: &str,
        api_token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
            api_token: api_token.map(str::to_owned),
        })
    }

    /// Runs token classification with grouped entities (`aggregation_strategy=simple`).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the request fails, the endpoint answers
    /// non-2xx, or the body is not a list of entities.
    pub async fn token_classification(
        &self,
        text: &str,
    ) -> Result<Vec<KeywordEntity>, ClassifierError> {
        let request = InferenceRequest {
            inputs: text,
            parameters: Some(InferenceParameters {
                aggregation_strategy: "simple",
            }),
            options: InferenceOptions {
                wait_for_model: true,
            },
        };
        let body = self.post(&request).await?;
        serde_json::from_str(&body).map_err(ClassifierError::Deserialize)
    }

    /// Runs sequence classification and returns every `(label, score)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the request fails, the endpoint answers
    /// non-2xx, or the body is not a label/score list.
    pub async fn text_classification(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let request = InferenceRequest {
            inputs: text,
            parameters: None,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };
        let body = self.post(&request).await?;
        let scores: LabelScores = serde_json::from_str(&body).map_err(ClassifierError::Deserialize)?;
        Ok(scores.into_flat())
    }

    async fn post(&self, request: &InferenceRequest<'_>) -> Result<String, ClassifierError> {
        let mut builder = self.client.post(&self.url).json(request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Keyword extractor backed by a token-classification model.
pub struct HfKeywordModel {
    client: InferenceClient,
}

impl HfKeywordModel {
    #[must_use]
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeywordExtractor for HfKeywordModel {
    async fn extract(&self, text: &str) -> Result<Vec<KeywordEntity>, ClassifierError> {
        self.client.token_classification(text).await
    }
}

/// Star-rating classifier backed by a five-label sequence-classification model.
pub struct HfSentimentModel {
    client: InferenceClient,
}

impl HfSentimentModel {
    #[must_use]
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SentimentClassifier for HfSentimentModel {
    async fn score(&self, text: &str) -> Result<u8, ClassifierError> {
        let scores = self.client.text_classification(text).await?;
        stars_from_scores(&scores)
    }
}

/// Toxicity classifier backed by a two-label sequence-classification model.
pub struct HfToxicityModel {
    client: InferenceClient,
    toxic_label: String,
}

impl HfToxicityModel {
    /// `toxic_label` names the class whose probability is the toxicity score.
    #[must_use]
    pub fn new(client: InferenceClient, toxic_label: &str) -> Self {
        Self {
            client,
            toxic_label: toxic_label.to_owned(),
        }
    }
}

#[async_trait]
impl ToxicityClassifier for HfToxicityModel {
    async fn score(&self, text: &str) -> Result<f64, ClassifierError> {
        let scores = self.client.text_classification(text).await?;
        toxic_probability(&scores, &self.toxic_label)
    }
}

/// Picks the top-scoring label and reads its star rating.
fn stars_from_scores(scores: &[LabelScore]) -> Result<u8, ClassifierError> {
    let top = scores
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| ClassifierError::InvalidOutput("no sentiment labels returned".to_string()))?;

    match parse_star_label(&top.label) {
        Some(stars) if (1..=5).contains(&stars) => Ok(stars),
        _ => Err(ClassifierError::InvalidOutput(format!(
            "sentiment label '{}' is not a 1-5 star rating",
            top.label
        ))),
    }
}

/// `"4 stars"` → 4, `"1 star"` → 1, `"LABEL_3"` → 4 (zero-based class index).
fn parse_star_label(label: &str) -> Option<u8> {
    if let Some(index) = label.strip_prefix("LABEL_") {
        return index.parse::<u8>().ok()?.checked_add(1);
    }
    let digits: String = label
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Probability of `toxic_label`. Endpoints that return only the top label
/// (`top_k = 1`) for a two-class model answer with the other class alone; its
/// complement is the toxic probability.
fn toxic_probability(scores: &[LabelScore], toxic_label: &str) -> Result<f64, ClassifierError> {
    let score = match scores
        .iter()
        .find(|s| s.label.eq_ignore_ascii_case(toxic_label))
    {
        Some(toxic) => toxic.score,
        None => match scores {
            [other] => 1.0 - other.score,
            _ => {
                return Err(ClassifierError::InvalidOutput(format!(
                    "label '{toxic_label}' missing from output"
                )))
            }
        },
    };

    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(ClassifierError::InvalidOutput(format!(
            "toxicity probability {score} outside [0, 1]"
        )));
    }
    Ok(score)
}
