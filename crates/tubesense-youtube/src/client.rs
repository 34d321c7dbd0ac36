//! HTTP client for `commentThreads.list`.
//!
//! Wraps `reqwest` with API-key handling, Google error-envelope decoding, and
//! the bounded pagination loop used by every analysis pipeline.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::YoutubeError;
use crate::types::{CommentThread, CommentThreadListResponse, GoogleErrorEnvelope};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Largest `maxResults` the API accepts for a single page.
pub const PAGE_SIZE_MAX: usize = 100;

/// Page-request ceiling per fetch, independent of the requested budget.
/// Bounds API quota spent on a single analysis.
pub const MAX_PAGES: usize = 5;

/// Default comment budget for one analysis.
pub const DEFAULT_MAX_RESULTS: usize = 500;

/// Client for the `YouTube` Data API v3 comment endpoints.
///
/// Holds no per-call state, so one instance can serve any number of
/// concurrent fetches. Use [`YoutubeClient::with_base_url`] to point at a
/// mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`YoutubeError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends the resource name
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches up to `max_results` top-level comment texts for `video_id`.
    ///
    /// Starts without a page token and follows `nextPageToken` until one of:
    /// - `max_results` comments have been collected (the last page is cut at
    ///   the exact limit),
    /// - the API returns no continuation token,
    /// - [`MAX_PAGES`] requests have been issued.
    ///
    /// Each request asks for at most [`PAGE_SIZE_MAX`] items, fewer when the
    /// remaining budget is smaller.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::EmptyVideoId`] if `video_id` is blank (no request is sent).
    /// - Any error from [`Self::fetch_comment_page`]; comments gathered from
    ///   earlier pages are discarded.
    pub async fn fetch_comments(
        &self,
        video_id: &str,
        max_results: usize,
    ) -> Result<Vec<String>, YoutubeError> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(YoutubeError::EmptyVideoId);
        }

        let mut comments: Vec<String> =
            Vec::with_capacity(max_results.min(PAGE_SIZE_MAX * MAX_PAGES));
        let mut page_token: Option<String> = None;

        for page in 1..=MAX_PAGES {
            let remaining = max_results.saturating_sub(comments.len());
            if remaining == 0 {
                break;
            }

            let response = self
                .fetch_comment_page(video_id, remaining.min(PAGE_SIZE_MAX), page_token.as_deref())
                .await?;

            let before = comments.len();
            comments.extend(
                response
                    .items
                    .into_iter()
                    .take(remaining)
                    .map(CommentThread::into_text),
            );
            tracing::debug!(
                video_id,
                page,
                count = comments.len() - before,
                total = comments.len(),
                "fetched comment page"
            );

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(comments)
    }

    /// Fetches a single page of comment threads.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Api`] on a non-2xx status (invalid video id, quota
    ///   exceeded, comments disabled, bad key).
    /// - [`YoutubeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn fetch_comment_page(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, YoutubeError> {
        let url = self.build_url(video_id, page_size, page_token);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GoogleErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: format!("commentThreads(videoId={video_id})"),
            source: e,
        })
    }

    /// Builds the `commentThreads` URL with percent-encoded query parameters.
    fn build_url(&self, video_id: &str, page_size: usize, page_token: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}commentThreads", self.base_url.path()));
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("part", "snippet");
            pairs.append_pair("videoId", video_id);
            pairs.append_pair("textFormat", "plainText");
            pairs.append_pair("maxResults", &page_size.to_string());
            if let Some(token) = page_token {
                pairs.append_pair("pageToken", token);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
