//! Response shapes for `commentThreads.list`.
//!
//! Only the fields the comment pipeline reads are modelled; everything else in
//! the API payload is ignored by serde.

use serde::Deserialize;

/// One page of comment threads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    /// Continuation cursor; absent on the last page.
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    /// Comment body. Plain text when the request asks for `textFormat=plainText`.
    #[serde(default)]
    pub text_display: String,
}

impl CommentThread {
    /// Consumes the thread and returns its top-level comment text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.snippet.top_level_comment.snippet.text_display
    }
}

/// Google API error envelope: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorEnvelope {
    pub(crate) error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorBody {
    #[serde(default)]
    pub(crate) message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_page_with_next_token() {
        let body = serde_json::json!({
            "kind": "youtube#commentThreadListResponse",
            "nextPageToken": "QURTSl9p",
            "pageInfo": { "totalResults": 1, "resultsPerPage": 100 },
            "items": [{
                "kind": "youtube#commentThread",
                "id": "Ugx1",
                "snippet": {
                    "videoId": "dQw4w9WgXcQ",
                    "topLevelComment": {
                        "kind": "youtube#comment",
                        "id": "Ugx1",
                        "snippet": {
                            "textDisplay": "never gonna give you up",
                            "textOriginal": "never gonna give you up",
                            "likeCount": 3
                        }
                    },
                    "totalReplyCount": 0
                }
            }]
        });
        let page: CommentThreadListResponse = serde_json::from_value(body).expect("parse");
        assert_eq!(page.next_page_token.as_deref(), Some("QURTSl9p"));
        let texts: Vec<String> = page.items.into_iter().map(CommentThread::into_text).collect();
        assert_eq!(texts, vec!["never gonna give you up".to_string()]);
    }

    #[test]
    fn missing_items_and_token_default_to_empty_last_page() {
        let page: CommentThreadListResponse =
            serde_json::from_value(serde_json::json!({ "kind": "youtube#commentThreadListResponse" }))
                .expect("parse");
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn google_error_envelope_parses_message() {
        let envelope: GoogleErrorEnvelope = serde_json::from_value(serde_json::json!({
            "error": { "code": 403, "message": "The request cannot be completed because you have exceeded your quota." }
        }))
        .expect("parse");
        assert!(envelope.error.message.contains("quota"));
    }
}
