//! Comment retrieval for the `YouTube` Data API v3.
//!
//! Wraps the `commentThreads.list` endpoint and drives page-token pagination
//! up to a fixed page ceiling, returning the plain-text body of each top-level
//! comment in API order.

pub mod client;
pub mod error;
pub mod types;

pub use client::{YoutubeClient, DEFAULT_MAX_RESULTS, MAX_PAGES, PAGE_SIZE_MAX};
pub use error::YoutubeError;
pub use types::{CommentThread, CommentThreadListResponse};
