//! News items and their comment threads.
//!
//! # Invariants
//! - News items are created through seeding paths only.
//! - A comment's `news_id` and `author` never change after creation.

use crate::model::identity::UserId;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub type NewsId = Uuid;
pub type CommentId = Uuid;

/// Published news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub text: String,
    /// Unix epoch milliseconds. Home page ordering key (newest first).
    pub published_at: i64,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, text: impl Into<String>, published_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text: text.into(),
            published_at,
        }
    }
}

/// Comment attached to one news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub news_id: NewsId,
    pub author: UserId,
    pub text: String,
    /// Unix epoch milliseconds. Thread ordering key (oldest first).
    pub created_at: i64,
}

impl Comment {
    /// Creates a comment stamped with the current time.
    pub fn new(news_id: NewsId, author: UserId, text: impl Into<String>) -> Self {
        Self::with_created_at(news_id, author, text, now_epoch_ms())
    }

    /// Creates a comment with a caller-provided creation time.
    ///
    /// Used by seeding paths that backfill threads.
    pub fn with_created_at(
        news_id: NewsId,
        author: UserId,
        text: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            news_id,
            author,
            text: text.into(),
            created_at,
        }
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
