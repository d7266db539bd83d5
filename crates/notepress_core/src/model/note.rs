//! Personal note model.
//!
//! # Invariants
//! - `slug` is unique across all notes; the store enforces it.
//! - `author` never changes after creation.

use crate::model::identity::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    /// URL-safe identifier used in note routes.
    pub slug: String,
    pub author: UserId,
}

impl Note {
    /// Creates a note with a generated stable ID.
    ///
    /// The slug is expected to be allocated already.
    pub fn new(
        author: UserId,
        title: impl Into<String>,
        text: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
            author,
        }
    }
}

/// Form input for note create and edit.
///
/// An empty `slug` asks the allocator to derive one from `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
        }
    }
}
