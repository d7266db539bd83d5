//! Core domain logic for the notepress notes and news applications.
//! This crate is the single source of truth for business invariants.

pub mod access;
pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod routes;
pub mod service;
pub mod slug;

pub use access::{authorize, can_access, AccessDecision, Operation, Resource};
pub use config::{ConfigError, CoreConfig};
pub use filter::{check_text, BannedWords, ContentRejected, CONTENT_WARNING};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingConfig};
pub use model::identity::{Identity, User, UserId};
pub use model::news::{Comment, CommentId, NewsId, NewsItem};
pub use model::note::{Note, NoteDraft, NoteId};
pub use repo::news_repo::{NewsRepository, SqliteNewsRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use routes::LoginRedirect;
pub use service::news_service::{CommentOutcome, NewsDetail, NewsService};
pub use service::note_service::NoteService;
pub use service::{ServiceError, ServiceResult};
pub use slug::{allocate_slug, slugify, SlugError, SlugLookup};

/// Minimal health-check API for smoke probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
