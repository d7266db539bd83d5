//! Path vocabulary shared with the web layer.
//!
//! The core never dispatches requests; it only names the paths that
//! redirect directives point at.

use crate::model::news::{CommentId, NewsId};
use std::fmt::{Display, Formatter};

/// Default authentication entry point.
pub const LOGIN_PATH: &str = "/auth/login/";
/// Fragment appended to news detail paths after comment actions.
pub const COMMENTS_ANCHOR: &str = "#comments";

pub const NOTES_ADD_PATH: &str = "/add/";
pub const NOTES_LIST_PATH: &str = "/notes/";
pub const NOTES_SUCCESS_PATH: &str = "/done/";
pub const NEWS_HOME_PATH: &str = "/";

pub fn note_detail_path(slug: &str) -> String {
    format!("/note/{slug}/")
}

pub fn note_edit_path(slug: &str) -> String {
    format!("/edit/{slug}/")
}

pub fn note_delete_path(slug: &str) -> String {
    format!("/delete/{slug}/")
}

pub fn news_detail_path(news_id: NewsId) -> String {
    format!("/news/{news_id}/")
}

pub fn comment_edit_path(comment_id: CommentId) -> String {
    format!("/edit_comment/{comment_id}/")
}

pub fn comment_delete_path(comment_id: CommentId) -> String {
    format!("/delete_comment/{comment_id}/")
}

/// Where the author lands after a comment is added, edited or deleted.
pub fn news_comments_path(news_id: NewsId) -> String {
    format!("{}{COMMENTS_ANCHOR}", news_detail_path(news_id))
}

/// Redirect directive for anonymous access to a gated operation.
///
/// Carries the originally requested path so the flow can resume after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub login_path: String,
    pub next: String,
}

impl LoginRedirect {
    pub fn new(login_path: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            next: next.into(),
        }
    }

    /// Rendered `Location` value: `{login_path}?next={next}`.
    pub fn location(&self) -> String {
        format!("{}?next={}", self.login_path, self.next)
    }
}

impl Display for LoginRedirect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}?next={}", self.login_path, self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::{news_comments_path, note_edit_path, LoginRedirect, LOGIN_PATH};
    use uuid::Uuid;

    #[test]
    fn login_redirect_preserves_requested_path() {
        let redirect = LoginRedirect::new(LOGIN_PATH, note_edit_path("new-note"));
        assert_eq!(redirect.location(), "/auth/login/?next=/edit/new-note/");
        assert_eq!(redirect.to_string(), redirect.location());
    }

    #[test]
    fn comments_path_targets_anchor() {
        let id = Uuid::nil();
        assert_eq!(
            news_comments_path(id),
            "/news/00000000-0000-0000-0000-000000000000/#comments"
        );
    }
}
