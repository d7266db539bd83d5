//! Ownership guard for notes, news and comments.
//!
//! # Responsibility
//! - Decide whether an identity may perform an operation on a resource.
//! - Express every refusal as either "authenticate first" or "not found".
//!
//! # Invariants
//! - Foreign notes and comments are reported as `NotFound`, never as a
//!   distinct "forbidden" outcome, so their existence is not revealed.
//! - The guard is pure: no storage access, no logging, no side effects.
//! - News items are read-only to every identity.

use crate::model::identity::Identity;
use crate::model::news::{Comment, NewsItem};
use crate::model::note::Note;

/// Operation requested on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ReadList,
    ReadDetail,
    Create,
    Edit,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadList => "read_list",
            Self::ReadDetail => "read_detail",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// Resource an operation targets.
///
/// Collections stand in for "no particular record": listing notes, adding a
/// note, or viewing the news feed. Creating a comment targets its news item.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    NoteCollection,
    Note(&'a Note),
    NewsFeed,
    NewsItem(&'a NewsItem),
    Comment(&'a Comment),
}

/// Outcome of the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    /// Refused; the caller must answer as if the resource did not exist.
    NotFound,
    /// Anonymous caller must log in first.
    AuthRequired,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::NotFound => "not_found",
            Self::AuthRequired => "auth_required",
        }
    }
}

/// Boolean form of [`authorize`].
pub fn can_access(identity: &Identity, resource: Resource<'_>, operation: Operation) -> bool {
    authorize(identity, resource, operation).is_allowed()
}

/// Decides whether `identity` may run `operation` on `resource`.
pub fn authorize(
    identity: &Identity,
    resource: Resource<'_>,
    operation: Operation,
) -> AccessDecision {
    match resource {
        Resource::NewsFeed => match operation {
            Operation::ReadList | Operation::ReadDetail => AccessDecision::Allowed,
            _ => AccessDecision::NotFound,
        },
        Resource::NewsItem(_) => match operation {
            Operation::ReadList | Operation::ReadDetail => AccessDecision::Allowed,
            Operation::Create => require_login(identity),
            Operation::Edit | Operation::Delete => AccessDecision::NotFound,
        },
        Resource::NoteCollection => {
            if !identity.is_authenticated() {
                return AccessDecision::AuthRequired;
            }
            match operation {
                Operation::ReadList | Operation::Create => AccessDecision::Allowed,
                _ => AccessDecision::NotFound,
            }
        }
        Resource::Note(note) => {
            if !identity.is_authenticated() {
                return AccessDecision::AuthRequired;
            }
            match operation {
                Operation::Create => AccessDecision::NotFound,
                _ => owner_only(identity.owns(note.author)),
            }
        }
        Resource::Comment(comment) => match operation {
            Operation::ReadList => AccessDecision::Allowed,
            Operation::Create => AccessDecision::NotFound,
            Operation::ReadDetail | Operation::Edit | Operation::Delete => {
                if !identity.is_authenticated() {
                    return AccessDecision::AuthRequired;
                }
                owner_only(identity.owns(comment.author))
            }
        },
    }
}

fn require_login(identity: &Identity) -> AccessDecision {
    if identity.is_authenticated() {
        AccessDecision::Allowed
    } else {
        AccessDecision::AuthRequired
    }
}

fn owner_only(is_owner: bool) -> AccessDecision {
    if is_owner {
        AccessDecision::Allowed
    } else {
        AccessDecision::NotFound
    }
}
