//! Core use-case services.
//!
//! # Responsibility
//! - Run the ownership guard, then validation, then the store, per call.
//! - Map every outcome onto the shared `ServiceError` taxonomy.
//!
//! # Invariants
//! - Gated calls from anonymous identities are answered with a login
//!   redirect before any private lookup, so slugs and ids cannot be probed.
//! - Foreign and missing resources both surface as `ServiceError::NotFound`.

pub mod news_service;
pub mod note_service;

use crate::access::{authorize, AccessDecision, Operation, Resource};
use crate::filter::ContentRejected;
use crate::model::identity::{Identity, UserId};
use crate::repo::RepoError;
use crate::routes::LoginRedirect;
use crate::slug::{SlugError, DUPLICATE_SLUG_WARNING};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Use-case error shared by note and news services.
#[derive(Debug)]
pub enum ServiceError {
    /// Slug already used by another note; field-level, retry with another.
    DuplicateSlug(String),
    /// Explicit slug is malformed or the title yields no slug.
    Slug(SlugError),
    /// Comment text contains a banned word; field-level, edit and retry.
    ContentRejected(ContentRejected),
    /// Missing, or owned by someone else. Deliberately indistinguishable.
    NotFound,
    /// Anonymous caller; redirect to login and resume at `next`.
    AuthenticationRequired(LoginRedirect),
    /// Required form field is blank.
    InvalidInput { field: &'static str },
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateSlug(slug) => write!(f, "{slug}{DUPLICATE_SLUG_WARNING}"),
            Self::Slug(err) => write!(f, "{err}"),
            Self::ContentRejected(err) => write!(f, "{err}"),
            Self::NotFound => write!(f, "not found"),
            Self::AuthenticationRequired(redirect) => {
                write!(f, "authentication required: {}", redirect.location())
            }
            Self::InvalidInput { field } => write!(f, "field `{field}` must not be blank"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Slug(err) => Some(err),
            Self::ContentRejected(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
            RepoError::NotFound(_) => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

impl From<SlugError> for ServiceError {
    fn from(value: SlugError) -> Self {
        match value {
            SlugError::Duplicate(slug) => Self::DuplicateSlug(slug),
            other => Self::Slug(other),
        }
    }
}

impl From<ContentRejected> for ServiceError {
    fn from(value: ContentRejected) -> Self {
        Self::ContentRejected(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Login gate shared by services: returns the caller's user id or a
/// redirect that resumes at `requested_path`.
pub(crate) fn require_login(
    identity: &Identity,
    login_path: &str,
    requested_path: &str,
) -> ServiceResult<UserId> {
    identity.user_id().ok_or_else(|| {
        info!("event=access_check module=service status=denied decision=auth_required");
        ServiceError::AuthenticationRequired(LoginRedirect::new(login_path, requested_path))
    })
}

/// Runs the ownership guard and converts refusals into service errors.
pub(crate) fn enforce(
    identity: &Identity,
    resource: Resource<'_>,
    operation: Operation,
    login_path: &str,
    requested_path: &str,
) -> ServiceResult<()> {
    let decision = authorize(identity, resource, operation);
    match decision {
        AccessDecision::Allowed => Ok(()),
        AccessDecision::NotFound => {
            info!(
                "event=access_check module=service status=denied decision={} operation={}",
                decision.as_str(),
                operation.as_str()
            );
            Err(ServiceError::NotFound)
        }
        AccessDecision::AuthRequired => Err(ServiceError::AuthenticationRequired(
            LoginRedirect::new(login_path, requested_path),
        )),
    }
}

fn require_non_blank(value: &str, field: &'static str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput { field });
    }
    Ok(())
}
