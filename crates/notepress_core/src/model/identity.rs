//! Acting principal for every use-case call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a registered user.
pub type UserId = Uuid;

/// Registered user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name, unique across users.
    pub username: String,
}

impl User {
    /// Creates a user with a generated stable ID.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
        }
    }
}

/// Identity attached to an incoming request.
///
/// Either nobody is logged in, or a registered user is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(User),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// Returns the user id for authenticated identities.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user.id),
        }
    }

    /// Returns whether this identity authored a record owned by `author`.
    ///
    /// Anonymous identities own nothing.
    pub fn owns(&self, author: UserId) -> bool {
        self.user_id() == Some(author)
    }
}

impl From<User> for Identity {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}
