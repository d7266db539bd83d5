//! User registry backing note and comment authorship.

use crate::model::identity::{User, UserId};
use crate::repo::{ensure_schema_ready, is_unique_violation, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for registered users.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        self.conn
            .execute(
                "INSERT INTO users (uuid, username) VALUES (?1, ?2);",
                params![user.id.to_string(), user.username.as_str()],
            )
            .map_err(|err| {
                if is_unique_violation(&err) {
                    RepoError::DuplicateUsername(user.username.clone())
                } else {
                    err.into()
                }
            })?;
        Ok(user.id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.conn
            .query_row(
                "SELECT uuid, username FROM users WHERE uuid = ?1;",
                [id.to_string()],
                read_user_columns,
            )
            .optional()?
            .map(into_user)
            .transpose()
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.conn
            .query_row(
                "SELECT uuid, username FROM users WHERE username = ?1;",
                [username],
                read_user_columns,
            )
            .optional()?
            .map(into_user)
            .transpose()
    }
}

fn read_user_columns(row: &Row<'_>) -> rusqlite::Result<(String, String)> {
    Ok((row.get("uuid")?, row.get("username")?))
}

fn into_user((uuid, username): (String, String)) -> RepoResult<User> {
    Ok(User {
        id: parse_uuid(&uuid, "users.uuid")?,
        username,
    })
}
