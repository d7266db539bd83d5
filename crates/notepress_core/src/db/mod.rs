//! SQLite bootstrap for the notes and news store.
//!
//! `open_db` and `open_db_in_memory` hand out connections with foreign keys
//! enforced and the schema at [`migrations::latest_version`]. Repositories
//! refuse connections that did not come through here.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage a connection was opened against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    File(PathBuf),
    Memory,
}

impl DbTarget {
    /// Short label used in `db_open` events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

impl Display for DbTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "`{}`", path.display()),
            Self::Memory => f.write_str("in-memory database"),
        }
    }
}

/// Storage failures, split by the bootstrap stage they happened in.
#[derive(Debug)]
pub enum DbError {
    /// SQLite could not open the target.
    Open {
        target: DbTarget,
        source: rusqlite::Error,
    },
    /// Connection pragmas (foreign keys, busy timeout) were not applied.
    Configure {
        target: DbTarget,
        source: rusqlite::Error,
    },
    /// A pending migration failed and was rolled back; the schema stays at
    /// `from_version`.
    Migrate {
        from_version: u32,
        to_version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Statement failure on an already bootstrapped connection.
    Query(rusqlite::Error),
}

impl DbError {
    /// Stable code written to `error_code=` in storage events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Open { .. } => "db_open_failed",
            Self::Configure { .. } => "db_configure_failed",
            Self::Migrate { .. } => "db_migrate_failed",
            Self::UnsupportedSchemaVersion { .. } => "db_schema_unsupported",
            Self::Query(_) => "db_query_failed",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => write!(f, "cannot open {target}: {source}"),
            Self::Configure { target, source } => {
                write!(f, "cannot configure {target}: {source}")
            }
            Self::Migrate {
                from_version,
                to_version,
                source,
            } => write!(
                f,
                "migration {from_version} -> {to_version} failed and was rolled back: {source}"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "schema version {db_version} is newer than this build supports ({latest_supported})"
            ),
            Self::Query(source) => write!(f, "{source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. }
            | Self::Configure { source, .. }
            | Self::Migrate { source, .. }
            | Self::Query(source) => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}
