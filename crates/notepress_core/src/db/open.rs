//! Connection bootstrap.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`, so deleting a news item
//!   cascades to its comments and notes cannot reference unknown authors.
//! - Returned connections are at the latest schema version.

use super::migrations::apply_migrations;
use super::{DbError, DbResult, DbTarget};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) a SQLite file and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with(DbTarget::File(path.to_path_buf()), || Connection::open(path))
}

/// Opens an isolated in-memory database and migrates it.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(DbTarget::Memory, Connection::open_in_memory)
}

fn open_with(
    target: DbTarget,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = connect()
        .map_err(|source| DbError::Open {
            target: target.clone(),
            source,
        })
        .and_then(|mut conn| bootstrap(&mut conn, &target).map(|()| conn));

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} duration_ms={duration_ms}",
            target.mode()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={duration_ms} error_code={} error={err}",
            target.mode(),
            err.error_code()
        ),
    }
    result
}

fn bootstrap(conn: &mut Connection, target: &DbTarget) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .and_then(|()| conn.busy_timeout(BUSY_TIMEOUT))
        .map_err(|source| DbError::Configure {
            target: target.clone(),
            source,
        })?;
    apply_migrations(conn)
}
