//! Note repository contract and SQLite implementation.
//!
//! # Invariants
//! - `notes.slug` is unique; the constraint is the atomic check-and-insert
//!   that settles concurrent submissions of the same slug.
//! - `update_note` rewrites title, text and slug only; `author_uuid` is
//!   never part of an update statement.
//! - Author listings are ordered by insertion.

use crate::model::identity::UserId;
use crate::model::note::{Note, NoteId};
use crate::repo::{
    ensure_schema_ready, is_foreign_key_violation, is_unique_violation, parse_uuid, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const NOTE_SELECT_SQL: &str = "SELECT uuid, title, text, slug, author_uuid FROM notes";

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Inserts one note. Fails with `DuplicateSlug` on slug collision.
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title, text and slug. Fails with `DuplicateSlug` on collision.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    fn find_note_by_id(&self, id: NoteId) -> RepoResult<Option<Note>>;
    fn find_note_by_slug(&self, slug: &str) -> RepoResult<Option<Note>>;
    fn list_notes_by_author(&self, author: UserId) -> RepoResult<Vec<Note>>;
    /// Returns whether `slug` is used by any note other than `exclude`.
    fn slug_exists(&self, slug: &str, exclude: Option<NoteId>) -> RepoResult<bool>;
    fn count_notes(&self) -> RepoResult<u64>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId> {
        self.conn
            .execute(
                "INSERT INTO notes (uuid, title, text, slug, author_uuid)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.text.as_str(),
                    note.slug.as_str(),
                    note.author.to_string(),
                ],
            )
            .map_err(|err| map_write_error(err, note))?;
        Ok(note.id)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes
                 SET title = ?2, text = ?3, slug = ?4
                 WHERE uuid = ?1;",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.text.as_str(),
                    note.slug.as_str(),
                ],
            )
            .map_err(|err| map_write_error(err, note))?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn find_note_by_id(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.conn
            .query_row(
                &format!("{NOTE_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                read_note_columns,
            )
            .optional()?
            .map(into_note)
            .transpose()
    }

    fn find_note_by_slug(&self, slug: &str) -> RepoResult<Option<Note>> {
        self.conn
            .query_row(
                &format!("{NOTE_SELECT_SQL} WHERE slug = ?1;"),
                [slug],
                read_note_columns,
            )
            .optional()?
            .map(into_note)
            .transpose()
    }

    fn list_notes_by_author(&self, author: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} WHERE author_uuid = ?1 ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([author.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(into_note(read_note_columns(row)?)?);
        }
        Ok(notes)
    }

    fn slug_exists(&self, slug: &str, exclude: Option<NoteId>) -> RepoResult<bool> {
        let exclude = exclude.map(|id| id.to_string());
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM notes
                WHERE slug = ?1
                  AND (?2 IS NULL OR uuid <> ?2)
            );",
            params![slug, exclude],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative count {count}")))
    }
}

type NoteColumns = (String, String, String, String, String);

fn read_note_columns(row: &Row<'_>) -> rusqlite::Result<NoteColumns> {
    Ok((
        row.get("uuid")?,
        row.get("title")?,
        row.get("text")?,
        row.get("slug")?,
        row.get("author_uuid")?,
    ))
}

fn into_note((uuid, title, text, slug, author): NoteColumns) -> RepoResult<Note> {
    Ok(Note {
        id: parse_uuid(&uuid, "notes.uuid")?,
        title,
        text,
        slug,
        author: parse_uuid(&author, "notes.author_uuid")?,
    })
}

fn map_write_error(err: rusqlite::Error, note: &Note) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::DuplicateSlug(note.slug.clone())
    } else if is_foreign_key_violation(&err) {
        RepoError::NotFound(note.author)
    } else {
        err.into()
    }
}
