//! News and comment repository contract and SQLite implementation.
//!
//! # Invariants
//! - Home listing is ordered by `published_at DESC` and always capped.
//! - Comment threads are ordered by `created_at ASC`, ties by insertion.
//! - `update_comment_text` touches `text` only; news and author never move.

use crate::model::news::{Comment, CommentId, NewsId, NewsItem};
use crate::repo::{ensure_schema_ready, is_foreign_key_violation, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const NEWS_SELECT_SQL: &str = "SELECT uuid, title, text, published_at FROM news";
const COMMENT_SELECT_SQL: &str =
    "SELECT uuid, news_uuid, author_uuid, text, created_at FROM comments";

/// Repository interface for news items and their comments.
pub trait NewsRepository {
    /// Seeds one news item. Ordinary identities never reach this path.
    fn insert_news(&self, news: &NewsItem) -> RepoResult<NewsId>;
    fn find_news_by_id(&self, id: NewsId) -> RepoResult<Option<NewsItem>>;
    /// Newest-first listing, at most `limit` rows.
    fn list_latest_news(&self, limit: u32) -> RepoResult<Vec<NewsItem>>;
    fn count_news(&self) -> RepoResult<u64>;

    /// Inserts one comment. Fails with `NotFound(news_id)` for unknown news.
    fn insert_comment(&self, comment: &Comment) -> RepoResult<CommentId>;
    fn update_comment_text(&self, id: CommentId, text: &str) -> RepoResult<()>;
    fn delete_comment(&self, id: CommentId) -> RepoResult<()>;
    fn find_comment_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Oldest-first thread for one news item.
    fn list_comments_for_news(&self, news_id: NewsId) -> RepoResult<Vec<Comment>>;
    fn count_comments(&self) -> RepoResult<u64>;
}

/// SQLite-backed news repository.
pub struct SqliteNewsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNewsRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn count(&self, table: &str) -> RepoResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {table};");
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative count {count}")))
    }
}

impl NewsRepository for SqliteNewsRepository<'_> {
    fn insert_news(&self, news: &NewsItem) -> RepoResult<NewsId> {
        self.conn.execute(
            "INSERT INTO news (uuid, title, text, published_at) VALUES (?1, ?2, ?3, ?4);",
            params![
                news.id.to_string(),
                news.title.as_str(),
                news.text.as_str(),
                news.published_at,
            ],
        )?;
        Ok(news.id)
    }

    fn find_news_by_id(&self, id: NewsId) -> RepoResult<Option<NewsItem>> {
        self.conn
            .query_row(
                &format!("{NEWS_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                read_news_row,
            )
            .optional()?
            .map(into_news)
            .transpose()
    }

    fn list_latest_news(&self, limit: u32) -> RepoResult<Vec<NewsItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NEWS_SELECT_SQL} ORDER BY published_at DESC, uuid ASC LIMIT ?1;"
        ))?;
        let mut rows = stmt.query([i64::from(limit)])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(into_news(read_news_row(row)?)?);
        }
        Ok(items)
    }

    fn count_news(&self) -> RepoResult<u64> {
        self.count("news")
    }

    fn insert_comment(&self, comment: &Comment) -> RepoResult<CommentId> {
        self.conn
            .execute(
                "INSERT INTO comments (uuid, news_uuid, author_uuid, text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    comment.id.to_string(),
                    comment.news_id.to_string(),
                    comment.author.to_string(),
                    comment.text.as_str(),
                    comment.created_at,
                ],
            )
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    RepoError::NotFound(comment.news_id)
                } else {
                    err.into()
                }
            })?;
        Ok(comment.id)
    }

    fn update_comment_text(&self, id: CommentId, text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE comments SET text = ?2 WHERE uuid = ?1;",
            params![id.to_string(), text],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn find_comment_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        self.conn
            .query_row(
                &format!("{COMMENT_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                read_comment_row,
            )
            .optional()?
            .map(into_comment)
            .transpose()
    }

    fn list_comments_for_news(&self, news_id: NewsId) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL} WHERE news_uuid = ?1 ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([news_id.to_string()])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(into_comment(read_comment_row(row)?)?);
        }
        Ok(comments)
    }

    fn count_comments(&self) -> RepoResult<u64> {
        self.count("comments")
    }
}

type NewsColumns = (String, String, String, i64);
type CommentColumns = (String, String, String, String, i64);

fn read_news_row(row: &Row<'_>) -> rusqlite::Result<NewsColumns> {
    Ok((
        row.get("uuid")?,
        row.get("title")?,
        row.get("text")?,
        row.get("published_at")?,
    ))
}

fn into_news((uuid, title, text, published_at): NewsColumns) -> RepoResult<NewsItem> {
    Ok(NewsItem {
        id: parse_uuid(&uuid, "news.uuid")?,
        title,
        text,
        published_at,
    })
}

fn read_comment_row(row: &Row<'_>) -> rusqlite::Result<CommentColumns> {
    Ok((
        row.get("uuid")?,
        row.get("news_uuid")?,
        row.get("author_uuid")?,
        row.get("text")?,
        row.get("created_at")?,
    ))
}

fn into_comment((uuid, news, author, text, created_at): CommentColumns) -> RepoResult<Comment> {
    Ok(Comment {
        id: parse_uuid(&uuid, "comments.uuid")?,
        news_id: parse_uuid(&news, "comments.news_uuid")?,
        author: parse_uuid(&author, "comments.author_uuid")?,
        text,
        created_at,
    })
}
