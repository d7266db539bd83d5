//! News and comment use-case service.
//!
//! # Responsibility
//! - Public home page and news detail with its comment thread.
//! - Comment create/edit/delete for authenticated authors, filtered
//!   against the configured banned words.
//!
//! # Invariants
//! - Home page holds at most `news_page_size` items, newest first.
//! - Threads are oldest first.
//! - Rejected comment text leaves the store untouched.

use crate::access::{can_access, Operation, Resource};
use crate::config::CoreConfig;
use crate::filter::{check_text, BannedWords};
use crate::model::identity::Identity;
use crate::model::news::{Comment, CommentId, NewsId, NewsItem};
use crate::repo::news_repo::NewsRepository;
use crate::routes::{
    comment_delete_path, comment_edit_path, news_comments_path, news_detail_path, NEWS_HOME_PATH,
};
use crate::service::{enforce, require_login, require_non_blank, ServiceError, ServiceResult};
use log::info;

/// News detail page model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDetail {
    pub news: NewsItem,
    /// Oldest first.
    pub comments: Vec<Comment>,
    /// Whether the caller is offered the comment form.
    pub comment_form: bool,
}

/// Outcome of a successful comment create, edit or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentOutcome {
    pub comment: Comment,
    /// Thread anchor of the parent news item: `/news/{id}/#comments`.
    pub redirect: String,
}

impl CommentOutcome {
    fn new(comment: Comment) -> Self {
        let redirect = news_comments_path(comment.news_id);
        Self { comment, redirect }
    }
}

/// News service facade over a repository implementation.
pub struct NewsService<R: NewsRepository> {
    repo: R,
    banned_words: BannedWords,
    page_size: u32,
    login_path: String,
}

impl<R: NewsRepository> NewsService<R> {
    pub fn new(repo: R, config: &CoreConfig) -> Self {
        Self {
            repo,
            banned_words: config.banned_words.clone(),
            page_size: config.news_page_size,
            login_path: config.login_path.clone(),
        }
    }

    /// Newest news items, capped at the configured page size.
    pub fn home_page(&self, identity: &Identity) -> ServiceResult<Vec<NewsItem>> {
        enforce(
            identity,
            Resource::NewsFeed,
            Operation::ReadList,
            &self.login_path,
            NEWS_HOME_PATH,
        )?;
        Ok(self.repo.list_latest_news(self.page_size)?)
    }

    /// One news item with its comment thread.
    pub fn news_detail(&self, identity: &Identity, news_id: NewsId) -> ServiceResult<NewsDetail> {
        let news = self.load_news(news_id)?;
        enforce(
            identity,
            Resource::NewsItem(&news),
            Operation::ReadDetail,
            &self.login_path,
            &news_detail_path(news_id),
        )?;
        let comments = self.repo.list_comments_for_news(news_id)?;
        let comment_form = can_access(identity, Resource::NewsItem(&news), Operation::Create);
        Ok(NewsDetail {
            news,
            comments,
            comment_form,
        })
    }

    /// Posts a comment under a news item as the caller.
    ///
    /// # Errors
    /// - `AuthenticationRequired` with the news detail path as `next`.
    /// - `ContentRejected` when the text contains a banned word.
    /// - `NotFound` for an unknown news item.
    pub fn add_comment(
        &self,
        identity: &Identity,
        news_id: NewsId,
        text: &str,
    ) -> ServiceResult<CommentOutcome> {
        let requested_path = news_detail_path(news_id);
        let author = require_login(identity, &self.login_path, &requested_path)?;
        let news = self.load_news(news_id)?;
        enforce(
            identity,
            Resource::NewsItem(&news),
            Operation::Create,
            &self.login_path,
            &requested_path,
        )?;
        self.validate_text(text)?;

        let comment = Comment::new(news.id, author, text);
        self.repo.insert_comment(&comment)?;
        info!(
            "event=comment_create module=news_service status=ok comment_id={} news_id={}",
            comment.id, news.id
        );
        Ok(CommentOutcome::new(comment))
    }

    /// Loads the caller's comment for the edit or delete form.
    pub fn get_comment(
        &self,
        identity: &Identity,
        comment_id: CommentId,
    ) -> ServiceResult<Comment> {
        self.load_owned(
            identity,
            comment_id,
            Operation::ReadDetail,
            &comment_edit_path(comment_id),
        )
    }

    /// Replaces the text of the caller's comment.
    pub fn edit_comment(
        &self,
        identity: &Identity,
        comment_id: CommentId,
        text: &str,
    ) -> ServiceResult<CommentOutcome> {
        let mut comment = self.load_owned(
            identity,
            comment_id,
            Operation::Edit,
            &comment_edit_path(comment_id),
        )?;
        self.validate_text(text)?;

        self.repo.update_comment_text(comment.id, text)?;
        comment.text = text.to_string();
        info!(
            "event=comment_update module=news_service status=ok comment_id={}",
            comment.id
        );
        Ok(CommentOutcome::new(comment))
    }

    /// Deletes the caller's comment and returns it with the thread redirect.
    pub fn delete_comment(
        &self,
        identity: &Identity,
        comment_id: CommentId,
    ) -> ServiceResult<CommentOutcome> {
        let comment = self.load_owned(
            identity,
            comment_id,
            Operation::Delete,
            &comment_delete_path(comment_id),
        )?;
        self.repo.delete_comment(comment.id)?;
        info!(
            "event=comment_delete module=news_service status=ok comment_id={}",
            comment.id
        );
        Ok(CommentOutcome::new(comment))
    }

    fn load_news(&self, news_id: NewsId) -> ServiceResult<NewsItem> {
        self.repo
            .find_news_by_id(news_id)?
            .ok_or(ServiceError::NotFound)
    }

    fn load_owned(
        &self,
        identity: &Identity,
        comment_id: CommentId,
        operation: Operation,
        requested_path: &str,
    ) -> ServiceResult<Comment> {
        require_login(identity, &self.login_path, requested_path)?;
        let comment = self
            .repo
            .find_comment_by_id(comment_id)?
            .ok_or(ServiceError::NotFound)?;
        enforce(
            identity,
            Resource::Comment(&comment),
            operation,
            &self.login_path,
            requested_path,
        )?;
        Ok(comment)
    }

    fn validate_text(&self, text: &str) -> ServiceResult<()> {
        require_non_blank(text, "text")?;
        check_text(text, &self.banned_words).map_err(|rejected| {
            info!("event=comment_filter module=news_service status=rejected");
            ServiceError::from(rejected)
        })
    }
}
