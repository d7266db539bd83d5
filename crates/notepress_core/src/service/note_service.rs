//! Note use-case service.
//!
//! # Responsibility
//! - Identity-scoped list/detail/create/edit/delete for personal notes.
//! - Allocate slugs before persistence; surface collisions inline.
//!
//! # Invariants
//! - Every route, including list and the success page, requires login.
//! - Listing never returns another author's notes.
//! - Explicit slugs are pre-checked; the store's unique constraint decides
//!   the final outcome for every slug.

use crate::access::{Operation, Resource};
use crate::config::CoreConfig;
use crate::model::identity::Identity;
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::routes::{
    note_delete_path, note_detail_path, note_edit_path, NOTES_ADD_PATH, NOTES_LIST_PATH,
    NOTES_SUCCESS_PATH,
};
use crate::service::{enforce, require_login, require_non_blank, ServiceError, ServiceResult};
use crate::slug::allocate_slug;
use log::{info, warn};
use std::collections::BTreeSet;

/// Note service facade over a repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    slug_max_length: usize,
    login_path: String,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R, config: &CoreConfig) -> Self {
        Self {
            repo,
            slug_max_length: config.slug_max_length,
            login_path: config.login_path.clone(),
        }
    }

    /// Lists the caller's own notes in creation order.
    pub fn list_notes(&self, identity: &Identity) -> ServiceResult<Vec<Note>> {
        let author = require_login(identity, &self.login_path, NOTES_LIST_PATH)?;
        enforce(
            identity,
            Resource::NoteCollection,
            Operation::ReadList,
            &self.login_path,
            NOTES_LIST_PATH,
        )?;
        Ok(self.repo.list_notes_by_author(author)?)
    }

    /// Gate for the add form: any logged-in identity may open it.
    pub fn open_add_form(&self, identity: &Identity) -> ServiceResult<()> {
        enforce(
            identity,
            Resource::NoteCollection,
            Operation::Create,
            &self.login_path,
            NOTES_ADD_PATH,
        )
    }

    /// Gate for the post-action success page.
    pub fn open_success_page(&self, identity: &Identity) -> ServiceResult<()> {
        require_login(identity, &self.login_path, NOTES_SUCCESS_PATH).map(|_| ())
    }

    /// Returns one of the caller's notes by slug.
    pub fn get_note(&self, identity: &Identity, slug: &str) -> ServiceResult<Note> {
        self.load_owned(identity, slug, Operation::ReadDetail, &note_detail_path(slug))
    }

    /// Creates a note owned by the caller.
    ///
    /// # Errors
    /// - `AuthenticationRequired` for anonymous callers.
    /// - `InvalidInput` for a blank title or text.
    /// - `DuplicateSlug` when the explicit or derived slug is taken.
    pub fn create_note(&self, identity: &Identity, draft: NoteDraft) -> ServiceResult<Note> {
        let author = require_login(identity, &self.login_path, NOTES_ADD_PATH)?;
        self.open_add_form(identity)?;
        validate_draft(&draft)?;

        let slug = self.allocate(&draft, None)?;
        let note = Note::new(author, draft.title, draft.text, slug);
        self.repo.insert_note(&note).inspect_err(|err| {
            warn!(
                "event=note_create module=note_service status=error author={author} error={err}"
            );
        })?;

        info!(
            "event=note_create module=note_service status=ok note_id={} author={author}",
            note.id
        );
        Ok(note)
    }

    /// Replaces title, text and slug of one of the caller's notes.
    ///
    /// The author is kept; keeping the current slug is not a collision.
    pub fn update_note(
        &self,
        identity: &Identity,
        slug: &str,
        draft: NoteDraft,
    ) -> ServiceResult<Note> {
        let mut note = self.load_owned(identity, slug, Operation::Edit, &note_edit_path(slug))?;
        validate_draft(&draft)?;

        note.slug = self.allocate(&draft, Some(note.id))?;
        note.title = draft.title;
        note.text = draft.text;
        self.repo.update_note(&note)?;

        info!(
            "event=note_update module=note_service status=ok note_id={}",
            note.id
        );
        Ok(note)
    }

    /// Deletes one of the caller's notes.
    pub fn delete_note(&self, identity: &Identity, slug: &str) -> ServiceResult<()> {
        let note = self.load_owned(identity, slug, Operation::Delete, &note_delete_path(slug))?;
        self.repo.delete_note(note.id)?;
        info!(
            "event=note_delete module=note_service status=ok note_id={}",
            note.id
        );
        Ok(())
    }

    fn load_owned(
        &self,
        identity: &Identity,
        slug: &str,
        operation: Operation,
        requested_path: &str,
    ) -> ServiceResult<Note> {
        require_login(identity, &self.login_path, requested_path)?;
        let note = self
            .repo
            .find_note_by_slug(slug)?
            .ok_or(ServiceError::NotFound)?;
        enforce(
            identity,
            Resource::Note(&note),
            operation,
            &self.login_path,
            requested_path,
        )?;
        Ok(note)
    }

    /// Looks the explicit slug up in the store (ignoring the note being
    /// edited) and hands the answer to the allocator.
    fn allocate(&self, draft: &NoteDraft, editing: Option<NoteId>) -> ServiceResult<String> {
        let explicit = draft.slug.trim();
        let mut taken = BTreeSet::new();
        if !explicit.is_empty() && self.repo.slug_exists(explicit, editing)? {
            taken.insert(explicit.to_string());
        }
        Ok(allocate_slug(
            &draft.title,
            Some(explicit),
            &taken,
            self.slug_max_length,
        )?)
    }
}

fn validate_draft(draft: &NoteDraft) -> ServiceResult<()> {
    require_non_blank(&draft.title, "title")?;
    require_non_blank(&draft.text, "text")
}
