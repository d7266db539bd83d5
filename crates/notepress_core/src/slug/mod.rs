//! Slug allocation for notes.
//!
//! # Responsibility
//! - Validate caller-provided slugs against known slugs.
//! - Derive slugs from titles through the static transliteration table.
//!
//! # Invariants
//! - Only explicit slugs are checked against `SlugLookup`; derived slugs rely
//!   on the store's `UNIQUE(slug)` constraint, which stays authoritative.
//! - Derived slugs contain only `[a-z0-9-]` and never exceed `max_len` chars.

mod translit;

pub use translit::{slugify, transliterate_char};

use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::BuildHasher;

/// Default cap for derived slugs, matching the `notes.slug` form field.
pub const DEFAULT_SLUG_MAX_LENGTH: usize = 100;

/// Appended to the offending slug in duplicate-slug validation messages.
pub const DUPLICATE_SLUG_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Slug validation errors surfaced inline on the note form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Slug is already used by another note.
    Duplicate(String),
    /// Explicit slug contains characters outside `[A-Za-z0-9_-]` or is too long.
    Invalid(String),
    /// Title produced no slug characters and no explicit slug was given.
    Empty,
}

impl Display for SlugError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate(slug) => write!(f, "{slug}{DUPLICATE_SLUG_WARNING}"),
            Self::Invalid(slug) => write!(
                f,
                "invalid slug `{slug}`: use latin letters, digits, hyphens or underscores"
            ),
            Self::Empty => write!(f, "cannot derive a slug from the title; provide one"),
        }
    }
}

impl Error for SlugError {}

/// Read-only view over slugs already taken by stored notes.
pub trait SlugLookup {
    fn is_taken(&self, slug: &str) -> bool;
}

impl<S: BuildHasher> SlugLookup for HashSet<String, S> {
    fn is_taken(&self, slug: &str) -> bool {
        self.contains(slug)
    }
}

impl SlugLookup for BTreeSet<String> {
    fn is_taken(&self, slug: &str) -> bool {
        self.contains(slug)
    }
}

impl SlugLookup for [String] {
    fn is_taken(&self, slug: &str) -> bool {
        self.iter().any(|existing| existing == slug)
    }
}

impl SlugLookup for [&str] {
    fn is_taken(&self, slug: &str) -> bool {
        self.contains(&slug)
    }
}

/// Produces the slug a note is stored under.
///
/// A non-blank `explicit_slug` wins and must be free in `existing`. Otherwise
/// the slug is derived from `title` and cut to `max_len` characters.
///
/// # Errors
/// - `SlugError::Duplicate` when the explicit slug is taken.
/// - `SlugError::Invalid` when the explicit slug is not URL-safe.
/// - `SlugError::Empty` when derivation yields nothing.
pub fn allocate_slug<L>(
    title: &str,
    explicit_slug: Option<&str>,
    existing: &L,
    max_len: usize,
) -> Result<String, SlugError>
where
    L: SlugLookup + ?Sized,
{
    let explicit = explicit_slug.map(str::trim).filter(|value| !value.is_empty());
    if let Some(slug) = explicit {
        if !is_valid_explicit_slug(slug, max_len) {
            return Err(SlugError::Invalid(slug.to_string()));
        }
        if existing.is_taken(slug) {
            return Err(SlugError::Duplicate(slug.to_string()));
        }
        return Ok(slug.to_string());
    }

    let derived: String = slugify(title).chars().take(max_len).collect();
    if derived.is_empty() {
        return Err(SlugError::Empty);
    }
    Ok(derived)
}

fn is_valid_explicit_slug(slug: &str, max_len: usize) -> bool {
    slug.chars().count() <= max_len
        && slug
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}
