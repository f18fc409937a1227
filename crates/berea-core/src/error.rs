//! User-facing input errors.
//!
//! Every variant renders as the exact plain-text line printed by the CLI.
//! Plumbing failures (SQLite, I/O) travel as `anyhow::Error` instead.

use thiserror::Error;

use crate::reference::{ReferenceScope, VerseRange};
use crate::search::Testament;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Invalid input book='{0}'.")]
    Book(String),

    #[error("Invalid reference: {0}.")]
    Reference(String),

    #[error("Invalid book: {book}.")]
    EmptyBook { book: String },

    #[error("Invalid chapter: {book} {chapter}.")]
    EmptyChapter { book: String, chapter: u32 },

    #[error("Invalid verse: {book} {chapter}:{verse}.")]
    EmptyVerse { book: String, chapter: u32, verse: u32 },

    #[error("Invalid verses: {book} {chapter}:{range}.")]
    EmptyVerses {
        book: String,
        chapter: u32,
        range: VerseRange,
    },

    #[error("Invalid search: cannot search a {scope} with the {} flag.", Testament::flag(.testament))]
    SearchScope {
        scope: &'static str,
        testament: Testament,
    },

    #[error("Invalid search: {0}")]
    SearchSyntax(String),

    #[error("Translation '{0}' is not downloaded.")]
    Translation(String),
}

impl InvalidInput {
    /// Message for a reference that resolved to zero rows.
    pub fn empty_result(scope: &ReferenceScope) -> Self {
        match scope {
            ReferenceScope::Book(book) => InvalidInput::EmptyBook {
                book: book.name.to_string(),
            },
            ReferenceScope::Chapter(book, chapter) => InvalidInput::EmptyChapter {
                book: book.name.to_string(),
                chapter: *chapter,
            },
            ReferenceScope::Verse(book, chapter, verse) => InvalidInput::EmptyVerse {
                book: book.name.to_string(),
                chapter: *chapter,
                verse: *verse,
            },
            ReferenceScope::VerseRange(book, chapter, range) => InvalidInput::EmptyVerses {
                book: book.name.to_string(),
                chapter: *chapter,
                range: *range,
            },
        }
    }
}
