use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{named_params, Connection, ErrorCode, OpenFlags, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::InvalidInput;
use crate::reference::ReferenceScope;
use crate::search::{phrase_pattern, SearchQuery, SearchResultRow, SearchScope, MATCH_CLOSE, MATCH_OPEN};
use crate::translations::is_valid_translation_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    /// Empty for placeholder verses some translations keep for numbering.
    pub text: String,
}

/// One translation's SQLite database: `books(id, name)` and
/// `verses(id, book_id, chapter, verse, text)`, plus the `verses_fts`
/// full-text index over verse text.
pub struct BibleDb {
    conn: Connection,
    translation: String,
}

impl BibleDb {
    /// Open an existing translation database for writing. The file is never
    /// created here.
    pub fn open(path: &Path, translation: &str) -> Result<Self> {
        Self::open_with_flags(path, translation, OpenFlags::SQLITE_OPEN_READ_WRITE)
    }

    pub fn open_read_only(path: &Path, translation: &str) -> Result<Self> {
        Self::open_with_flags(path, translation, OpenFlags::SQLITE_OPEN_READ_ONLY)
    }

    /// Open a translation ready for lookups and searches. A database that is
    /// already prepared stays read-only; otherwise it is reopened for writing
    /// and [`prepare_schema`](Self::prepare_schema) runs once.
    pub fn open_prepared(path: &Path, translation: &str) -> Result<Self> {
        let db = Self::open_read_only(path, translation)?;
        if !db.needs_preparation()? {
            return Ok(db);
        }
        drop(db);

        let db = Self::open(path, translation)?;
        db.prepare_schema()?;
        Ok(db)
    }

    fn open_with_flags(path: &Path, translation: &str, mode: OpenFlags) -> Result<Self> {
        if !is_valid_translation_name(translation) {
            return Err(InvalidInput::Translation(translation.to_string()).into());
        }

        let conn = Connection::open_with_flags(path, mode | OpenFlags::SQLITE_OPEN_NO_MUTEX)
            .with_context(|| format!("failed to open translation database {}", path.display()))?;

        debug!(path = %path.display(), translation, ?mode, "opened translation database");
        Ok(Self::from_connection(conn, translation))
    }

    pub fn from_connection(conn: Connection, translation: &str) -> Self {
        Self {
            conn,
            translation: translation.to_string(),
        }
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// Bring a downloaded database to the expected layout: rename the
    /// `<T>_books` / `<T>_verses` tables some sources ship with, then build
    /// the full-text index if it is missing. Safe to run repeatedly.
    pub fn prepare_schema(&self) -> Result<()> {
        for table in ["books", "verses"] {
            let legacy = format!("{}_{}", self.translation, table);
            if self.table_exists(&legacy)? && !self.table_exists(table)? {
                // Table names cannot be bound; the translation name is validated on open.
                self.conn
                    .execute(&format!("ALTER TABLE \"{legacy}\" RENAME TO {table}"), [])
                    .with_context(|| format!("failed to rename {legacy} to {table}"))?;
                info!(from = %legacy, to = table, "renamed table");
            }
        }

        if !self.has_search_index()? {
            self.build_search_index()?;
        }

        Ok(())
    }

    /// Whether [`prepare_schema`](Self::prepare_schema) still has work to do.
    pub fn needs_preparation(&self) -> Result<bool> {
        for table in ["books", "verses"] {
            if !self.table_exists(table)? {
                return Ok(true);
            }
        }
        Ok(!self.has_search_index()?)
    }

    pub fn has_search_index(&self) -> Result<bool> {
        self.table_exists("verses_fts")
    }

    /// (Re)build the FTS5 index over `verses.text`.
    pub fn build_search_index(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE VIRTUAL TABLE IF NOT EXISTS verses_fts
                    USING fts5(text, content='verses', content_rowid='id');
                 INSERT INTO verses_fts(verses_fts) VALUES ('rebuild');",
            )
            .context("failed to build full-text index")?;

        info!(translation = %self.translation, "built full-text index");
        Ok(())
    }

    /// Names of the books present in this translation, in canonical order.
    pub fn book_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM books ORDER BY id")
            .context("failed to prepare books query")?;

        let names = stmt
            .query_map([], |row| row.get(0))
            .context("failed to iterate books")?
            .collect::<Result<Vec<String>, _>>()
            .context("failed to collect books")?;

        Ok(names)
    }

    /// Verses for the requested passage in reading order. Nothing matching is
    /// not an error: the result is simply empty.
    pub fn passage(&self, scope: &ReferenceScope) -> Result<Vec<VerseRecord>> {
        let verses = scope.verses();

        let mut stmt = self
            .conn
            .prepare(
                "SELECT books.name, verses.chapter, verses.verse, COALESCE(verses.text, '')
                 FROM verses
                 JOIN books ON verses.book_id = books.id
                 WHERE books.name = :book
                 AND (:chapter IS NULL OR verses.chapter = :chapter)
                 AND (:first IS NULL OR verses.verse BETWEEN :first AND :last)
                 ORDER BY verses.book_id, verses.chapter, verses.verse",
            )
            .context("failed to prepare passage query")?;

        let records = stmt
            .query_map(
                named_params! {
                    ":book": scope.book().name,
                    ":chapter": scope.chapter(),
                    ":first": verses.map(|v| v.start),
                    ":last": verses.map(|v| v.end),
                },
                |row| {
                    Ok(VerseRecord {
                        book: row.get(0)?,
                        chapter: row.get(1)?,
                        verse: row.get(2)?,
                        text: row.get(3)?,
                    })
                },
            )
            .context("failed to iterate passage")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect passage")?;

        debug!(reference = %scope.citation(), rows = records.len(), "fetched passage");
        Ok(records)
    }

    /// Run a phrase search. Full-text queries go to the FTS5 index, which
    /// marks matches with [`MATCH_OPEN`] / [`MATCH_CLOSE`]; literal queries
    /// match a case-insensitive substring and leave the text untouched.
    ///
    /// SQLite's `lower()` only folds ASCII, so literal matching happens here
    /// with the same pattern the report highlights with.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResultRow>> {
        let (book, chapter, book_ids) = scope_filters(&query.scope);

        let sql = if query.full_text {
            "SELECT books.name, verses.chapter, verses.verse,
                    highlight(verses_fts, 0, :open, :close)
             FROM verses_fts
             JOIN verses ON verses.id = verses_fts.rowid
             JOIN books ON verses.book_id = books.id
             WHERE verses_fts MATCH :phrase
             AND verses.book_id BETWEEN :first_book AND :last_book
             AND (:book IS NULL OR books.name = :book)
             AND (:chapter IS NULL OR verses.chapter = :chapter)
             ORDER BY verses.book_id, verses.chapter, verses.verse"
        } else {
            "SELECT books.name, verses.chapter, verses.verse, verses.text
             FROM verses
             JOIN books ON verses.book_id = books.id
             WHERE verses.text IS NOT NULL AND verses.text != ''
             AND verses.book_id BETWEEN :first_book AND :last_book
             AND (:book IS NULL OR books.name = :book)
             AND (:chapter IS NULL OR verses.chapter = :chapter)
             ORDER BY verses.book_id, verses.chapter, verses.verse"
        };

        let mut stmt = self
            .conn
            .prepare(sql)
            .context("failed to prepare search query")?;

        let first_book = *book_ids.start();
        let last_book = *book_ids.end();
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<SearchResultRow> {
            Ok(SearchResultRow {
                book: row.get(0)?,
                chapter: row.get(1)?,
                verse: row.get(2)?,
                text: row.get(3)?,
            })
        };

        let rows = if query.full_text {
            stmt.query_map(
                named_params! {
                    ":open": MATCH_OPEN,
                    ":close": MATCH_CLOSE,
                    ":phrase": query.phrase,
                    ":first_book": first_book,
                    ":last_book": last_book,
                    ":book": book,
                    ":chapter": chapter,
                },
                map_row,
            )
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
        } else {
            stmt.query_map(
                named_params! {
                    ":first_book": first_book,
                    ":last_book": last_book,
                    ":book": book,
                    ":chapter": chapter,
                },
                map_row,
            )
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
        };

        let rows = rows.map_err(|err| match rejected_query(&err, query.full_text) {
            Some(message) => anyhow::Error::new(InvalidInput::SearchSyntax(message)),
            None => anyhow::Error::new(err).context("failed to run search query"),
        })?;

        let rows = if query.full_text {
            rows
        } else {
            let pattern = phrase_pattern(&query.phrase).context("failed to build literal search pattern")?;
            rows.into_iter().filter(|row| pattern.is_match(&row.text)).collect()
        };

        debug!(phrase = %query.phrase, full_text = query.full_text, rows = rows.len(), "searched");
        Ok(rows)
    }

    /// Full-text search when the index exists, literal search otherwise.
    pub fn search_with_fallback(&self, mut query: SearchQuery) -> Result<(SearchQuery, Vec<SearchResultRow>)> {
        if query.full_text && !self.has_search_index()? {
            warn!(translation = %self.translation, "no full-text index, falling back to literal search");
            query.full_text = false;
        }
        let rows = self.search(&query)?;
        Ok((query, rows))
    }

    fn table_exists(&self, name: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |_| Ok(()),
            )
            .optional()
            .with_context(|| format!("failed to look up table {name}"))?;
        Ok(found.is_some())
    }
}

fn scope_filters(scope: &SearchScope) -> (Option<&'static str>, Option<u32>, RangeInclusive<u8>) {
    match scope {
        SearchScope::Bible => (None, None, 1..=66),
        SearchScope::Testament(testament) => (None, None, testament.book_ids()),
        SearchScope::Book(book) => (Some(book.name), None, 1..=66),
        SearchScope::Chapter(book, chapter) => (Some(book.name), Some(*chapter), 1..=66),
    }
}

/// The engine rejects a malformed MATCH expression (`fts5: syntax error`,
/// `unterminated string`, `no such column`) with a generic SQLite error while
/// stepping. The statement itself already prepared, so the phrase is at fault.
fn rejected_query(err: &rusqlite::Error, full_text: bool) -> Option<String> {
    match err {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if full_text && failure.code == ErrorCode::Unknown =>
        {
            Some(message.clone())
        }
        _ => None,
    }
}
