//! Phrase search: query validation and report rendering with highlighted
//! matches.

use std::ops::RangeInclusive;

use regex::{Captures, Regex, RegexBuilder};
use tracing::warn;

use crate::books::Book;
use crate::error::InvalidInput;

/// Markers the full-text engine wraps around each match.
pub const MATCH_OPEN: &str = "<b>";
pub const MATCH_CLOSE: &str = "</b>";

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    /// The command-line flag selecting this testament, as quoted in messages.
    pub fn flag(&self) -> &'static str {
        match self {
            Testament::Old => "'-OT, --old_testament'",
            Testament::New => "'-NT, --new_testament'",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Testament::Old => "Old",
            Testament::New => "New",
        }
    }

    /// Ids of the books belonging to this testament.
    pub fn book_ids(&self) -> RangeInclusive<u8> {
        match self {
            Testament::Old => 1..=39,
            Testament::New => 40..=66,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Bible,
    Testament(Testament),
    Book(&'static Book),
    Chapter(&'static Book, u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The phrase exactly as typed, quotes and operators included.
    pub phrase: String,
    pub scope: SearchScope,
    /// Hand the phrase to the full-text engine (operators, prefixes, quoted
    /// phrases) instead of matching it as a literal substring.
    pub full_text: bool,
}

impl SearchQuery {
    /// Validate the combination of scope arguments. A testament filter cannot
    /// narrow a book or chapter search.
    pub fn new(
        phrase: &str,
        book: Option<&'static Book>,
        chapter: Option<u32>,
        testament: Option<Testament>,
        full_text: bool,
    ) -> Result<Self, InvalidInput> {
        if phrase.trim().is_empty() {
            return Err(InvalidInput::SearchSyntax("phrase is empty.".to_string()));
        }

        let scope = match (book, chapter, testament) {
            (Some(_), Some(_), Some(testament)) => {
                return Err(InvalidInput::SearchScope {
                    scope: "chapter",
                    testament,
                })
            }
            (Some(_), None, Some(testament)) => {
                return Err(InvalidInput::SearchScope {
                    scope: "book",
                    testament,
                })
            }
            (Some(book), Some(chapter), None) => SearchScope::Chapter(book, chapter),
            (Some(book), None, None) => SearchScope::Book(book),
            (None, _, Some(testament)) => SearchScope::Testament(testament),
            (None, _, None) => SearchScope::Bible,
        };

        Ok(Self {
            phrase: phrase.to_string(),
            scope,
            full_text,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultRow {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    /// Verse text; in full-text mode it carries the engine's match markers.
    pub text: String,
}

impl SearchResultRow {
    /// Byte offsets of each case-insensitive literal occurrence of `phrase`.
    pub fn match_spans(&self, phrase: &str) -> Vec<(usize, usize)> {
        match phrase_pattern(phrase) {
            Ok(pattern) => pattern
                .find_iter(&self.text)
                .map(|m| (m.start(), m.end()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// How matches are marked in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    /// Bold terminal escapes.
    #[default]
    Ansi,
    /// `<b>` tags.
    Html,
}

impl Highlight {
    fn markers(&self) -> (&'static str, &'static str) {
        match self {
            Highlight::Ansi => (ANSI_BOLD, ANSI_RESET),
            Highlight::Html => (MATCH_OPEN, MATCH_CLOSE),
        }
    }
}

/// Render a search report: a header naming the scope, then one block per
/// matching verse, each closed by a `___` rule.
pub fn render_search(
    query: &SearchQuery,
    translation: &str,
    rows: &[SearchResultRow],
    highlight: Highlight,
) -> String {
    let mut report = header(query, translation, rows.len());
    report.push_str("\n___\n");
    for row in rows {
        report.push_str(&format!(
            "\n{} {}:{}:\n{}\n___\n",
            row.book, row.chapter, row.verse, row.text
        ));
    }

    if query.full_text {
        highlight_engine_markers(&report, highlight)
    } else {
        highlight_phrase(&report, &query.phrase, highlight)
    }
}

fn header(query: &SearchQuery, translation: &str, count: usize) -> String {
    let phrase = &query.phrase;
    match query.scope {
        SearchScope::Chapter(book, chapter) => format!(
            "{count} occurrences of '{phrase}' in {} {chapter} ({translation}):",
            book.name
        ),
        SearchScope::Book(book) => {
            format!("{count} occurrences of '{phrase}' in {} ({translation}):", book.name)
        }
        SearchScope::Testament(testament) => format!(
            "{count} occurrences of '{phrase}' in the {} Testament ({translation}):",
            testament.display_name()
        ),
        SearchScope::Bible => {
            format!("{count} occurrences of '{phrase}' in the {translation} Bible:")
        }
    }
}

fn highlight_engine_markers(report: &str, highlight: Highlight) -> String {
    let (open, close) = highlight.markers();
    report.replace(MATCH_OPEN, open).replace(MATCH_CLOSE, close)
}

/// Mark every case-insensitive occurrence of `phrase`, keeping the matched
/// text's case. The header quotes the phrase too, so its occurrence (the
/// first one) is unmarked again afterwards. This assumes the phrase appears
/// exactly as typed, once, in the header.
fn highlight_phrase(report: &str, phrase: &str, highlight: Highlight) -> String {
    let pattern = match phrase_pattern(phrase) {
        Ok(pattern) => pattern,
        Err(err) => {
            warn!(%err, "could not build highlight pattern, leaving matches unmarked");
            return report.to_string();
        }
    };

    let (open, close) = highlight.markers();
    let marked = pattern.replace_all(report, |caps: &Captures| format!("{open}{}{close}", &caps[0]));

    marked.replacen(&format!("{open}{phrase}{close}"), phrase, 1)
}

pub(crate) fn phrase_pattern(phrase: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(phrase))
        .case_insensitive(true)
        .build()
}
