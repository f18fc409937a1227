//! What a lookup asked for: a book, a chapter, a verse, or a verse range.

use std::fmt;

use crate::books::Book;
use crate::error::InvalidInput;

/// An inclusive verse range within one chapter, e.g. `16-18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseRange {
    pub start: u32,
    pub end: u32,
}

impl VerseRange {
    pub fn parse(text: &str) -> Result<Self, InvalidInput> {
        let invalid = || InvalidInput::Reference(text.to_string());
        let (start, end) = text.split_once('-').ok_or_else(invalid)?;
        let start = parse_number(start).ok_or_else(invalid)?;
        let end = parse_number(end).ok_or_else(invalid)?;
        if start > end {
            return Err(invalid());
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceScope {
    Book(&'static Book),
    Chapter(&'static Book, u32),
    Verse(&'static Book, u32, u32),
    VerseRange(&'static Book, u32, VerseRange),
}

impl ReferenceScope {
    /// Build a scope from positional arguments. A verse containing `-` is a
    /// range; a verse without a chapter is ignored.
    pub fn parse(
        book: &'static Book,
        chapter: Option<&str>,
        verse: Option<&str>,
    ) -> Result<Self, InvalidInput> {
        let Some(chapter) = chapter else {
            return Ok(ReferenceScope::Book(book));
        };
        let chapter = parse_number(chapter)
            .ok_or_else(|| InvalidInput::Reference(chapter.to_string()))?;

        match verse {
            None => Ok(ReferenceScope::Chapter(book, chapter)),
            Some(verse) if verse.contains('-') => Ok(ReferenceScope::VerseRange(
                book,
                chapter,
                VerseRange::parse(verse)?,
            )),
            Some(verse) => {
                let verse = parse_number(verse)
                    .ok_or_else(|| InvalidInput::Reference(verse.to_string()))?;
                Ok(ReferenceScope::Verse(book, chapter, verse))
            }
        }
    }

    pub fn book(&self) -> &'static Book {
        match self {
            ReferenceScope::Book(book)
            | ReferenceScope::Chapter(book, _)
            | ReferenceScope::Verse(book, _, _)
            | ReferenceScope::VerseRange(book, _, _) => book,
        }
    }

    pub fn chapter(&self) -> Option<u32> {
        match self {
            ReferenceScope::Book(_) => None,
            ReferenceScope::Chapter(_, chapter)
            | ReferenceScope::Verse(_, chapter, _)
            | ReferenceScope::VerseRange(_, chapter, _) => Some(*chapter),
        }
    }

    /// First and last verse requested, if the scope is narrower than a chapter.
    pub fn verses(&self) -> Option<VerseRange> {
        match self {
            ReferenceScope::Verse(_, _, verse) => Some(VerseRange {
                start: *verse,
                end: *verse,
            }),
            ReferenceScope::VerseRange(_, _, range) => Some(*range),
            _ => None,
        }
    }

    /// `John 3:16-18`, `Psalms 117` or `III John`.
    pub fn citation(&self) -> String {
        match self {
            ReferenceScope::Book(book) => book.name.to_string(),
            ReferenceScope::Chapter(book, chapter) => format!("{} {}", book.name, chapter),
            ReferenceScope::Verse(book, chapter, verse) => {
                format!("{} {}:{}", book.name, chapter, verse)
            }
            ReferenceScope::VerseRange(book, chapter, range) => {
                format!("{} {}:{}", book.name, chapter, range)
            }
        }
    }
}

/// Chapter and verse numbers start at 1.
fn parse_number(text: &str) -> Option<u32> {
    text.trim().parse().ok().filter(|n| *n > 0)
}
