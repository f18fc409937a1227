//! The 66 books of the Protestant canon, as named in the corpus databases.

use crate::error::InvalidInput;
use crate::search::Testament;

/// Last book id of the Old Testament (Malachi).
const OLD_TESTAMENT_LAST: u8 = 39;

#[derive(Debug, PartialEq, Eq)]
pub struct Book {
    /// Row id in the `books` table.
    pub id: u8,
    pub name: &'static str,
    /// Book code used by STEP Bible references.
    step: &'static str,
    abbreviations: &'static [&'static str],
}

impl Book {
    pub fn testament(&self) -> Testament {
        if self.id <= OLD_TESTAMENT_LAST {
            Testament::Old
        } else {
            Testament::New
        }
    }

    pub fn step_abbreviation(&self) -> &'static str {
        self.step
    }

    pub fn abbreviations(&self) -> &'static [&'static str] {
        self.abbreviations
    }
}

macro_rules! book {
    ($id:expr, $name:expr, $step:expr, [$($abbr:expr),* $(,)?]) => {
        Book {
            id: $id,
            name: $name,
            step: $step,
            abbreviations: &[$($abbr),*],
        }
    };
}

pub static BOOKS: [Book; 66] = [
    book!(1, "Genesis", "gen", ["gen", "ge", "gn"]),
    book!(2, "Exodus", "exod", ["exo", "ex", "exod"]),
    book!(3, "Leviticus", "lev", ["lev", "le", "lv"]),
    book!(4, "Numbers", "num", ["num", "nu", "nm", "nb"]),
    book!(5, "Deuteronomy", "deut", ["deut", "de", "dt"]),
    book!(6, "Joshua", "josh", ["josh", "jos", "jsh"]),
    book!(7, "Judges", "judg", ["judg", "jdg", "jg", "jdgs"]),
    book!(8, "Ruth", "ruth", ["rth", "ru"]),
    book!(9, "I Samuel", "1sam", ["1sam", "1sa", "1 samuel", "1 sam", "1s", "i sa", "1st samuel", "first samuel"]),
    book!(10, "II Samuel", "2sam", ["2sam", "2sa", "2 samuel", "2 sam", "2s", "ii sa", "2nd samuel", "second samuel"]),
    book!(11, "I Kings", "1kgs", ["1kgs", "1ki", "1 kings", "1 kgs", "1k", "i kgs", "1st kings", "first kings"]),
    book!(12, "II Kings", "2kgs", ["2kgs", "2ki", "2 kings", "2 kgs", "2k", "ii kgs", "2nd kings", "second kings"]),
    book!(13, "I Chronicles", "1chr", ["1chr", "1ch", "1 chronicles", "1 chr", "i chr", "1st chronicles", "first chronicles"]),
    book!(14, "II Chronicles", "2chr", ["2chr", "2ch", "2 chronicles", "2 chr", "ii chr", "2nd chronicles", "second chronicles"]),
    book!(15, "Ezra", "ezra", ["ezr", "ez"]),
    book!(16, "Nehemiah", "neh", ["neh", "ne"]),
    book!(17, "Esther", "esth", ["est", "esth", "es"]),
    book!(18, "Job", "job", ["jb"]),
    book!(19, "Psalms", "psalm", ["psa", "ps", "psalm", "pslm", "psm", "pss"]),
    book!(20, "Proverbs", "prov", ["prov", "pro", "prv", "pr"]),
    book!(21, "Ecclesiastes", "eccl", ["eccl", "ecc", "ec", "qoh"]),
    book!(22, "Song of Solomon", "song", ["song", "sos", "so", "song of songs", "canticles"]),
    book!(23, "Isaiah", "isa", ["isa", "is"]),
    book!(24, "Jeremiah", "jer", ["jer", "je", "jr"]),
    book!(25, "Lamentations", "lam", ["lam", "la"]),
    book!(26, "Ezekiel", "ezek", ["ezek", "eze", "ezk"]),
    book!(27, "Daniel", "dan", ["dan", "da", "dn"]),
    book!(28, "Hosea", "hos", ["hos", "ho"]),
    book!(29, "Joel", "joel", ["jl"]),
    book!(30, "Amos", "amos", ["am"]),
    book!(31, "Obadiah", "obad", ["obad", "ob"]),
    book!(32, "Jonah", "jonah", ["jnh", "jon"]),
    book!(33, "Micah", "mic", ["mic", "mc"]),
    book!(34, "Nahum", "nah", ["nah", "na"]),
    book!(35, "Habakkuk", "hab", ["hab", "hb"]),
    book!(36, "Zephaniah", "zeph", ["zeph", "zep", "zp"]),
    book!(37, "Haggai", "hag", ["hag", "hg"]),
    book!(38, "Zechariah", "zech", ["zech", "zec", "zc"]),
    book!(39, "Malachi", "mal", ["mal", "ml"]),
    book!(40, "Matthew", "matt", ["matt", "mat", "mt"]),
    book!(41, "Mark", "mark", ["mrk", "mar", "mk", "mr"]),
    book!(42, "Luke", "luke", ["luk", "lk"]),
    book!(43, "John", "john", ["jhn", "jn", "joh"]),
    book!(44, "Acts", "acts", ["act", "ac"]),
    book!(45, "Romans", "rom", ["rom", "ro", "rm"]),
    book!(46, "I Corinthians", "1cor", ["1cor", "1co", "1 corinthians", "1 cor", "i cor", "1st corinthians", "first corinthians"]),
    book!(47, "II Corinthians", "2cor", ["2cor", "2co", "2 corinthians", "2 cor", "ii cor", "2nd corinthians", "second corinthians"]),
    book!(48, "Galatians", "gal", ["gal", "ga"]),
    book!(49, "Ephesians", "eph", ["eph", "ephes"]),
    book!(50, "Philippians", "phil", ["phil", "php", "pp"]),
    book!(51, "Colossians", "col", ["col", "co"]),
    book!(52, "I Thessalonians", "1thess", ["1thess", "1th", "1 thessalonians", "1 thess", "i thess", "1st thessalonians", "first thessalonians"]),
    book!(53, "II Thessalonians", "2thess", ["2thess", "2th", "2 thessalonians", "2 thess", "ii thess", "2nd thessalonians", "second thessalonians"]),
    book!(54, "I Timothy", "1tim", ["1tim", "1ti", "1 timothy", "1 tim", "i tim", "1st timothy", "first timothy"]),
    book!(55, "II Timothy", "2tim", ["2tim", "2ti", "2 timothy", "2 tim", "ii tim", "2nd timothy", "second timothy"]),
    book!(56, "Titus", "titus", ["tit", "ti"]),
    book!(57, "Philemon", "phlm", ["phlm", "philem", "phm", "pm"]),
    book!(58, "Hebrews", "heb", ["heb"]),
    book!(59, "James", "jas", ["jas", "jm"]),
    book!(60, "I Peter", "1pet", ["1pet", "1pe", "1 peter", "1 pet", "1p", "i pet", "1st peter", "first peter"]),
    book!(61, "II Peter", "2pet", ["2pet", "2pe", "2 peter", "2 pet", "2p", "ii pet", "2nd peter", "second peter"]),
    book!(62, "I John", "1john", ["1john", "1jn", "1 john", "1jhn", "1j", "i jn", "1st john", "first john"]),
    book!(63, "II John", "2john", ["2john", "2jn", "2 john", "2jhn", "2j", "ii jn", "2nd john", "second john"]),
    book!(64, "III John", "3john", ["3john", "3jn", "3 john", "3jhn", "3j", "iii jn", "3rd john", "third john"]),
    book!(65, "Jude", "jude", ["jud", "jd"]),
    book!(66, "Revelation of John", "rev", ["rev", "re", "revelation", "the revelation"]),
];

/// Resolve a user-typed book name or abbreviation, ignoring case and
/// repeated whitespace.
pub fn resolve_book(input: &str) -> Result<&'static Book, InvalidInput> {
    let wanted = input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    BOOKS
        .iter()
        .find(|book| book.name.to_lowercase() == wanted)
        .or_else(|| {
            BOOKS
                .iter()
                .find(|book| book.abbreviations.contains(&wanted.as_str()))
        })
        .ok_or_else(|| InvalidInput::Book(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_canonical_order() {
        for (i, book) in BOOKS.iter().enumerate() {
            assert_eq!(usize::from(book.id), i + 1, "{} out of order", book.name);
        }
    }

    #[test]
    fn test_abbreviations_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for book in BOOKS.iter() {
            for abbr in book.abbreviations() {
                assert!(seen.insert(*abbr), "duplicate abbreviation {abbr}");
            }
        }
    }

    #[test]
    fn test_resolve_by_name_and_abbreviation() {
        assert_eq!(resolve_book("john").unwrap().name, "John");
        assert_eq!(resolve_book("psa").unwrap().name, "Psalms");
        assert_eq!(resolve_book("3john").unwrap().name, "III John");
        assert_eq!(resolve_book("2chr").unwrap().name, "II Chronicles");
        assert_eq!(resolve_book("rev").unwrap().name, "Revelation of John");
        assert_eq!(resolve_book("song  of SOLOMON").unwrap().name, "Song of Solomon");
        assert_eq!(resolve_book("  Exo ").unwrap().name, "Exodus");
    }

    #[test]
    fn test_resolve_unknown_book() {
        let err = resolve_book("silmarillion").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input book='silmarillion'.");
    }

    #[test]
    fn test_testament_boundary() {
        assert_eq!(resolve_book("mal").unwrap().testament(), Testament::Old);
        assert_eq!(resolve_book("matt").unwrap().testament(), Testament::New);
    }
}
