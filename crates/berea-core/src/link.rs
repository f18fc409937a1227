//! Links from a passage to an online reader.

use crate::reference::ReferenceScope;

/// Builds the URL a Markdown excerpt links back to.
pub trait LinkBuilder {
    fn link(&self, scope: &ReferenceScope, translation: &str) -> String;
}

/// Links into the STEP Bible reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepBible;

impl LinkBuilder for StepBible {
    fn link(&self, scope: &ReferenceScope, translation: &str) -> String {
        let abbr = scope.book().step_abbreviation();
        let reference = match scope {
            ReferenceScope::Book(_) => abbr.to_string(),
            ReferenceScope::Chapter(_, chapter) => format!("{abbr}.{chapter}"),
            ReferenceScope::Verse(_, chapter, verse) => format!("{abbr}.{chapter}.{verse}"),
            ReferenceScope::VerseRange(_, chapter, range) => format!(
                "{abbr}.{chapter}.{}-{abbr}.{chapter}.{}",
                range.start, range.end
            ),
        };

        format!("https://www.stepbible.org/?q=version={translation}@reference={reference}&options=NVHUG")
    }
}

/// Link text for a passage, e.g. `John 3:16-18 BSB`.
pub fn link_label(scope: &ReferenceScope, translation: &str) -> String {
    format!("{} {}", scope.citation(), translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::resolve_book;
    use crate::reference::VerseRange;

    #[test]
    fn test_step_links() {
        let john = resolve_book("john").unwrap();
        let cases = [
            (
                ReferenceScope::Verse(john, 3, 16),
                "https://www.stepbible.org/?q=version=BSB@reference=john.3.16&options=NVHUG",
            ),
            (
                ReferenceScope::VerseRange(john, 3, VerseRange { start: 16, end: 18 }),
                "https://www.stepbible.org/?q=version=BSB@reference=john.3.16-john.3.18&options=NVHUG",
            ),
            (
                ReferenceScope::Chapter(resolve_book("psalms").unwrap(), 117),
                "https://www.stepbible.org/?q=version=BSB@reference=psalm.117&options=NVHUG",
            ),
            (
                ReferenceScope::Book(resolve_book("III John").unwrap()),
                "https://www.stepbible.org/?q=version=BSB@reference=3john&options=NVHUG",
            ),
        ];

        for (scope, expected) in cases {
            assert_eq!(StepBible.link(&scope, "BSB"), expected);
        }
    }

    #[test]
    fn test_link_labels() {
        let john = resolve_book("john").unwrap();
        assert_eq!(link_label(&ReferenceScope::Verse(john, 3, 16), "BSB"), "John 3:16 BSB");
        assert_eq!(link_label(&ReferenceScope::Chapter(john, 3), "KJV"), "John 3 KJV");
        assert_eq!(link_label(&ReferenceScope::Book(john), "BSB"), "John BSB");
    }
}
