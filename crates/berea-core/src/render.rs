//! Passage layout: verses joined into a wrapped wall of text, optionally
//! framed as a Markdown excerpt with a link back to the source.

use crate::link::{link_label, LinkBuilder};
use crate::reference::ReferenceScope;
use crate::scripture::VerseRecord;
use crate::wrap::{wrap, WRAP_WIDTH};

const RULE: &str = "______________________________________________________________________";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Markdown,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Markdown => "md",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Some(Format::Text),
            "md" | "markdown" => Some(Format::Markdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub format: Format,
    pub verse_numbers: bool,
}

/// Renders fetched verses for one requested passage.
pub struct PassageRenderer<'a> {
    translation: &'a str,
    links: &'a dyn LinkBuilder,
    options: RenderOptions,
}

impl<'a> PassageRenderer<'a> {
    pub fn new(translation: &'a str, links: &'a dyn LinkBuilder, options: RenderOptions) -> Self {
        Self {
            translation,
            links,
            options,
        }
    }

    pub fn render(&self, scope: &ReferenceScope, records: &[VerseRecord]) -> String {
        let text = self.wall_of_text(records);

        match self.options.format {
            Format::Text => text,
            Format::Markdown => format!(
                "###\n\n{RULE}\n\n{text}\n([{}]({}))\n\n{RULE}",
                link_label(scope, self.translation),
                self.links.link(scope, self.translation),
            ),
        }
    }

    /// Verses joined by single spaces and wrapped at [`WRAP_WIDTH`]. Verses
    /// with no text are skipped together with their number. The trailing
    /// space after the last verse is kept.
    pub fn wall_of_text(&self, records: &[VerseRecord]) -> String {
        let mut verses = String::new();

        for record in records.iter().filter(|r| !r.text.is_empty()) {
            if self.options.verse_numbers {
                match self.options.format {
                    Format::Text => verses.push_str(&format!("{} ", record.verse)),
                    Format::Markdown => verses.push_str(&format!("<sup>{}</sup> ", record.verse)),
                }
            }
            verses.push_str(record.text.trim());
            verses.push(' ');
        }

        wrap(&verses, WRAP_WIDTH).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::resolve_book;
    use crate::link::StepBible;
    use crate::reference::VerseRange;

    fn record(verse: u32, text: &str) -> VerseRecord {
        VerseRecord {
            book: "John".to_string(),
            chapter: 3,
            verse,
            text: text.to_string(),
        }
    }

    fn john_3_16_18() -> Vec<VerseRecord> {
        vec![
            record(16, "For God so loved the world that He gave His one and only Son, that everyone who believes in Him shall not perish but have eternal life."),
            record(17, "For God did not send His Son into the world to condemn the world, but to save the world through Him."),
            record(18, "Whoever believes in Him is not condemned, but whoever does not believe has already been condemned, because he has not believed in the name of God’s one and only Son."),
        ]
    }

    fn range() -> ReferenceScope {
        ReferenceScope::VerseRange(resolve_book("john").unwrap(), 3, VerseRange { start: 16, end: 18 })
    }

    fn render(options: RenderOptions, scope: &ReferenceScope, records: &[VerseRecord]) -> String {
        PassageRenderer::new("BSB", &StepBible, options).render(scope, records)
    }

    #[test]
    fn test_text_without_numbers() {
        let out = render(RenderOptions::default(), &range(), &john_3_16_18());
        assert_eq!(
            out,
            "For God so loved the world that He gave His one and only Son, that everyone\n\
             who believes in Him shall not perish but have eternal life. For God did not\n\
             send His Son into the world to condemn the world, but to save the world\n\
             through Him. Whoever believes in Him is not condemned, but whoever does not\n\
             believe has already been condemned, because he has not believed in the name of\n\
             God’s one and only Son. "
        );
    }

    #[test]
    fn test_text_with_numbers() {
        let options = RenderOptions {
            format: Format::Text,
            verse_numbers: true,
        };
        let out = render(options, &range(), &john_3_16_18());
        assert_eq!(
            out,
            "16 For God so loved the world that He gave His one and only Son, that everyone\n\
             who believes in Him shall not perish but have eternal life. 17 For God did not\n\
             send His Son into the world to condemn the world, but to save the world\n\
             through Him. 18 Whoever believes in Him is not condemned, but whoever does not\n\
             believe has already been condemned, because he has not believed in the name of\n\
             God’s one and only Son. "
        );
    }

    #[test]
    fn test_markdown_excerpt() {
        let options = RenderOptions {
            format: Format::Markdown,
            verse_numbers: false,
        };
        let scope = ReferenceScope::Verse(resolve_book("john").unwrap(), 3, 16);
        let out = render(options, &scope, &john_3_16_18()[..1]);
        assert_eq!(
            out,
            "###\n\n\
             ______________________________________________________________________\n\n\
             For God so loved the world that He gave His one and only Son, that everyone\n\
             who believes in Him shall not perish but have eternal life. \n\
             ([John 3:16 BSB](https://www.stepbible.org/?q=version=BSB@reference=john.3.16&options=NVHUG))\n\n\
             ______________________________________________________________________"
        );
    }

    #[test]
    fn test_markdown_superscript_numbers() {
        let options = RenderOptions {
            format: Format::Markdown,
            verse_numbers: true,
        };
        let out = render(options, &range(), &john_3_16_18());
        let body = "<sup>16</sup> For God so loved the world that He gave His one and only Son,\n\
             that everyone who believes in Him shall not perish but have eternal life.\n\
             <sup>17</sup> For God did not send His Son into the world to condemn the\n\
             world, but to save the world through Him. <sup>18</sup> Whoever believes in\n\
             Him is not condemned, but whoever does not believe has already been condemned,\n\
             because he has not believed in the name of God’s one and only Son. \n\
             ([John 3:16-18 BSB](https://www.stepbible.org/?q=version=BSB@reference=john.3.16-john.3.18&options=NVHUG))";
        assert!(out.contains(body), "{out}");
    }

    #[test]
    fn test_empty_verses_are_skipped_with_their_numbers() {
        let records = vec![
            record(43, "If your hand causes you to sin, cut it off."),
            record(44, ""),
            record(45, "If your foot causes you to sin, cut it off."),
        ];
        let options = RenderOptions {
            format: Format::Text,
            verse_numbers: true,
        };
        let out = render(options, &range(), &records);
        assert_eq!(
            out,
            "43 If your hand causes you to sin, cut it off. 45 If your foot causes you to\n\
             sin, cut it off. "
        );
        assert!(!out.contains("44"));
    }

    #[test]
    fn test_verse_text_is_trimmed() {
        let records = vec![record(1, "  Jesus wept.  ")];
        let out = render(RenderOptions::default(), &range(), &records);
        assert_eq!(out, "Jesus wept. ");
    }

    #[test]
    fn test_format_names() {
        for format in [Format::Text, Format::Markdown] {
            assert_eq!(Format::from_str(format.as_str()), Some(format));
        }
        assert_eq!(Format::from_str("pdf"), None);
    }
}
