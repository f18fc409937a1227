pub mod books;
pub mod config;
pub mod error;
pub mod link;
pub mod reference;
pub mod render;
pub mod scripture;
pub mod search;
pub mod translations;
pub mod wrap;

// Re-export main types for convenience
pub use books::{resolve_book, Book, BOOKS};
pub use config::Config;
pub use error::InvalidInput;
pub use link::{link_label, LinkBuilder, StepBible};
pub use reference::{ReferenceScope, VerseRange};
pub use render::{Format, PassageRenderer, RenderOptions};
pub use scripture::{BibleDb, VerseRecord};
pub use search::{render_search, Highlight, SearchQuery, SearchResultRow, SearchScope, Testament};
pub use wrap::{wrap, WRAP_WIDTH};
