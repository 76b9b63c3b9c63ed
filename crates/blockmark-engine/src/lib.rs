//! Block-level Markdown tokenizer.
//!
//! Source text is split into render-ready block tokens (headings, paragraphs,
//! lists, blockquotes, code, tables, raw HTML, thematic breaks) plus a table
//! of link-reference definitions, under one of four dialects: `normal`,
//! `gfm`, `tables` and `pedantic`. Inline content is left as text for an
//! inline tokenizer downstream.

pub mod error;
pub mod grammar;
pub mod highlight;
pub mod lexer;
pub mod links;
pub mod options;
pub mod snapshot;
pub mod token;

pub use error::{Error, HighlightError};
pub use highlight::{Highlighter, highlight_document, highlight_document_parallel};
pub use lexer::Lexer;
pub use links::{LinkDef, LinkTable};
pub use options::{Dialect, Options};
pub use token::*;

/// Tokenizes `src` with the dialect `options` select.
pub fn lex(src: &str, options: &Options) -> Document {
    Lexer::new(options).lex(src)
}

/// Like [`lex`], for input that has not been checked to be UTF-8 yet.
pub fn parse_bytes(bytes: &[u8], options: &Options) -> Result<Document, Error> {
    let src = std::str::from_utf8(bytes)?;
    Ok(lex(src, options))
}
