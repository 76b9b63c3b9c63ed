use std::str::Utf8Error;

use thiserror::Error;

/// Error returned by a [`crate::highlight::Highlighter`].
pub type HighlightError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input is not valid UTF-8: {0}")]
    InvalidInput(#[from] Utf8Error),

    #[error("highlighting code block {index} (lang: {}) failed: {source}", .lang.as_deref().unwrap_or("none"))]
    Highlight {
        index: usize,
        lang: Option<String>,
        source: HighlightError,
    },
}
