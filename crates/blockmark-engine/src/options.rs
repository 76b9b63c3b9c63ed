use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four block grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Normal,
    Gfm,
    Tables,
    Pedantic,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Normal,
        Dialect::Gfm,
        Dialect::Tables,
        Dialect::Pedantic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Normal => "normal",
            Dialect::Gfm => "gfm",
            Dialect::Tables => "tables",
            Dialect::Pedantic => "pedantic",
        }
    }

    /// Whether `[ ]` / `[x]` list items are recognized.
    pub fn task_items(self) -> bool {
        matches!(self, Dialect::Gfm | Dialect::Tables)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown dialect `{0}` (expected normal, gfm, tables or pedantic)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDialect(s.to_string()))
    }
}

/// Lexer and renderer settings.
///
/// Only `gfm`, `tables`, `pedantic` and `max_depth` change how blocks are
/// tokenized. The remaining fields belong to the inline tokenizer and the
/// renderer and are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub gfm: bool,
    pub tables: bool,
    pub pedantic: bool,
    /// Maximum blockquote/list nesting that is still tokenized recursively.
    pub max_depth: usize,

    pub breaks: bool,
    pub sanitize: bool,
    pub silent: bool,
    pub smartypants: bool,
    pub header_ids: bool,
    pub header_prefix: String,
    pub lang_prefix: String,
    pub mangle: bool,
    pub xhtml: bool,
    pub base_url: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            gfm: true,
            tables: true,
            pedantic: false,
            max_depth: 64,
            breaks: false,
            sanitize: false,
            silent: false,
            smartypants: false,
            header_ids: true,
            header_prefix: String::new(),
            lang_prefix: "language-".to_string(),
            mangle: true,
            xhtml: false,
            base_url: None,
        }
    }
}

impl Options {
    /// Options preset for one dialect, everything else at its default.
    pub fn for_dialect(dialect: Dialect) -> Self {
        let mut options = Self::default();
        options.set_dialect(dialect);
        options
    }

    /// The grammar these flags select. `pedantic` wins over `gfm`; `tables`
    /// only has an effect together with `gfm`.
    pub fn dialect(&self) -> Dialect {
        if self.pedantic {
            Dialect::Pedantic
        } else if self.gfm && self.tables {
            Dialect::Tables
        } else if self.gfm {
            Dialect::Gfm
        } else {
            Dialect::Normal
        }
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        let (gfm, tables, pedantic) = match dialect {
            Dialect::Normal => (false, false, false),
            Dialect::Gfm => (true, false, false),
            Dialect::Tables => (true, true, false),
            Dialect::Pedantic => (false, false, true),
        };
        self.gfm = gfm;
        self.tables = tables;
        self.pedantic = pedantic;
    }
}
