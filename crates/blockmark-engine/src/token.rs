//! Render-ready block tokens.
//!
//! Tokens hold only the fields a renderer needs and never refer back to
//! source positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::links::LinkTable;

/// A block-level token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    Space,
    /// Indented code block.
    Code(CodeBlock),
    /// Fenced code block.
    Fences(CodeBlock),
    /// ATX heading.
    Heading(Heading),
    /// Setext heading.
    #[serde(rename = "lheading")]
    LHeading(Heading),
    Hr,
    Blockquote {
        tokens: Vec<Token>,
    },
    List(List),
    Html(Html),
    Paragraph {
        text: String,
    },
    Table(Table),
    Text {
        text: String,
    },
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Space => TokenKind::Space,
            Token::Code(_) => TokenKind::Code,
            Token::Fences(_) => TokenKind::Fences,
            Token::Heading(_) => TokenKind::Heading,
            Token::LHeading(_) => TokenKind::LHeading,
            Token::Hr => TokenKind::Hr,
            Token::Blockquote { .. } => TokenKind::Blockquote,
            Token::List(_) => TokenKind::List,
            Token::Html(_) => TokenKind::Html,
            Token::Paragraph { .. } => TokenKind::Paragraph,
            Token::Table(_) => TokenKind::Table,
            Token::Text { .. } => TokenKind::Text,
        }
    }
}

/// Kinds of block tokens, including the two that never appear at the top of
/// a token stream: `item` lives inside a list and `def` only in the link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Space,
    Code,
    Fences,
    Heading,
    #[serde(rename = "lheading")]
    LHeading,
    Hr,
    Blockquote,
    List,
    Item,
    Html,
    Def,
    Paragraph,
    Table,
    Text,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Space => "space",
            TokenKind::Code => "code",
            TokenKind::Fences => "fences",
            TokenKind::Heading => "heading",
            TokenKind::LHeading => "lheading",
            TokenKind::Hr => "hr",
            TokenKind::Blockquote => "blockquote",
            TokenKind::List => "list",
            TokenKind::Item => "item",
            TokenKind::Html => "html",
            TokenKind::Def => "def",
            TokenKind::Paragraph => "paragraph",
            TokenKind::Table => "table",
            TokenKind::Text => "text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub text: String,
    pub lang: Option<String>,
    /// Set once a highlighter has replaced `text` with markup.
    #[serde(default)]
    pub escaped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    /// Number of the first item of an ordered list.
    pub start: Option<u64>,
    pub loose: bool,
    pub items: Vec<ListItem>,
}

/// One list item (kind `item`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub task: bool,
    pub checked: Option<bool>,
    pub loose: bool,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Html {
    pub text: String,
    /// The block is a `pre`, `script` or `style` element.
    pub pre: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    /// One entry per column; `None` when the delimiter cell has no colon.
    pub align: Vec<Option<Align>>,
    pub rows: Vec<Vec<String>>,
}

/// Output of one lexer run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub tokens: Vec<Token>,
    pub links: LinkTable,
}

/// One top-level lexer step: which rule matched and how much it consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub kind: TokenKind,
    pub len: usize,
}
