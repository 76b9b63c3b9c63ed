//! # Block Lexer
//!
//! Partitions normalized Markdown into block tokens using one dialect's
//! [`Grammar`]. Each step tries the rules in priority order and the first
//! match wins. Blockquote content is re-tokenized with the caller's `top`
//! flag; list item content is re-tokenized with `top = false`, which turns off
//! `def`, `table`, `nptable` and `paragraph`, so item lines become `text`.
//!
//! Recursion is bounded by [`Options::max_depth`]. Past the bound the
//! blockquote and list rules are skipped and the content falls through to the
//! remaining rules.

mod list;
mod table;

use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

use crate::{
    grammar::{Grammar, RuleName, compose::Match, source::VERBATIM_TAGS},
    links::{LinkDef, LinkTable},
    options::{Dialect, Options},
    token::{CodeBlock, Document, Heading, Html, Step, Token, TokenKind},
};

fn blank_line_regex() -> &'static Regex {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    BLANK_LINE.get_or_init(|| Regex::new(r"(?m)^ +$").expect("Invalid blank line regex"))
}

/// Lines made only of spaces become empty.
fn blank_lines(src: &str) -> Cow<'_, str> {
    blank_line_regex().replace_all(src, "")
}

/// Accumulated output of one lexer run.
#[derive(Debug, Default)]
pub(crate) struct State {
    links: LinkTable,
    steps: Vec<Step>,
}

/// What a matched rule contributes to the token stream.
enum Outcome {
    Token(Token),
    /// Consumed without a token (single newline, definition).
    Silent,
    /// The shape matched but its content is invalid; try the next rule.
    Reject,
}

#[derive(Debug, Clone)]
pub struct Lexer {
    grammar: &'static Grammar,
    dialect: Dialect,
    pedantic: bool,
    max_depth: usize,
}

impl Lexer {
    pub fn new(options: &Options) -> Self {
        let dialect = options.dialect();
        Self {
            grammar: Grammar::get(dialect),
            dialect,
            pedantic: dialect == Dialect::Pedantic,
            max_depth: options.max_depth,
        }
    }

    /// Unifies line endings, expands tabs to four spaces, turns no-break
    /// spaces into spaces and U+2424 into newlines, then empties
    /// whitespace-only lines.
    pub fn normalize(src: &str) -> String {
        let src = src
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace('\t', "    ")
            .replace('\u{00a0}', " ")
            .replace('\u{2424}', "\n");
        blank_lines(&src).into_owned()
    }

    pub fn lex(&self, src: &str) -> Document {
        let (tokens, state) = self.run(src);
        Document {
            tokens,
            links: state.links,
        }
    }

    /// The top-level steps of a run. Their lengths add up to the length of
    /// [`Lexer::normalize`]d input.
    pub fn partition(&self, src: &str) -> Vec<Step> {
        self.run(src).1.steps
    }

    fn run(&self, src: &str) -> (Vec<Token>, State) {
        let src = Self::normalize(src);
        log::debug!(
            "lexing {} bytes with the {} grammar",
            src.len(),
            self.dialect
        );
        let mut state = State::default();
        let tokens = self.tokenize(&src, true, 0, &mut state);
        (tokens, state)
    }

    pub(crate) fn tokenize(
        &self,
        src: &str,
        top: bool,
        depth: usize,
        state: &mut State,
    ) -> Vec<Token> {
        let src = blank_lines(src);
        let mut rest: &str = &src;
        let mut tokens = Vec::new();
        while !rest.is_empty() {
            let step = self.step(rest, top, depth, state, &mut tokens);
            if depth == 0 {
                state.steps.push(step);
            }
            rest = &rest[step.len..];
        }
        tokens
    }

    fn step(
        &self,
        src: &str,
        top: bool,
        depth: usize,
        state: &mut State,
        tokens: &mut Vec<Token>,
    ) -> Step {
        for &name in self.grammar.order() {
            if !top && name.top_level_only() {
                continue;
            }
            let Some(m) = self.grammar.rule(name).exec(src) else {
                continue;
            };
            if m.is_empty() {
                continue;
            }
            if matches!(name, RuleName::Blockquote | RuleName::List) && depth >= self.max_depth {
                log::warn!(
                    "nesting deeper than {} levels, {name} left to the following rules",
                    self.max_depth
                );
                continue;
            }

            match self.emit(name, &m, top, depth, state) {
                Outcome::Reject => continue,
                Outcome::Token(token) => tokens.push(token),
                Outcome::Silent => {}
            }
            log::trace!("{name} consumed {} bytes at depth {depth}", m.len());
            return Step {
                kind: kind_of(name),
                len: m.len(),
            };
        }

        // The text rule accepts any non-empty line and newline any newline
        // run, so nothing should get here.
        let len = src.chars().next().map_or(1, char::len_utf8);
        log::error!("no block rule matched at {:?}", &src[..len]);
        debug_assert!(false, "no block rule matched");
        tokens.push(Token::Text {
            text: src[..len].to_string(),
        });
        Step {
            kind: TokenKind::Text,
            len,
        }
    }

    fn emit(
        &self,
        name: RuleName,
        m: &Match<'_>,
        top: bool,
        depth: usize,
        state: &mut State,
    ) -> Outcome {
        let helpers = self.grammar.helpers();
        let token = match name {
            RuleName::Newline if m.len() > 1 => Token::Space,
            RuleName::Newline => return Outcome::Silent,
            RuleName::Code => {
                let text = helpers.code_indent.strip_all(m.as_str());
                let text = if self.pedantic {
                    text.into_owned()
                } else {
                    text.trim_end_matches('\n').to_string()
                };
                Token::Code(CodeBlock {
                    text,
                    lang: None,
                    escaped: false,
                })
            }
            RuleName::Fences => Token::Fences(CodeBlock {
                text: m.group(3).unwrap_or("").to_string(),
                lang: m.group(2).map(str::to_string),
                escaped: false,
            }),
            RuleName::Heading => Token::Heading(Heading {
                level: m.group(1).map_or(1, str::len) as u8,
                text: m.group(2).unwrap_or("").to_string(),
            }),
            RuleName::LHeading => Token::LHeading(Heading {
                level: if m.group(2) == Some("=") { 1 } else { 2 },
                text: m.group(1).unwrap_or("").to_string(),
            }),
            RuleName::Hr => Token::Hr,
            RuleName::Blockquote => {
                let inner = helpers.quote_marker.strip_all(m.as_str());
                Token::Blockquote {
                    tokens: self.tokenize(&inner, top, depth + 1, state),
                }
            }
            RuleName::List => Token::List(self.list(m, depth, state)),
            RuleName::Html => Token::Html(Html {
                text: m.as_str().to_string(),
                pre: m
                    .group(1)
                    .is_some_and(|tag| VERBATIM_TAGS.iter().any(|v| tag.eq_ignore_ascii_case(v))),
            }),
            RuleName::Def => {
                let label = m.group(1).unwrap_or("");
                let def = LinkDef {
                    destination: m.group(2).unwrap_or("").to_string(),
                    title: m.group(3).map(strip_title_delimiters),
                };
                if !state.links.insert(label, def) {
                    log::debug!("duplicate definition for [{label}] ignored");
                }
                return Outcome::Silent;
            }
            RuleName::NpTable | RuleName::Table => {
                match table::build(m, name == RuleName::Table) {
                    Some(table) => Token::Table(table),
                    None => return Outcome::Reject,
                }
            }
            RuleName::Paragraph => Token::Paragraph {
                text: m.group(1).unwrap_or("").to_string(),
            },
            RuleName::Text => Token::Text {
                text: m.as_str().to_string(),
            },
        };
        Outcome::Token(token)
    }
}

fn kind_of(name: RuleName) -> TokenKind {
    match name {
        RuleName::Newline => TokenKind::Space,
        RuleName::Code => TokenKind::Code,
        RuleName::Fences => TokenKind::Fences,
        RuleName::Heading => TokenKind::Heading,
        RuleName::NpTable | RuleName::Table => TokenKind::Table,
        RuleName::Hr => TokenKind::Hr,
        RuleName::Blockquote => TokenKind::Blockquote,
        RuleName::List => TokenKind::List,
        RuleName::Html => TokenKind::Html,
        RuleName::Def => TokenKind::Def,
        RuleName::LHeading => TokenKind::LHeading,
        RuleName::Paragraph => TokenKind::Paragraph,
        RuleName::Text => TokenKind::Text,
    }
}

/// `"t"`, `'t'` and `(t)` all become `t`.
fn strip_title_delimiters(title: &str) -> String {
    let mut chars = title.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

#[cfg(test)]
mod tests;
