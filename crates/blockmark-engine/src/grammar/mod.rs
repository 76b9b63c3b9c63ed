//! # Block Grammar
//!
//! Four dialect tables built from one set of rule templates.
//!
//! ## Layering
//!
//! - **normal**: the base rule map; `fences`, `table` and `nptable` never match
//! - **gfm**: normal + fenced code, stricter ATX heading, and paragraphs that
//!   are also interrupted by fence openers and list items
//! - **tables**: gfm + the two table shapes
//! - **pedantic**: normal + legacy HTML and definition shapes
//!
//! Each dialect is the base map with an override map merged on top, resolved
//! once per process and shared immutably afterwards.
//!
//! ## Modules
//!
//! - **`compose`**: `Edit` / `Pattern` template composition
//! - **`source`**: raw templates and tag catalogs
//! - **`paragraph`**, **`list`**, **`fences`**, **`html`**, **`def`**: rules
//!   whose shape needs more than one regex (back references, look-ahead)

pub mod compose;
pub mod def;
pub mod fences;
pub mod html;
pub mod list;
pub mod paragraph;
pub mod source;

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use crate::options::Dialect;

use compose::{Edit, Match, Pattern, PatternError};
use def::DefRule;
use fences::FencesRule;
use html::{HtmlRule, LegacyHtmlRule};
use list::{ItemRule, ListRule};
use paragraph::{BlockquoteRule, ParagraphRule};

/// Name of a block rule; also the key of a grammar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleName {
    Newline,
    Code,
    Fences,
    Heading,
    NpTable,
    Hr,
    Blockquote,
    List,
    Html,
    Def,
    Table,
    LHeading,
    Paragraph,
    Text,
}

impl RuleName {
    /// Priority order shared by every dialect. The first matching rule wins.
    pub const PRIORITY: [RuleName; 14] = [
        RuleName::Newline,
        RuleName::Code,
        RuleName::Fences,
        RuleName::Heading,
        RuleName::NpTable,
        RuleName::Hr,
        RuleName::Blockquote,
        RuleName::List,
        RuleName::Html,
        RuleName::Def,
        RuleName::Table,
        RuleName::LHeading,
        RuleName::Paragraph,
        RuleName::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleName::Newline => "newline",
            RuleName::Code => "code",
            RuleName::Fences => "fences",
            RuleName::Heading => "heading",
            RuleName::NpTable => "nptable",
            RuleName::Hr => "hr",
            RuleName::Blockquote => "blockquote",
            RuleName::List => "list",
            RuleName::Html => "html",
            RuleName::Def => "def",
            RuleName::Table => "table",
            RuleName::LHeading => "lheading",
            RuleName::Paragraph => "paragraph",
            RuleName::Text => "text",
        }
    }

    /// Rules that only apply to top-level content, not inside list items.
    pub fn top_level_only(self) -> bool {
        matches!(
            self,
            RuleName::NpTable | RuleName::Def | RuleName::Table | RuleName::Paragraph
        )
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a grammar table.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Never matches.
    Disabled,
    Pattern(Pattern),
    Def(DefRule),
    Fences(FencesRule),
    Blockquote(BlockquoteRule),
    List(ListRule),
    Html(HtmlRule),
    LegacyHtml(LegacyHtmlRule),
    Paragraph(ParagraphRule),
}

impl Rule {
    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        match self {
            Rule::Disabled => None,
            Rule::Pattern(p) => p.exec(src),
            Rule::Def(r) => r.exec(src),
            Rule::Fences(r) => r.exec(src),
            Rule::Blockquote(r) => r.exec(src),
            Rule::List(r) => r.exec(src),
            Rule::Html(r) => r.exec(src),
            Rule::LegacyHtml(r) => r.exec(src),
            Rule::Paragraph(r) => r.exec(src),
        }
    }
}

/// Helper patterns the lexer applies to matched text.
#[derive(Debug, Clone)]
pub struct Helpers {
    /// Four leading spaces on every line of an indented code block.
    pub code_indent: Pattern,
    /// `>` markers on every line of a blockquote.
    pub quote_marker: Pattern,
    /// Marker and following spaces at the start of a list item.
    pub item_marker: Pattern,
    /// `[ ]` / `[x]` at the start of a list item.
    pub task: Pattern,
}

/// A resolved rule table for one dialect.
#[derive(Debug, Clone)]
pub struct Grammar {
    dialect: Dialect,
    rules: BTreeMap<RuleName, Rule>,
    helpers: Helpers,
}

impl Grammar {
    /// The shared table for `dialect`, built on first use.
    pub fn get(dialect: Dialect) -> &'static Grammar {
        static NORMAL: OnceLock<Grammar> = OnceLock::new();
        static GFM: OnceLock<Grammar> = OnceLock::new();
        static TABLES: OnceLock<Grammar> = OnceLock::new();
        static PEDANTIC: OnceLock<Grammar> = OnceLock::new();

        let cell = match dialect {
            Dialect::Normal => &NORMAL,
            Dialect::Gfm => &GFM,
            Dialect::Tables => &TABLES,
            Dialect::Pedantic => &PEDANTIC,
        };
        cell.get_or_init(|| Grammar::build(dialect).expect("Invalid block grammar"))
    }

    /// Builds the table for `dialect` from the rule templates.
    pub fn build(dialect: Dialect) -> Result<Self, PatternError> {
        let mut rules = normal_rules()?;
        let overrides = match dialect {
            Dialect::Normal => BTreeMap::new(),
            Dialect::Gfm => gfm_overrides()?,
            Dialect::Tables => {
                let mut overrides = gfm_overrides()?;
                overrides.extend(table_overrides()?);
                overrides
            }
            Dialect::Pedantic => pedantic_overrides()?,
        };
        rules.extend(overrides);
        log::debug!("built {dialect} block grammar ({} rules)", rules.len());

        Ok(Self {
            dialect,
            rules,
            helpers: helpers()?,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn order(&self) -> &'static [RuleName] {
        &RuleName::PRIORITY
    }

    pub fn rule(&self, name: RuleName) -> &Rule {
        static DISABLED: Rule = Rule::Disabled;
        self.rules.get(&name).unwrap_or(&DISABLED)
    }

    pub fn helpers(&self) -> &Helpers {
        &self.helpers
    }

    /// The item splitter embedded in this dialect's list rule.
    pub fn items(&self) -> Option<&ItemRule> {
        match self.rule(RuleName::List) {
            Rule::List(list) => Some(list.items()),
            _ => None,
        }
    }
}

/// Length of the first line of `s`, excluding its newline.
pub(crate) fn line_len(s: &str) -> usize {
    s.find('\n').unwrap_or(s.len())
}

fn pattern(name: &'static str, template: &str) -> Result<Pattern, PatternError> {
    Edit::new(template).build(name)
}

fn def_pattern() -> Result<Pattern, PatternError> {
    Edit::new(source::DEF)
        .replace("label", source::LABEL)
        .replace("title", source::TITLE)
        .build("def")
}

fn paragraph_interrupt(extra: &str) -> Result<Pattern, PatternError> {
    Edit::new(source::PARAGRAPH_INTERRUPT)
        .replace("extra", extra)
        .replace("hr", source::HR)
        .replace("heading", source::HEADING)
        .replace("lheading", source::LHEADING)
        .replace("tag", source::BLOCK_TAGS)
        .build("paragraph")
}

fn list_head() -> Result<Pattern, PatternError> {
    Edit::new(source::LIST_HEAD)
        .replace("bullet", source::BULLET)
        .build("item")
}

fn normal_rules() -> Result<BTreeMap<RuleName, Rule>, PatternError> {
    let interrupt = paragraph_interrupt("")?;
    let list = ListRule::new(
        ItemRule::new(list_head()?),
        pattern("list_hr", source::LIST_HR)?,
        def_pattern()?,
    );
    let html = HtmlRule {
        verbatim: Edit::new(source::VERBATIM_OPEN).ignore_case().build("html")?,
        comment: pattern("comment", source::COMMENT)?,
        instruction: pattern("instruction", source::INSTRUCTION)?,
        declaration: Edit::new(source::DECLARATION).ignore_case().build("declaration")?,
        cdata: pattern("cdata", source::CDATA)?,
        block_tag: Edit::new(source::BLOCK_TAG)
            .replace("tag", source::BLOCK_TAGS)
            .ignore_case()
            .build("block_tag")?,
        open_tag: Edit::new(source::OPEN_TAG)
            .replace("attribute", source::ATTRIBUTE)
            .ignore_case()
            .build("open_tag")?,
        close_tag: Edit::new(source::CLOSE_TAG).ignore_case().build("close_tag")?,
    };

    Ok(BTreeMap::from([
        (RuleName::Newline, Rule::Pattern(pattern("newline", source::NEWLINE)?)),
        (RuleName::Code, Rule::Pattern(pattern("code", source::CODE)?)),
        (RuleName::Fences, Rule::Disabled),
        (RuleName::Heading, Rule::Pattern(pattern("heading", source::HEADING)?)),
        (RuleName::NpTable, Rule::Disabled),
        (RuleName::Hr, Rule::Pattern(pattern("hr", source::HR)?)),
        (
            RuleName::Blockquote,
            Rule::Blockquote(BlockquoteRule::new(
                pattern("blockquote", source::QUOTE_MARKER)?,
                interrupt.clone(),
            )),
        ),
        (RuleName::List, Rule::List(list)),
        (RuleName::Html, Rule::Html(html)),
        (RuleName::Def, Rule::Def(DefRule::new(def_pattern()?))),
        (RuleName::Table, Rule::Disabled),
        (RuleName::LHeading, Rule::Pattern(pattern("lheading", source::LHEADING)?)),
        (RuleName::Paragraph, Rule::Paragraph(ParagraphRule::new(interrupt))),
        (RuleName::Text, Rule::Pattern(pattern("text", source::TEXT)?)),
    ]))
}

fn gfm_overrides() -> Result<BTreeMap<RuleName, Rule>, PatternError> {
    let list_item = Edit::new(source::LIST_ITEM_LINE)
        .replace("bullet", source::BULLET)
        .source()
        .to_string();
    let extra = format!("{}|{}|", source::FENCE_OPEN, list_item);

    Ok(BTreeMap::from([
        (
            RuleName::Fences,
            Rule::Fences(FencesRule::new(pattern("fences", source::FENCE_HEAD)?)),
        ),
        (
            RuleName::Heading,
            Rule::Pattern(pattern("heading", source::GFM_HEADING)?),
        ),
        (
            RuleName::Paragraph,
            Rule::Paragraph(ParagraphRule::new(paragraph_interrupt(&extra)?)),
        ),
    ]))
}

fn table_overrides() -> Result<BTreeMap<RuleName, Rule>, PatternError> {
    Ok(BTreeMap::from([
        (RuleName::NpTable, Rule::Pattern(pattern("nptable", source::NPTABLE)?)),
        (RuleName::Table, Rule::Pattern(pattern("table", source::TABLE)?)),
    ]))
}

fn pedantic_overrides() -> Result<BTreeMap<RuleName, Rule>, PatternError> {
    Ok(BTreeMap::from([
        (
            RuleName::Html,
            Rule::LegacyHtml(LegacyHtmlRule {
                comment: pattern("comment", source::COMMENT)?,
                open_tag: pattern("html", source::LEGACY_OPEN_TAG)?,
            }),
        ),
        (
            RuleName::Def,
            Rule::Def(DefRule::new(pattern("def", source::PEDANTIC_DEF)?)),
        ),
    ]))
}

fn helpers() -> Result<Helpers, PatternError> {
    Ok(Helpers {
        code_indent: Edit::new("^ {4}").multi_line().build("code_indent")?,
        quote_marker: Edit::new(source::QUOTE_STRIP)
            .multi_line()
            .build("quote_marker")?,
        item_marker: Edit::new(source::ITEM_MARKER)
            .replace("bullet", source::BULLET)
            .build("item_marker")?,
        task: pattern("task", source::TASK)?,
    })
}
