//! Raw rule templates. `{name}` marks a placeholder filled by [`super::compose::Edit`].

pub const NEWLINE: &str = r"^\n+";
pub const CODE: &str = r"^(?: {4}[^\n]+\n*)+";
pub const HR: &str = r"^ {0,3}(?:(?:- *){3,}|(?:_ *){3,}|(?:\* *){3,})(?:\n+|$)";
pub const HEADING: &str = r"^ *(#{1,6}) *([^\n]+?) *(?:#+ *)?(?:\n+|$)";
pub const GFM_HEADING: &str = r"^ *(#{1,6}) +([^\n]+?) *#* *(?:\n+|$)";
pub const LHEADING: &str = r"^([^\n]+)\n *(=|-){2,} *(?:\n+|$)";
pub const TEXT: &str = r"^[^\n]+";

pub const BULLET: &str = r"(?:[*+-]|\d+\.)";
/// Opening of a list item: indentation, marker, one space.
pub const LIST_HEAD: &str = r"^( *)({bullet}) ";
/// A thematic break as it may appear right after a list, without leading indentation.
pub const LIST_HR: &str = r"^(?:(?:- *){3,}|(?:_ *){3,}|(?:\* *){3,})(?:\n+|$)";
pub const ITEM_MARKER: &str = r"^ *({bullet}) +";
pub const TASK: &str = r"^\[([ xX])\] +";

pub const LABEL: &str = r"(?:\\[\[\]]|[^\[\]])+";
pub const TITLE: &str = r#"(?:"(?:\\"?|[^"\\])*"|'[^'\n]*(?:\n[^'\n]+)*\n?'|\([^()]*\))"#;
pub const DEF: &str =
    r"^ {0,3}\[({label})\]: *\n? *<?([^\s>]+)>?(?:(?: +\n? *| *\n *)({title}))? *(?:\n+|$)";
pub const PEDANTIC_DEF: &str =
    r#"^ *\[([^\]]+)\]: *<?([^\s>]+)>?(?: +(["(][^\n]+[")]))? *(?:\n+|$)"#;

pub const QUOTE_MARKER: &str = r"^ {0,3}> ?";
pub const QUOTE_STRIP: &str = r"^ *> ?";

/// Lines that end a paragraph instead of continuing it.
pub const PARAGRAPH_INTERRUPT: &str = r"^(?:{extra}{hr}|{heading}|{lheading}| {0,3}>|</?(?:{tag})(?: +|\n|/?>)|<(?:script|pre|style|!--))";
pub const FENCE_OPEN: &str = r"^ {0,3}(?:`{3,}[^`\n]*|~{3,}[^\n]*)(?:\n|$)";
pub const LIST_ITEM_LINE: &str = r"^ *{bullet} [\s\S]";

pub const FENCE_HEAD: &str = r"^ {0,3}(`{3,}|~{3,})([^\n]*)(?:\n|$)";

pub const TABLE: &str = r"^ *\|(.+)\n *\|?( *[-:]+[-| :]*)(?:\n((?: *[^>\n ].*(?:\n|$))*)\n*|$)";
pub const NPTABLE: &str =
    r"^ *([^|\n ].*\|.*)\n *([-:]+ *\|[-| :]*)(?:\n((?:.*[^>\n ].*(?:\n|$))*)\n*|$)";

pub const COMMENT: &str = r"^<!--[\s\S]*?-->";
pub const VERBATIM_OPEN: &str = r"^<(script|pre|style)[\s>]";
pub const INSTRUCTION: &str = r"^<\?[\s\S]*?\?>\n*";
pub const DECLARATION: &str = r"^<![A-Z][\s\S]*?>\n*";
pub const CDATA: &str = r"^<!\[CDATA\[[\s\S]*?\]\]>\n*";
pub const BLOCK_TAG: &str = r"^</?(?:{tag})(?: +|\n|/?>)[\s\S]*?(?:\n{2,}|$)";
pub const OPEN_TAG: &str = r"^<([a-z][\w-]*)(?:{attribute})*? */?>";
pub const CLOSE_TAG: &str = r"^</([a-z][\w-]*)\s*>";
pub const ATTRIBUTE: &str =
    r#" +[a-zA-Z:_][\w.:-]*(?: *= *"[^"\n]*"| *= *'[^'\n]*'| *= *[^\s"'=<>`]+)?"#;

pub const LEGACY_OPEN_TAG: &str = r#"^<(\w+)(?:"[^"]*"|'[^']*'|\s[^'"/>\s]*)*?/?> *(?:\n{2,}|\s*$)"#;

/// Block-level element names that start a raw HTML block.
pub const BLOCK_TAGS: &str = "address|article|aside|base|basefont|blockquote|body|caption\
|center|col|colgroup|dd|details|dialog|dir|div|dl|dt|fieldset|figcaption\
|figure|footer|form|frame|frameset|h[1-6]|head|header|hr|html|iframe\
|legend|li|link|main|menu|menuitem|meta|nav|noframes|ol|optgroup|option\
|p|param|section|source|summary|table|tbody|td|tfoot|th|thead|title|tr\
|track|ul";

/// Inline element names that never start a pedantic HTML block.
pub const INLINE_TAGS: &[&str] = &[
    "a", "em", "strong", "small", "s", "cite", "q", "dfn", "abbr", "data", "time", "code", "var",
    "samp", "kbd", "sub", "sup", "i", "b", "u", "mark", "ruby", "rt", "rp", "bdi", "bdo", "span",
    "br", "wbr", "ins", "del", "img",
];

/// Elements whose content is kept verbatim up to the matching close tag.
pub const VERBATIM_TAGS: &[&str] = &["script", "pre", "style"];
