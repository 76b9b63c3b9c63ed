use super::{
    compose::{Match, Pattern},
    line_len,
    source::{INLINE_TAGS, VERBATIM_TAGS},
};

/// Raw HTML block, tried shape by shape in a fixed order:
///
/// 1. `script`, `pre` or `style` element, up to its close tag
/// 2. comment
/// 3. processing instruction
/// 4. declaration
/// 5. CDATA section
/// 6. block-level tag from the catalog, up to a blank line
/// 7. any other open or close tag alone on its line, up to a blank line
///
/// Captures: 1 = element name when the block is a verbatim element.
#[derive(Debug, Clone)]
pub struct HtmlRule {
    pub(super) verbatim: Pattern,
    pub(super) comment: Pattern,
    pub(super) instruction: Pattern,
    pub(super) declaration: Pattern,
    pub(super) cdata: Pattern,
    pub(super) block_tag: Pattern,
    pub(super) open_tag: Pattern,
    pub(super) close_tag: Pattern,
}

impl HtmlRule {
    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        let indent = src.bytes().take(3).take_while(|&b| b == b' ').count();
        let rest = &src[indent..];
        if !rest.starts_with('<') {
            return None;
        }

        if let Some(name) = self.verbatim.exec(rest).and_then(|m| m.group(1)) {
            let len = verbatim_len(rest, name);
            return Some(Match::new(&src[..indent + len], [Some(name)]));
        }

        let len = self
            .comment_len(rest)
            .or_else(|| self.instruction.exec(rest).map(|m| m.len()))
            .or_else(|| self.declaration.exec(rest).map(|m| m.len()))
            .or_else(|| self.cdata.exec(rest).map(|m| m.len()))
            .or_else(|| self.block_tag.exec(rest).map(|m| m.len()))
            .or_else(|| self.lone_tag_len(rest))?;
        Some(Match::new(&src[..indent + len], [None]))
    }

    fn comment_len(&self, rest: &str) -> Option<usize> {
        let after_open = rest.strip_prefix("<!--")?;
        if after_open.starts_with('>') || after_open.starts_with("->") {
            return None;
        }
        let comment = self.comment.exec(rest)?;
        Some(through_line_and_newlines(rest, comment.len()))
    }

    fn lone_tag_len(&self, rest: &str) -> Option<usize> {
        let tag = match self.open_tag.exec(rest) {
            Some(open) => {
                let name = open.group(1)?.to_ascii_lowercase();
                if VERBATIM_TAGS.iter().any(|v| name.starts_with(v)) {
                    return None;
                }
                open.len()
            }
            None => {
                let close = self.close_tag.exec(rest)?;
                let name = close.group(1)?.to_ascii_lowercase();
                if VERBATIM_TAGS.iter().any(|v| name.starts_with(v)) {
                    return None;
                }
                close.len()
            }
        };
        let line_rest = &rest[tag..tag + line_len(&rest[tag..])];
        if !line_rest.trim_matches([' ', '\t']).is_empty() || tag + line_rest.len() == rest.len() {
            return None;
        }
        Some(until_blank_line(rest, tag))
    }
}

/// Length of a `script`/`pre`/`style` element: through the line holding the
/// close tag plus following newlines, or the whole input when unclosed.
fn verbatim_len(rest: &str, name: &str) -> usize {
    let lower = rest.to_ascii_lowercase();
    let close = format!("</{}>", name.to_ascii_lowercase());
    let mut from = 0;
    while let Some(found) = lower[from..].find(&close) {
        let close_end = from + found + close.len();
        let line_end = close_end + line_len(&rest[close_end..]);
        if line_end < rest.len() {
            return line_end + rest[line_end..].bytes().take_while(|&b| b == b'\n').count();
        }
        from = close_end;
    }
    rest.len()
}

fn through_line_and_newlines(rest: &str, from: usize) -> usize {
    let line_end = from + line_len(&rest[from..]);
    line_end + rest[line_end..].bytes().take_while(|&b| b == b'\n').count()
}

/// Consumes from `from` up to and including the first run of two or more
/// newlines, or to the end of input.
fn until_blank_line(rest: &str, from: usize) -> usize {
    match rest[from..].find("\n\n") {
        Some(found) => {
            let run_start = from + found;
            run_start + rest[run_start..].bytes().take_while(|&b| b == b'\n').count()
        }
        None => rest.len(),
    }
}

/// Legacy HTML block shapes used by the pedantic dialect: a comment, a
/// closed element pair, or a lone open tag, each followed by a blank line or
/// end of input. Inline element names and autolink-like tags never match.
///
/// Captures: 1 = element name for the closed pair shape.
#[derive(Debug, Clone)]
pub struct LegacyHtmlRule {
    pub(super) comment: Pattern,
    pub(super) open_tag: Pattern,
}

impl LegacyHtmlRule {
    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        let indent = src.bytes().take_while(|&b| b == b' ').count();
        let rest = &src[indent..];
        if !rest.starts_with('<') {
            return None;
        }
        if let Some(len) = self.comment_len(rest) {
            return Some(Match::new(&src[..indent + len], [None]));
        }
        let name = legacy_tag_name(rest)?;
        if let Some(len) = closed_pair_len(rest, name) {
            return Some(Match::new(&src[..indent + len], [Some(name)]));
        }
        let open = self.open_tag.exec(rest)?;
        Some(Match::new(&src[..indent + open.len()], [None]))
    }

    fn comment_len(&self, rest: &str) -> Option<usize> {
        let after_open = rest.strip_prefix("<!--")?;
        if after_open.starts_with('>') || after_open.starts_with("->") {
            return None;
        }
        self.comment.exec(rest)?;
        let mut from = 4;
        while let Some(found) = rest[from..].find("-->") {
            let close_end = from + found + 3;
            let tail = &rest[close_end..];
            let spaces = tail.bytes().take_while(|&b| b == b' ').count();
            if tail[spaces..].starts_with('\n') {
                return Some(close_end + spaces + 1);
            }
            if tail.trim().is_empty() {
                return Some(rest.len());
            }
            from = close_end;
        }
        None
    }
}

/// The tag name after `<`, unless it is an inline element or looks like an
/// autolink (`<http:…>`) or e-mail address.
fn legacy_tag_name(rest: &str) -> Option<&str> {
    let body = &rest[1..];
    let len = body
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map_or(body.len(), |(i, _)| i);
    if len == 0 {
        return None;
    }
    let name = &body[..len];
    if INLINE_TAGS.contains(&name) {
        return None;
    }
    let after = &body[len..];
    if after.starts_with(':') {
        return None;
    }
    let stop = after
        .chars()
        .find(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace() || *c == '@');
    if stop == Some('@') {
        return None;
    }
    Some(name)
}

/// `<name …>…</name>` followed by a blank line or trailing whitespace.
fn closed_pair_len(rest: &str, name: &str) -> Option<usize> {
    let close = format!("</{name}>");
    let mut from = 1 + name.len() + 1;
    while from <= rest.len() {
        let found = rest.get(from..)?.find(&close)?;
        let close_end = from + found + close.len();
        let tail = &rest[close_end..];
        let spaces = tail.bytes().take_while(|&b| b == b' ').count();
        let newlines = tail[spaces..].bytes().take_while(|&b| b == b'\n').count();
        if newlines >= 2 {
            return Some(close_end + spaces + newlines);
        }
        if tail.trim().is_empty() {
            return Some(rest.len());
        }
        from = close_end;
    }
    None
}
