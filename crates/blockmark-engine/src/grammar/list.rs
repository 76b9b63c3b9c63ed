use super::compose::{Match, Pattern};

/// Which marker family a bullet belongs to. A list never mixes families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletFamily {
    Dash,
    Plus,
    Star,
    Ordered,
}

impl BulletFamily {
    pub fn of(bullet: &str) -> Self {
        match bullet {
            "-" => Self::Dash,
            "+" => Self::Plus,
            "*" => Self::Star,
            _ => Self::Ordered,
        }
    }
}

/// Splits a list span into item segments.
///
/// An item runs from its marker line up to the next line that starts with
/// the same indentation followed by a marker and a space.
#[derive(Debug, Clone)]
pub struct ItemRule {
    head: Pattern,
}

impl ItemRule {
    pub fn new(head: Pattern) -> Self {
        Self { head }
    }

    /// Returns `(offset, segment, bullet)` for every item in `span`.
    ///
    /// Segments exclude the newline that separates them from the next item.
    pub fn split<'a>(&self, span: &'a str) -> Vec<(usize, &'a str, &'a str)> {
        let mut items = Vec::new();
        let mut start = 0;
        while start < span.len() {
            let Some(head) = self.head.exec(&span[start..]) else {
                break;
            };
            let indent = head.group(1).unwrap_or("");
            let bullet = head.group(2).unwrap_or("");
            let mut end = start + super::line_len(&span[start..]);
            let mut next = None;
            while end < span.len() {
                let line_start = end + 1;
                if self.starts_item(&span[line_start..], indent) {
                    next = Some(line_start);
                    break;
                }
                end = line_start + super::line_len(&span[line_start..]);
            }
            items.push((start, &span[start..end], bullet));
            match next {
                Some(line_start) => start = line_start,
                None => break,
            }
        }
        items
    }

    /// Whether `line` opens an item at exactly `indent`.
    pub fn starts_item(&self, line: &str, indent: &str) -> bool {
        line.strip_prefix(indent)
            .and_then(|rest| self.head.exec(rest))
            .is_some_and(|head| head.group(1).is_none())
    }
}

/// A whole list: consecutive items of one bullet family at one indentation.
#[derive(Debug, Clone)]
pub struct ListRule {
    item: ItemRule,
    hr: Pattern,
    def: Pattern,
}

impl ListRule {
    pub fn new(item: ItemRule, hr: Pattern, def: Pattern) -> Self {
        Self { item, hr, def }
    }

    pub fn items(&self) -> &ItemRule {
        &self.item
    }

    /// Captures: 1 = indentation, 2 = first bullet.
    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        let head = self.item.head.exec(src)?;
        let indent = head.group(1).unwrap_or("");
        let bullet = head.group(2)?;
        let body_start = head.len();
        if body_start >= src.len() {
            return None;
        }
        let mut end = self.scan_end(src, body_start, indent);

        // Cut the span where the bullet family changes.
        let family = BulletFamily::of(bullet);
        if let Some((offset, _, _)) = self
            .item
            .split(&src[..end])
            .into_iter()
            .find(|(_, _, b)| BulletFamily::of(b) != family)
        {
            end = offset;
        }

        Some(Match::new(&src[..end], [Some(indent), Some(bullet)]))
    }

    /// Finds where the list ends: before a thematic break or definition, after
    /// a blank line that is not followed by indentation or a sibling bullet,
    /// after two or more blank lines, or at trailing whitespace.
    fn scan_end(&self, src: &str, body_start: usize, indent: &str) -> usize {
        let trailing = src.trim_end().len();
        let first = src[body_start..].chars().next().map_or(0, char::len_utf8);
        let mut p = body_start + first;
        while p < src.len() {
            if p >= trailing {
                return src.len();
            }
            let Some(offset) = src[p..].find('\n') else {
                break;
            };
            p += offset;
            if p >= trailing {
                return src.len();
            }
            let run = src[p..].bytes().take_while(|&b| b == b'\n').count();
            let after = p + run;
            let next = &src[after..];
            let hr_next = next
                .strip_prefix(indent)
                .is_some_and(|rest| self.hr.matches_at_start(rest))
                || self.hr.matches_at_start(next);
            if hr_next || self.def.matches_at_start(next) {
                return after;
            }
            if run >= 3 {
                return after;
            }
            if run == 2 && !next.starts_with(' ') && !self.item.starts_item(next, indent) {
                return after;
            }
            p = after;
        }
        src.len()
    }
}
