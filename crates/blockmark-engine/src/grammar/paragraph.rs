use super::{
    compose::{Match, Pattern},
    line_len,
};

/// A run of non-blank lines, stopped by any line the interrupt pattern accepts.
#[derive(Debug, Clone)]
pub struct ParagraphRule {
    interrupt: Pattern,
}

impl ParagraphRule {
    pub fn new(interrupt: Pattern) -> Self {
        Self { interrupt }
    }

    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        let first = line_len(src);
        if first == 0 {
            return None;
        }
        let end = lazy_continuation(src, first, &self.interrupt);
        let text = &src[..end];
        Some(Match::new(text, [Some(text)]))
    }
}

/// Extends a paragraph that ends at `end` over following non-blank lines
/// until one of them is interrupted. Returns the new end, excluding the
/// final newline.
fn lazy_continuation(src: &str, mut end: usize, interrupt: &Pattern) -> usize {
    while src[end..].starts_with('\n') {
        let next = &src[end + 1..];
        let len = line_len(next);
        if len == 0 || interrupt.matches_at_start(next) {
            break;
        }
        end += 1 + len;
    }
    end
}

/// Consecutive `>` lines plus any paragraph lines lazily continuing them.
#[derive(Debug, Clone)]
pub struct BlockquoteRule {
    marker: Pattern,
    interrupt: Pattern,
}

impl BlockquoteRule {
    pub fn new(marker: Pattern, interrupt: Pattern) -> Self {
        Self { marker, interrupt }
    }

    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        let mut pos = 0;
        while pos < src.len() {
            let Some(marker) = self.marker.exec(&src[pos..]) else {
                break;
            };
            let content_start = pos + marker.len();
            let mut end = content_start + line_len(&src[content_start..]);
            if end > content_start {
                end = lazy_continuation(src, end, &self.interrupt);
            }
            if src[end..].starts_with('\n') {
                end += 1;
            }
            pos = end;
        }
        if pos == 0 {
            return None;
        }
        Some(Match::new(&src[..pos], []))
    }
}
