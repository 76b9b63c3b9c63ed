use super::{
    compose::{Match, Pattern},
    line_len,
};

/// A fenced code block.
///
/// Opens with three or more backticks or tildes and an optional info string,
/// closes with a fence of the same character that is at least as long, or at
/// end of input.
#[derive(Debug, Clone)]
pub struct FencesRule {
    head: Pattern,
}

impl FencesRule {
    pub fn new(head: Pattern) -> Self {
        Self { head }
    }

    /// Captures: 1 = opening fence, 2 = language, 3 = content.
    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        let head = self.head.exec(src)?;
        let fence = head.group(1)?;
        let info = head.group(2).unwrap_or("");
        let marker = fence.as_bytes()[0];
        if marker == b'`' && info.contains('`') {
            return None;
        }
        let lang = info
            .trim_start_matches([' ', '.'])
            .split_whitespace()
            .next();

        let body_start = head.len();
        let mut line_start = body_start;
        while line_start < src.len() {
            let len = line_len(&src[line_start..]);
            let line = &src[line_start..line_start + len];
            if closes(line, marker, fence.len()) {
                let content = src[body_start..line_start]
                    .strip_suffix('\n')
                    .unwrap_or(&src[body_start..line_start]);
                let mut end = line_start + len;
                end += src[end..].bytes().take_while(|&b| b == b'\n').count();
                return Some(Match::new(&src[..end], [Some(fence), lang, Some(content)]));
            }
            line_start += len + 1;
        }

        let content = src[body_start..].trim_end_matches('\n');
        Some(Match::new(src, [Some(fence), lang, Some(content)]))
    }
}

fn closes(line: &str, marker: u8, min_len: usize) -> bool {
    let rest = line.trim_start_matches(' ');
    let run = rest.bytes().take_while(|&b| b == marker).count();
    run >= min_len && rest[run..].trim_matches(' ').is_empty()
}
