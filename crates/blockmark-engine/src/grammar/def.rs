use super::compose::{Match, Pattern};

/// Link-reference definition: `[label]: destination "title"`.
///
/// Captures: 1 = label, 2 = destination, 3 = title including its delimiters.
#[derive(Debug, Clone)]
pub struct DefRule {
    pattern: Pattern,
}

impl DefRule {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        let m = self.pattern.exec(src)?;
        if m.group(1).is_none_or(|label| label.trim().is_empty()) {
            return None;
        }
        Some(m)
    }
}
