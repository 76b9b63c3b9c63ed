//! Source-level pattern composition.
//!
//! Rules are written as regex templates containing `{name}` placeholders.
//! [`Edit`] substitutes other rules' sources into those placeholders before
//! compiling, so a rule like `list` can embed `hr` and `def` without any
//! lookup at match time.

use std::sync::OnceLock;

use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

/// Failure while building a [`Pattern`] from a template.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern `{pattern}` has no placeholder `{{{placeholder}}}` to replace")]
    UnknownPlaceholder {
        pattern: &'static str,
        placeholder: String,
    },

    #[error("pattern `{pattern}` still contains unresolved placeholder `{{{placeholder}}}`")]
    Unresolved {
        pattern: &'static str,
        placeholder: String,
    },

    #[error("pattern `{pattern}` failed to compile: {source}")]
    Regex {
        pattern: &'static str,
        source: regex::Error,
    },
}

fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| Regex::new(r"(^|[^\[])\^").expect("Invalid anchor regex"))
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{([a-z_][a-z0-9_]*)\}").expect("Invalid placeholder regex"))
}

/// Removes start anchors so an anchored rule can be embedded mid-pattern.
///
/// A `^` directly after `[` is a negated class, not an anchor, and is kept.
pub fn strip_anchors(source: &str) -> String {
    anchor_regex().replace_all(source, "${1}").into_owned()
}

/// Builder that rewrites a template and compiles it into a [`Pattern`].
#[derive(Debug, Clone)]
pub struct Edit {
    source: String,
    ignore_case: bool,
    multi_line: bool,
    missing: Option<String>,
}

impl Edit {
    pub fn new(template: &str) -> Self {
        Self {
            source: template.to_string(),
            ignore_case: false,
            multi_line: false,
            missing: None,
        }
    }

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }

    /// Replaces the first `{name}` placeholder with `replacement`.
    pub fn replace(self, name: &str, replacement: &str) -> Self {
        self.substitute(name, replacement, false)
    }

    /// Replaces every `{name}` placeholder with `replacement`.
    pub fn replace_all(self, name: &str, replacement: &str) -> Self {
        self.substitute(name, replacement, true)
    }

    fn substitute(mut self, name: &str, replacement: &str, all: bool) -> Self {
        if self.missing.is_some() {
            return self;
        }
        let placeholder = format!("{{{name}}}");
        if !self.source.contains(&placeholder) {
            self.missing = Some(name.to_string());
            return self;
        }
        let replacement = strip_anchors(replacement);
        self.source = if all {
            self.source.replace(&placeholder, &replacement)
        } else {
            self.source.replacen(&placeholder, &replacement, 1)
        };
        self
    }

    /// The template source with all substitutions applied so far.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn build(self, name: &'static str) -> Result<Pattern, PatternError> {
        if let Some(placeholder) = self.missing {
            return Err(PatternError::UnknownPlaceholder {
                pattern: name,
                placeholder,
            });
        }
        if let Some(caps) = placeholder_regex().captures(&self.source) {
            return Err(PatternError::Unresolved {
                pattern: name,
                placeholder: caps[1].to_string(),
            });
        }
        let regex = RegexBuilder::new(&self.source)
            .case_insensitive(self.ignore_case)
            .multi_line(self.multi_line)
            .build()
            .map_err(|source| PatternError::Regex {
                pattern: name,
                source,
            })?;
        Ok(Pattern { regex })
    }
}

/// An immutable compiled matcher anchored at the start of its input.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Matches at the start of `src` only.
    pub fn exec<'a>(&self, src: &'a str) -> Option<Match<'a>> {
        let caps = self.regex.captures(src)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 {
            return None;
        }
        Some(Match::from_captures(&caps))
    }

    pub fn matches_at_start(&self, src: &str) -> bool {
        self.regex.find(src).is_some_and(|m| m.start() == 0)
    }

    /// Replaces every match in `src`; used for multi-line prefix stripping.
    pub fn strip_all<'a>(&self, src: &'a str) -> std::borrow::Cow<'a, str> {
        self.regex.replace_all(src, "")
    }
}

/// Result of a rule matching at the start of the remaining input.
///
/// Group 0 is the whole consumed text; the rest follow the rule's capture
/// layout and are `None` when the group did not participate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    groups: Vec<Option<&'a str>>,
}

impl<'a> Match<'a> {
    pub fn new(whole: &'a str, captures: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let mut groups = vec![Some(whole)];
        groups.extend(captures);
        Self { groups }
    }

    fn from_captures(caps: &Captures<'a>) -> Self {
        Self {
            groups: caps.iter().map(|g| g.map(|m| m.as_str())).collect(),
        }
    }

    /// Number of bytes consumed.
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> &'a str {
        self.groups.first().copied().flatten().unwrap_or_default()
    }

    /// A captured group; empty captures are reported as `None`.
    pub fn group(&self, index: usize) -> Option<&'a str> {
        self.groups
            .get(index)
            .copied()
            .flatten()
            .filter(|g| !g.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_anchor_but_keeps_negated_class() {
        assert_eq!(strip_anchors(r"^ {0,3}[^\n]+"), r" {0,3}[^\n]+");
        assert_eq!(strip_anchors(r"(?:^a|^b)"), r"(?:a|b)");
    }

    #[test]
    fn replaces_first_occurrence_only() {
        let edit = Edit::new("{x}-{x}").replace("x", "a");
        assert_eq!(edit.source(), "a-{x}");
    }

    #[test]
    fn replaces_all_occurrences() {
        let pattern = Edit::new("^{x}-{x}")
            .replace_all("x", "a")
            .build("pair")
            .unwrap();
        assert_eq!(pattern.as_str(), "^a-a");
    }

    #[test]
    fn nested_placeholders_resolve_in_order() {
        let pattern = Edit::new("^(?:{outer})")
            .replace("outer", "{inner}|c")
            .replace("inner", "^b")
            .build("nested")
            .unwrap();
        assert_eq!(pattern.as_str(), "^(?:b|c)");
        assert!(pattern.exec("c").is_some());
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let err = Edit::new("^a").replace("b", "c").build("broken").unwrap_err();
        assert!(matches!(err, PatternError::UnknownPlaceholder { .. }));
    }

    #[test]
    fn unresolved_placeholder_is_an_error() {
        let err = Edit::new("^{a}").build("broken").unwrap_err();
        match err {
            PatternError::Unresolved { placeholder, .. } => assert_eq!(placeholder, "a"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ignore_case_flag() {
        let pattern = Edit::new("^<pre>").ignore_case().build("pre").unwrap();
        assert!(pattern.exec("<PRE>").is_some());
    }

    #[test]
    fn exec_is_anchored_even_in_multi_line_mode() {
        let pattern = Edit::new("^b").multi_line().build("b").unwrap();
        assert!(pattern.exec("a\nb").is_none());
        assert_eq!(pattern.exec("b").unwrap().len(), 1);
    }

    #[test]
    fn match_groups() {
        let pattern = Edit::new("^(a)(x)?(b)").build("ab").unwrap();
        let m = pattern.exec("abc").unwrap();
        assert_eq!(m.as_str(), "ab");
        assert_eq!(m.group(1), Some("a"));
        assert_eq!(m.group(2), None);
        assert_eq!(m.group(3), Some("b"));
    }
}
