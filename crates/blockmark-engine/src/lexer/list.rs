use crate::{
    grammar::compose::Match,
    token::{List, ListItem},
};

use super::{Lexer, State};

/// Number of leading spaces a pedantic item continuation line loses.
const PEDANTIC_OUTDENT: usize = 4;

impl Lexer {
    /// Turns a matched list span into a [`List`], tokenizing each item's
    /// content with `top = false`.
    pub(super) fn list(&self, m: &Match<'_>, depth: usize, state: &mut State) -> List {
        let bullet = m.group(2).unwrap_or("");
        let ordered = bullet.ends_with('.');
        let start = ordered
            .then(|| bullet.trim_end_matches('.').parse::<u64>().ok())
            .flatten();

        let segments = match self.grammar.items() {
            Some(items) => items.split(m.as_str()),
            None => Vec::new(),
        };
        let count = segments.len();
        let helpers = self.grammar.helpers();

        let mut items = Vec::with_capacity(count);
        let mut next = false;
        for (i, (_, segment, _)) in segments.into_iter().enumerate() {
            let marker = helpers.item_marker.exec(segment).map_or(0, |m| m.len());
            let mut text = segment[marker..].to_string();
            if text.contains("\n ") {
                let width = if self.pedantic {
                    PEDANTIC_OUTDENT
                } else {
                    marker
                };
                text = outdent(&text, width);
            }

            let mut loose = next || has_inner_blank_line(&text);
            if i + 1 != count {
                next = text.ends_with('\n');
                loose |= next;
            }

            let mut checked = None;
            if self.dialect.task_items()
                && let Some(task) = helpers.task.exec(&text)
            {
                checked = Some(task.group(1).is_some_and(|mark| mark != " "));
                let len = task.len();
                text.drain(..len);
            }

            let tokens = self.tokenize(&text, false, depth + 1, state);
            items.push(ListItem {
                task: checked.is_some(),
                checked,
                loose,
                tokens,
            });
        }

        let loose = items.iter().any(|item| item.loose);
        if loose {
            for item in &mut items {
                item.loose = true;
            }
        }

        List {
            ordered,
            start,
            loose,
            items,
        }
    }
}

/// Removes up to `width` leading spaces from every line.
fn outdent(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| {
            let spaces = line.bytes().take(width).take_while(|&b| b == b' ').count();
            &line[spaces..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A blank line followed by more content.
fn has_inner_blank_line(text: &str) -> bool {
    text.find("\n\n")
        .is_some_and(|i| !text[i + 2..].trim().is_empty())
}
