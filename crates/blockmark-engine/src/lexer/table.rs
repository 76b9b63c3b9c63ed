use crate::{
    grammar::compose::Match,
    token::{Align, Table},
};

/// Builds a table from a `table`/`nptable` match.
///
/// Returns `None` when the header and delimiter rows disagree on the number of
/// columns; the lexer then tries the next rule.
pub(super) fn build(m: &Match<'_>, piped: bool) -> Option<Table> {
    let header = split_cells(trim_row(m.group(1).unwrap_or("")), None);
    let align: Vec<_> = trim_delimiter(m.group(2).unwrap_or(""))
        .split('|')
        .map(|cell| alignment(cell.trim_matches(' ')))
        .collect();
    if header.len() != align.len() {
        return None;
    }

    let body = m.group(3).unwrap_or("");
    let body = body.strip_suffix('\n').unwrap_or(body);
    let rows = if body.is_empty() {
        Vec::new()
    } else {
        body.split('\n')
            .map(|row| {
                let row = if piped { trim_piped_row(row) } else { row };
                split_cells(row, Some(header.len()))
            })
            .collect()
    };

    Some(Table {
        header,
        align,
        rows,
    })
}

/// Drops leading spaces and a trailing unescaped pipe.
fn trim_row(row: &str) -> &str {
    let row = row.trim_start_matches(' ');
    let end = row.trim_end_matches(' ');
    match end.strip_suffix('|') {
        Some(rest) if !is_escaped(rest) => rest.trim_end_matches(' '),
        _ => row,
    }
}

fn trim_delimiter(row: &str) -> &str {
    let row = row.trim_start_matches(' ');
    row.trim_end_matches(' ')
        .strip_suffix('|')
        .unwrap_or(row)
}

/// Drops the outer pipes of a `| a | b |` body row.
fn trim_piped_row(row: &str) -> &str {
    let row = row.trim_start_matches(' ');
    let row = row.strip_prefix('|').unwrap_or(row);
    trim_row(row)
}

/// Whether a character following `before` is escaped by an odd backslash run.
fn is_escaped(before: &str) -> bool {
    before.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Splits a row on unescaped pipes, trims each cell and unescapes `\|`.
///
/// With `count`, the row is padded with empty cells or truncated to that width.
pub(super) fn split_cells(row: &str, count: Option<usize>) -> Vec<String> {
    let mut cells = Vec::new();
    let mut start = 0;
    for (i, c) in row.char_indices() {
        if c == '|' && !is_escaped(&row[..i]) {
            cells.push(&row[start..i]);
            start = i + 1;
        }
    }
    cells.push(&row[start..]);

    let mut cells: Vec<String> = cells
        .into_iter()
        .map(|cell| cell.trim().replace("\\|", "|"))
        .collect();
    if let Some(count) = count {
        cells.resize(count, String::new());
    }
    cells
}

fn alignment(cell: &str) -> Option<Align> {
    let dashes = |s: &str| !s.is_empty() && s.bytes().all(|b| b == b'-');
    match (cell.strip_prefix(':'), cell.strip_suffix(':')) {
        (Some(rest), Some(_)) if rest.strip_suffix(':').is_some_and(dashes) => {
            Some(Align::Center)
        }
        (Some(rest), _) if dashes(rest) => Some(Align::Left),
        (_, Some(rest)) if dashes(rest) => Some(Align::Right),
        _ => None,
    }
}
