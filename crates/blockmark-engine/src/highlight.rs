//! Optional syntax-highlighting pass over code tokens.
//!
//! Every `code` and `fences` block in a document (including the ones inside
//! blockquotes and list items) is handed to a [`Highlighter`]. Results are
//! applied in document order, and the first failing block aborts the pass.

use rayon::prelude::*;

use crate::{
    error::{Error, HighlightError},
    token::{CodeBlock, Document, Token},
};

/// Turns a code block's text into highlighted markup.
///
/// Returning `Ok(None)` or the unchanged text leaves the block as it was.
pub trait Highlighter {
    fn highlight(&self, code: &str, lang: Option<&str>) -> Result<Option<String>, HighlightError>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, Option<&str>) -> Result<Option<String>, HighlightError>,
{
    fn highlight(&self, code: &str, lang: Option<&str>) -> Result<Option<String>, HighlightError> {
        self(code, lang)
    }
}

/// Highlights every code block one after another.
pub fn highlight_document<H>(mut doc: Document, highlighter: &H) -> Result<Document, Error>
where
    H: Highlighter + ?Sized,
{
    let mut blocks = code_blocks(&mut doc.tokens);
    let results = blocks
        .iter()
        .map(|block| highlighter.highlight(&block.text, block.lang.as_deref()))
        .collect::<Vec<_>>();
    apply(&mut blocks, results)?;
    Ok(doc)
}

/// Highlights all code blocks on the rayon pool.
pub fn highlight_document_parallel<H>(mut doc: Document, highlighter: &H) -> Result<Document, Error>
where
    H: Highlighter + Sync + ?Sized,
{
    let mut blocks = code_blocks(&mut doc.tokens);
    let jobs: Vec<(&str, Option<&str>)> = blocks
        .iter()
        .map(|block| (block.text.as_str(), block.lang.as_deref()))
        .collect();
    log::debug!("highlighting {} code blocks in parallel", jobs.len());
    let results = jobs
        .par_iter()
        .map(|(code, lang)| highlighter.highlight(code, *lang))
        .collect::<Vec<_>>();
    apply(&mut blocks, results)?;
    Ok(doc)
}

/// Checks every result before touching any block, so a failure leaves the
/// caller with nothing half-highlighted.
fn apply(
    blocks: &mut [&mut CodeBlock],
    results: Vec<Result<Option<String>, HighlightError>>,
) -> Result<(), Error> {
    let mut replacements = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(replacement) => replacements.push(replacement),
            Err(source) => {
                return Err(Error::Highlight {
                    index,
                    lang: blocks[index].lang.clone(),
                    source,
                });
            }
        }
    }

    for (block, replacement) in blocks.iter_mut().zip(replacements) {
        if let Some(text) = replacement
            && text != block.text
        {
            block.text = text;
            block.escaped = true;
        }
    }
    Ok(())
}

/// Code blocks in document order, depth first.
fn code_blocks(tokens: &mut [Token]) -> Vec<&mut CodeBlock> {
    let mut blocks = Vec::new();
    collect(tokens, &mut blocks);
    blocks
}

fn collect<'a>(tokens: &'a mut [Token], blocks: &mut Vec<&'a mut CodeBlock>) {
    for token in tokens {
        match token {
            Token::Code(block) | Token::Fences(block) => blocks.push(block),
            Token::Blockquote { tokens } => collect(tokens, blocks),
            Token::List(list) => {
                for item in &mut list.items {
                    collect(&mut item.tokens, blocks);
                }
            }
            _ => {}
        }
    }
}
