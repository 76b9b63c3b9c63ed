//! Stable plain-text rendering of a token tree, one token per line with
//! children indented by two spaces.

use crate::token::{Align, Token};

pub fn outline(tokens: &[Token]) -> String {
    let mut out = String::new();
    write_tokens(&mut out, tokens, 0);
    out
}

fn write_tokens(out: &mut String, tokens: &[Token], depth: usize) {
    for token in tokens {
        write_token(out, token, depth);
    }
}

fn line(out: &mut String, depth: usize, text: &str) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(text);
    out.push('\n');
}

fn write_token(out: &mut String, token: &Token, depth: usize) {
    let kind = token.kind();
    match token {
        Token::Space | Token::Hr => line(out, depth, kind.as_str()),
        Token::Code(code) | Token::Fences(code) => {
            let mut head = kind.to_string();
            if let Some(lang) = &code.lang {
                head.push_str(&format!(" lang={lang}"));
            }
            if code.escaped {
                head.push_str(" escaped");
            }
            line(out, depth, &format!("{head} {:?}", code.text));
        }
        Token::Heading(heading) | Token::LHeading(heading) => {
            line(out, depth, &format!("{kind} {} {:?}", heading.level, heading.text));
        }
        Token::Blockquote { tokens } => {
            line(out, depth, kind.as_str());
            write_tokens(out, tokens, depth + 1);
        }
        Token::List(list) => {
            let mut head = kind.to_string();
            if list.ordered {
                head.push_str(" ordered");
            }
            if let Some(start) = list.start {
                head.push_str(&format!(" start={start}"));
            }
            if list.loose {
                head.push_str(" loose");
            }
            line(out, depth, &head);
            for item in &list.items {
                let mut head = String::from("item");
                match item.checked {
                    Some(true) => head.push_str(" [x]"),
                    Some(false) => head.push_str(" [ ]"),
                    None => {}
                }
                if item.loose {
                    head.push_str(" loose");
                }
                line(out, depth + 1, &head);
                write_tokens(out, &item.tokens, depth + 2);
            }
        }
        Token::Html(html) => {
            let pre = if html.pre { " pre" } else { "" };
            line(out, depth, &format!("{kind}{pre} {:?}", html.text));
        }
        Token::Paragraph { text } | Token::Text { text } => {
            line(out, depth, &format!("{kind} {text:?}"));
        }
        Token::Table(table) => {
            line(out, depth, kind.as_str());
            line(out, depth + 1, &format!("header {:?}", table.header));
            let align: Vec<_> = table
                .align
                .iter()
                .map(|a| match a {
                    Some(Align::Left) => "left",
                    Some(Align::Right) => "right",
                    Some(Align::Center) => "center",
                    None => "none",
                })
                .collect();
            line(out, depth + 1, &format!("align [{}]", align.join(", ")));
            for row in &table.rows {
                line(out, depth + 1, &format!("row {row:?}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lex, options::Options};
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_outline() {
        let doc = lex("> # Hi\n\n- [x] a\n\n- b\n", &Options::default());
        assert_eq!(
            outline(&doc.tokens),
            "blockquote\n  heading 1 \"Hi\"\nlist loose\n  item [x] loose\n    text \"a\"\n  item loose\n    text \"b\"\n"
        );
    }
}
