use pretty_assertions::assert_eq;
use rstest::rstest;

use super::Lexer;
use crate::{
    options::{Dialect, Options},
    token::{Align, CodeBlock, Document, Heading, Html, List, ListItem, Step, Token, TokenKind},
};

fn lex(dialect: Dialect, src: &str) -> Document {
    Lexer::new(&Options::for_dialect(dialect)).lex(src)
}

fn tokens(dialect: Dialect, src: &str) -> Vec<Token> {
    lex(dialect, src).tokens
}

fn text(s: &str) -> Token {
    Token::Text {
        text: s.to_string(),
    }
}

fn paragraph(s: &str) -> Token {
    Token::Paragraph {
        text: s.to_string(),
    }
}

fn item(loose: bool, tokens: Vec<Token>) -> ListItem {
    ListItem {
        task: false,
        checked: None,
        loose,
        tokens,
    }
}

#[rstest]
#[case(Dialect::Normal)]
#[case(Dialect::Gfm)]
#[case(Dialect::Tables)]
#[case(Dialect::Pedantic)]
fn steps_cover_the_normalized_input(#[case] dialect: Dialect) {
    let inputs = [
        "",
        "\n\n\n",
        "# Title\r\n\r\nbody\ttext\r\n",
        "> quote\nlazy\n\n- a\n- b\n\n\n1. one\n2. two\n",
        "```js\ncode\n```\n~~~\nunclosed",
        "a | b\n--|--\n1 | 2\n\n| x |\n|---|\n| y |\n",
        "<div>\nhtml\n</div>\n\n<!-- c -->\n[ref]: /url \"t\"\n",
        "    indented\n\n* * *\nSetext\n===\n",
        "- [ ] task\n  - nested ünïcödé\n\n    deep\n- é\n",
        "   \n\u{00a0}\u{2424}> >\n>",
    ];
    let lexer = Lexer::new(&Options::for_dialect(dialect));
    for src in inputs {
        let total: usize = lexer.partition(src).iter().map(|step| step.len).sum();
        assert_eq!(total, Lexer::normalize(src).len(), "input {src:?}");
    }
}

#[test]
fn partition_reports_rule_kinds() {
    let steps = Lexer::new(&Options::default()).partition("# T\n\n[x]: /u\ntext");
    assert_eq!(
        steps,
        vec![
            Step {
                kind: TokenKind::Heading,
                len: 5
            },
            Step {
                kind: TokenKind::Def,
                len: 8
            },
            Step {
                kind: TokenKind::Paragraph,
                len: 4
            },
        ]
    );
}

#[rstest]
#[case("a\r\nb\rc", "a\nb\nc")]
#[case("\tcode", "    code")]
#[case("a\u{00a0}b\u{2424}c", "a b\nc")]
#[case("a\n   \nb", "a\n\nb")]
fn normalization(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(Lexer::normalize(src), expected);
}

#[test]
fn first_definition_wins() {
    let doc = lex(
        Dialect::Tables,
        "[foo]: /first\n[Foo]: /second\n\ntext\n",
    );
    assert_eq!(doc.links.len(), 1);
    assert_eq!(doc.links.get("FOO").unwrap().destination, "/first");
    assert_eq!(doc.tokens, vec![paragraph("text")]);
}

#[test]
fn definition_title_loses_its_delimiters() {
    let doc = lex(Dialect::Gfm, "[a]: <https://x.y> (Title)\n");
    let def = doc.links.get("a").unwrap();
    assert_eq!(def.destination, "https://x.y");
    assert_eq!(def.title.as_deref(), Some("Title"));
    assert!(doc.tokens.is_empty());
}

#[rstest]
#[case(Dialect::Gfm, true)]
#[case(Dialect::Tables, true)]
#[case(Dialect::Normal, false)]
#[case(Dialect::Pedantic, false)]
fn fenced_code_depends_on_dialect(#[case] dialect: Dialect, #[case] fenced: bool) {
    let tokens = tokens(dialect, "```js\ncode\n```\n");
    if fenced {
        assert_eq!(
            tokens,
            vec![Token::Fences(CodeBlock {
                text: "code".to_string(),
                lang: Some("js".to_string()),
                escaped: false,
            })]
        );
    } else {
        assert!(tokens.iter().all(|t| t.kind() != TokenKind::Fences));
        assert_eq!(tokens, vec![paragraph("```js\ncode\n```")]);
    }
}

#[test]
fn tight_list() {
    assert_eq!(
        tokens(Dialect::Tables, "- a\n- b\n"),
        vec![Token::List(List {
            ordered: false,
            start: None,
            loose: false,
            items: vec![item(false, vec![text("a")]), item(false, vec![text("b")])],
        })]
    );
}

#[test]
fn blank_line_between_items_makes_every_item_loose() {
    assert_eq!(
        tokens(Dialect::Tables, "- a\n\n- b\n"),
        vec![Token::List(List {
            ordered: false,
            start: None,
            loose: true,
            items: vec![item(true, vec![text("a")]), item(true, vec![text("b")])],
        })]
    );
}

#[test]
fn nested_list_is_outdented_and_tokenized() {
    assert_eq!(
        tokens(Dialect::Gfm, "- a\n  - b\n- c\n"),
        vec![Token::List(List {
            ordered: false,
            start: None,
            loose: false,
            items: vec![
                item(
                    false,
                    vec![
                        text("a"),
                        Token::List(List {
                            ordered: false,
                            start: None,
                            loose: false,
                            items: vec![item(false, vec![text("b")])],
                        }),
                    ]
                ),
                item(false, vec![text("c")]),
            ],
        })]
    );
}

#[test]
fn ordered_list_keeps_its_start() {
    let tokens = tokens(Dialect::Gfm, "3. a\n4. b\n");
    let Token::List(list) = &tokens[0] else {
        panic!("expected a list, got {tokens:?}");
    };
    assert!(list.ordered);
    assert_eq!(list.start, Some(3));
    assert_eq!(list.items.len(), 2);
}

#[test]
fn bullet_family_change_starts_a_new_list() {
    let tokens = tokens(Dialect::Gfm, "- a\n+ b\n");
    let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
    assert_eq!(kinds, vec![TokenKind::List, TokenKind::List]);
}

#[rstest]
#[case(Dialect::Gfm, true)]
#[case(Dialect::Normal, false)]
fn task_items(#[case] dialect: Dialect, #[case] recognized: bool) {
    let tokens = tokens(dialect, "- [x] done\n- [ ] todo\n");
    let Token::List(list) = &tokens[0] else {
        panic!("expected a list, got {tokens:?}");
    };
    let tasks: Vec<_> = list.items.iter().map(|i| (i.task, i.checked)).collect();
    if recognized {
        assert_eq!(tasks, vec![(true, Some(true)), (true, Some(false))]);
        assert_eq!(list.items[0].tokens, vec![text("done")]);
    } else {
        assert_eq!(tasks, vec![(false, None), (false, None)]);
        assert_eq!(list.items[0].tokens, vec![text("[x] done")]);
    }
}

#[test]
fn table_alignment() {
    assert_eq!(
        tokens(Dialect::Tables, "a|b|c\n:--|--:|--\n"),
        vec![Token::Table(crate::token::Table {
            header: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            align: vec![Some(Align::Left), Some(Align::Right), None],
            rows: vec![],
        })]
    );
}

#[test]
fn piped_table_rows() {
    let tokens = tokens(Dialect::Tables, "| a | b |\n|---|:-:|\n| 1 | 2 |\n| 3 |\n");
    let Token::Table(table) = &tokens[0] else {
        panic!("expected a table, got {tokens:?}");
    };
    assert_eq!(table.align, vec![None, Some(Align::Center)]);
    assert_eq!(
        table.rows,
        vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string(), String::new()],
        ]
    );
}

#[test]
fn column_count_mismatch_is_not_a_table() {
    let tokens = tokens(Dialect::Tables, "a | b\n--|--|--\n");
    assert!(tokens.iter().all(|t| t.kind() != TokenKind::Table));
}

#[test]
fn tables_only_in_tables_dialect() {
    let tokens = tokens(Dialect::Gfm, "a | b\n--|--\n");
    assert!(tokens.iter().all(|t| t.kind() != TokenKind::Table));
}

#[test]
fn blockquote_recursion() {
    assert_eq!(
        tokens(Dialect::Tables, "> # Title\n> text\n"),
        vec![Token::Blockquote {
            tokens: vec![
                Token::Heading(Heading {
                    level: 1,
                    text: "Title".to_string(),
                }),
                paragraph("text"),
            ]
        }]
    );
}

#[test]
fn nesting_beyond_max_depth_degrades_to_paragraph() {
    let options = Options {
        max_depth: 1,
        ..Options::default()
    };
    assert_eq!(
        Lexer::new(&options).lex("> > deep\n").tokens,
        vec![Token::Blockquote {
            tokens: vec![paragraph("> deep")]
        }]
    );
}

#[rstest]
#[case(Dialect::Gfm)]
#[case(Dialect::Pedantic)]
fn list_nesting_beyond_max_depth_stays_text(#[case] dialect: Dialect) {
    let options = Options {
        max_depth: 1,
        ..Options::for_dialect(dialect)
    };
    let tokens = Lexer::new(&options).lex("- a\n  - b\n").tokens;
    let Token::List(list) = &tokens[0] else {
        panic!("expected a list, got {tokens:?}");
    };
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].tokens, vec![text("a"), text("- b")]);
}

#[rstest]
#[case(Dialect::Gfm, Token::Code(CodeBlock { text: "b".to_string(), lang: None, escaped: false }))]
#[case(Dialect::Pedantic, text("  b"))]
fn item_continuation_outdent(#[case] dialect: Dialect, #[case] last: Token) {
    let tokens = tokens(dialect, "- a\n\n      b\n");
    let Token::List(list) = &tokens[0] else {
        panic!("expected a list, got {tokens:?}");
    };
    assert_eq!(list.items[0].tokens, vec![text("a"), Token::Space, last]);
}

#[test]
fn pre_block_stays_one_html_token() {
    let src = "<pre>\na\n\nb\n</pre>\n";
    assert_eq!(
        tokens(Dialect::Tables, src),
        vec![Token::Html(Html {
            text: src.to_string(),
            pre: true,
        })]
    );
}

#[test]
fn heading_beats_paragraph() {
    assert_eq!(
        tokens(Dialect::Gfm, "# Title\nmore"),
        vec![
            Token::Heading(Heading {
                level: 1,
                text: "Title".to_string(),
            }),
            paragraph("more"),
        ]
    );
}

#[rstest]
#[case("Title\n=====\n", 1)]
#[case("Sub\n---\n", 2)]
fn setext_headings(#[case] src: &str, #[case] level: u8) {
    let tokens = tokens(Dialect::Gfm, src);
    let Token::LHeading(heading) = &tokens[0] else {
        panic!("expected a setext heading, got {tokens:?}");
    };
    assert_eq!(heading.level, level);
}

#[rstest]
#[case(Dialect::Gfm, "let a = 1;\nlet b = 2;")]
#[case(Dialect::Pedantic, "let a = 1;\nlet b = 2;\n\n")]
fn indented_code(#[case] dialect: Dialect, #[case] expected: &str) {
    assert_eq!(
        tokens(dialect, "    let a = 1;\n    let b = 2;\n\nnext\n"),
        vec![
            Token::Code(CodeBlock {
                text: expected.to_string(),
                lang: None,
                escaped: false,
            }),
            paragraph("next"),
        ]
    );
}

#[test]
fn blank_line_run_becomes_space() {
    assert_eq!(
        tokens(Dialect::Gfm, "a\n\nb"),
        vec![paragraph("a"), Token::Space, paragraph("b")]
    );
    assert_eq!(tokens(Dialect::Gfm, "a\nb"), vec![paragraph("a\nb")]);
}
