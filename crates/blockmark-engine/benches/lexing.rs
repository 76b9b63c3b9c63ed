use blockmark_engine::{Dialect, Lexer, Options};
use criterion::{Criterion, criterion_group, criterion_main};
use pulldown_cmark::Parser;
mod common;

fn bench_pulldown_cmark_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexing");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    group.bench_function("pulldown_cmark", |b| {
        b.iter(|| {
            let parser = Parser::new(std::hint::black_box(&content));
            let events: Vec<_> = parser.collect();
            std::hint::black_box(events);
        });
    });

    group.finish();
}

fn bench_dialects(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexing");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    for dialect in Dialect::ALL {
        let lexer = Lexer::new(&Options::for_dialect(dialect));
        group.bench_function(format!("blockmark_{dialect}"), |b| {
            b.iter(|| std::hint::black_box(lexer.lex(std::hint::black_box(&content))));
        });
    }

    let gfm = common::generate_gfm_content(100);
    let lexer = Lexer::new(&Options::default());
    group.bench_function("blockmark_tables_gfm_features", |b| {
        b.iter(|| std::hint::black_box(lexer.lex(std::hint::black_box(&gfm))));
    });

    group.finish();
}

fn bench_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting");
    group.sample_size(10);

    let lexer = Lexer::new(&Options::default());
    for depth in [4, 16, 64] {
        let content = common::generate_nested_lists(depth);
        group.bench_function(format!("list_depth_{depth}"), |b| {
            b.iter(|| std::hint::black_box(lexer.lex(std::hint::black_box(&content))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pulldown_cmark_baseline, bench_dialects, bench_nesting);
criterion_main!(benches);
