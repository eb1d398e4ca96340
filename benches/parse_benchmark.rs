//! Benchmarks for prbridge conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic pull request descriptions.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prbridge::{JsonFormat, MarkdownParser, ParseOptions};

/// Creates a synthetic PR body with the given number of sections.
fn create_test_body(section_count: usize) -> String {
    let mut body = String::new();

    for i in 0..section_count {
        body.push_str(&format!("## Section {}\n", i + 1));
        body.push_str(&format!(
            "Fixes **issue {}** reported in https://example.com/issues/{} for the release.\n",
            i, i
        ));
        body.push_str(&format!(
            "![screenshot](https://github.com/user-attachments/assets/{:08x})\n",
            i
        ));
        body.push_str("| Step | Result |\n| --- | --- |\n");
        body.push_str("| build | **ok** |\n| test | see https://ci.example.com |\n\n");
    }

    body.push_str("## Checklist\n- [x] Tests added\n");
    body
}

/// Benchmark parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_parsing");
    let parser = MarkdownParser::with_options(ParseOptions::default().with_placeholders())
        .expect("default patterns compile");

    for section_count in [1, 10, 100].iter() {
        let body = create_test_body(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| parser.parse(black_box(&body)));
        });
    }

    group.finish();
}

/// Benchmark the full Markdown to ADF JSON path.
fn bench_adf_json(c: &mut Criterion) {
    let body = create_test_body(10);

    c.bench_function("adf_json_compact", |b| {
        b.iter(|| prbridge::to_adf_json(black_box(&body), JsonFormat::Compact).unwrap());
    });
}

/// Benchmark parser construction (pattern compilation).
fn bench_parser_creation(c: &mut Criterion) {
    c.bench_function("parser_creation", |b| {
        b.iter(|| MarkdownParser::new().unwrap());
    });
}

criterion_group!(benches, bench_parsing, bench_adf_json, bench_parser_creation);
criterion_main!(benches);
