//! Lexical diff benchmarks
//!
//! Measures tokenization and diff throughput on generated documents of
//! increasing size, with and without small-change detection.
//!
//! Set `QUICK_BENCH` for shorter runs.

#![allow(clippy::missing_docs_in_private_items)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write;
use texdiff_core::{tokenize, DiffConfig, LexicalDiff};

fn is_quick_bench() -> bool {
    std::env::var("QUICK_BENCH").is_ok()
}

/// Generate a LaTeX-like document with `paragraphs` paragraphs
fn generate_document(paragraphs: usize, variant: usize) -> String {
    let mut doc = String::from("\\documentclass{article}\n\\usepackage{amsmath}\n\\begin{document}\n\n");
    for i in 0..paragraphs {
        let noun = if (i + variant) % 7 == 0 { "colour" } else { "color" };
        let _ = write!(
            doc,
            "\\section{{Part {i}}}\nThe {noun} of item {i} is described in \\emph{{detail}}. % note {i}\n\n"
        );
        if (i + variant) % 11 == 0 {
            doc.push_str("An extra sentence appears here.\n\n");
        }
    }
    doc.push_str("\\end{document}\n");
    doc
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    if is_quick_bench() {
        group.sample_size(20);
    }

    for size in [10, 100, 1000] {
        let doc = generate_document(size, 0);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| tokenize(black_box(doc), false));
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    if is_quick_bench() {
        group.sample_size(20);
    }

    let engines = [
        ("small_changes", LexicalDiff::new(DiffConfig::default())),
        (
            "lexemes_only",
            LexicalDiff::new(DiffConfig::default().with_small_changes(false)),
        ),
    ];

    for size in [10, 100, 1000] {
        let old = generate_document(size, 0);
        let new = generate_document(size, 3);
        group.throughput(Throughput::Bytes((old.len() + new.len()) as u64));
        for (name, engine) in &engines {
            group.bench_with_input(BenchmarkId::new(*name, size), &(&old, &new), |b, (old, new)| {
                b.iter(|| engine.diff(black_box(old), black_box(new)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_diff);
criterion_main!(benches);
