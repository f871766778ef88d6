//! Benchmarks for author parsing, composition and package output.

use std::hint::black_box;
use std::io::Cursor;
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use proceedings::article::ArticleBuilder;
use proceedings::compose::{collect_authors, compose};
use proceedings::docx::{PackageOptions, write_docx_to_writer};
use proceedings::export::{Compilation, DocxExporter, Exporter};
use proceedings::model::{ArticleInfo, Block, Paragraph};
use proceedings::parse_author;

const AUTHOR_LINES: &[&str] = &[
    "Maria Silva - maria@ex.com - 00123 - Universidade X",
    "Carlos Lima - E-mail: carlos@ex.org - ID: 987654 - Instituto Y",
    "João Souza, Escola 3, joao@escola.pt",
    "1. Rita Costa, Universidade do Porto",
    "Abstract",
];

fn sample_articles(count: usize) -> Vec<ArticleInfo> {
    let builder = ArticleBuilder::new();
    (0..count)
        .map(|i| {
            let mut blocks = vec![Block::from(Paragraph::with_text(format!("Article {i}")))];
            blocks.extend(
                AUTHOR_LINES
                    .iter()
                    .map(|l| Block::from(Paragraph::with_text(*l))),
            );
            blocks.extend(
                (0..200).map(|p| Block::from(Paragraph::with_text(format!("Paragraph {p} of {i}.")))),
            );
            builder.build_blocks(PathBuf::from(format!("a{i}.docx")), blocks, String::new())
        })
        .collect()
}

fn bench_parse_author(c: &mut Criterion) {
    c.bench_function("parse_author", |b| {
        b.iter(|| {
            for line in AUTHOR_LINES {
                black_box(parse_author(black_box(line)));
            }
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let articles = sample_articles(20);
    let authors = collect_authors(&articles);
    c.bench_function("compose_20_articles", |b| {
        b.iter(|| black_box(compose(&articles, None, &authors).unwrap()))
    });
}

fn bench_write_package(c: &mut Criterion) {
    let articles = sample_articles(20);
    let blocks = compose(&articles, None, &collect_authors(&articles))
        .unwrap()
        .to_blocks();
    c.bench_function("write_package_reset", |b| {
        b.iter(|| {
            let options = PackageOptions {
                reset_pagination: true,
                ..Default::default()
            };
            black_box(write_docx_to_writer(&blocks, Cursor::new(Vec::new()), options).unwrap())
        })
    });
}

fn bench_docx_export(c: &mut Criterion) {
    let articles = sample_articles(20);
    c.bench_function("docx_export_20_articles", |b| {
        b.iter(|| {
            let mut out = Cursor::new(Vec::new());
            DocxExporter::new()
                .export(&Compilation::new(&articles), &mut out)
                .unwrap();
            black_box(out)
        })
    });
}

criterion_group!(
    benches,
    bench_parse_author,
    bench_compose,
    bench_write_package,
    bench_docx_export
);
criterion_main!(benches);
