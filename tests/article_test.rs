//! Article building from files on disk.

use std::fs;

use proceedings::article::{ArticleBuilder, ArticleConfig, PreambleSkip};
use proceedings::author::{IdPolicy, ParserConfig};
use proceedings::docx::{PackageOptions, write_docx};
use proceedings::extract::extract;
use proceedings::model::{Block, OpaqueBlock, Paragraph};
use proceedings::{Error, parse_author};
use tempfile::TempDir;

const PREAMBLE: &[&str] = &[
    "A Study of Things",
    "Maria Silva - maria@ex.com - 00123 - Universidade X",
    "Carlos Lima - E-mail: carlos@ex.org - ID: 987654 - Instituto Y",
    "João Souza, Escola 3, joao@escola.pt",
    "Abstract",
    "We study things.",
];

#[test]
fn test_author_zone_from_package() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("study.docx");
    let blocks: Vec<Block> = PREAMBLE
        .iter()
        .map(|t| Block::from(Paragraph::with_text(*t)))
        .collect();
    write_docx(&blocks, &path, PackageOptions::default()).unwrap();

    let article = ArticleBuilder::new().build(&path).expect("build article");
    assert_eq!(article.title, "A Study of Things");
    assert_eq!(article.authors.len(), 3);
    assert_eq!(article.authors[1].id.as_deref(), Some("987654"));
    // authors + 1 = 4 leading blocks skipped
    assert_eq!(article.content_blocks[0].text(), "Abstract");
    assert_eq!(article.content_blocks.len(), 2);
    assert_eq!(article.text, PREAMBLE.concat());
    assert_eq!(extract(&path).unwrap(), PREAMBLE.concat());
}

#[test]
fn test_text_source_behaves_like_package() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("study.txt");
    fs::write(&path, PREAMBLE.join("\n")).unwrap();

    let config = ArticleConfig {
        parser: ParserConfig {
            id_policy: IdPolicy::AnyDigits,
        },
        preamble_skip: PreambleSkip::AbstractBoundary,
    };
    let article = ArticleBuilder::with_config(config).build(&path).unwrap();

    assert_eq!(article.authors.len(), 3);
    assert_eq!(article.authors[2].id.as_deref(), Some("3"));
    assert_eq!(article.content_blocks.len(), 2);
    assert_eq!(article.text, PREAMBLE.join("\n"));
}

#[test]
fn test_leading_bookmark_does_not_shift_title() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marked.docx");
    let blocks = vec![
        Block::Opaque(OpaqueBlock {
            xml: r#"<w:bookmarkStart w:id="0" w:name="_GoBack"/>"#.into(),
            text: String::new(),
        }),
        Block::from(Paragraph::with_text("Real Title")),
        Block::from(Paragraph::with_text("Ana Reis - ana@x.pt")),
        Block::from(Paragraph::with_text("Abstract")),
    ];
    write_docx(&blocks, &path, PackageOptions::default()).unwrap();

    let article = ArticleBuilder::new().build(&path).expect("build article");
    assert_eq!(article.title, "Real Title");
    assert_eq!(article.authors.len(), 1);
    assert_eq!(article.authors[0].name, "Ana Reis");
    assert_eq!(article.content_blocks[0].text(), "Abstract");
}

#[test]
fn test_missing_source_is_io_error() {
    let err = ArticleBuilder::new()
        .build("/nonexistent/paper.docx")
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_build_all_skips_failures_in_order() {
    let dir = TempDir::new().unwrap();
    let one = dir.path().join("one.txt");
    let two = dir.path().join("two.txt");
    fs::write(&one, "One").unwrap();
    fs::write(&two, "Two").unwrap();
    let missing = dir.path().join("missing.docx");

    let (articles, skipped) = ArticleBuilder::new().build_all(&[&one, &missing, &two]);
    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["One", "Two"]);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].0, missing);
}

#[test]
fn test_parse_author_examples() {
    let author = parse_author("Maria Silva - maria@ex.com - 00123 - Universidade X").unwrap();
    assert_eq!(author.name, "Maria Silva");
    assert_eq!(author.email.as_deref(), Some("maria@ex.com"));
    assert_eq!(author.institution.as_deref(), Some("Universidade X"));
    assert_eq!(author.id.as_deref(), Some("00123"));

    assert!(parse_author("Abstract").is_none());
}
