//! # proceedings
//!
//! Compile independently authored articles into one proceedings volume.
//!
//! ## Features
//!
//! - Read `.docx` packages and plain-text files as block sequences
//! - Recover author records (name, email, institution, identifier) from
//!   each article's preamble
//! - Compose a merged volume: author roster, live table of contents,
//!   editorial, then the articles in the order given
//! - Export as a `.docx` package with page and note numbering restarted per
//!   section, as plain text, or as a JSON data dump
//!
//! ## Quick Start
//!
//! ```no_run
//! use proceedings::{CompileConfig, CompileRequest, EditorialSource, SourceList, compile};
//!
//! let mut sources = SourceList::new();
//! sources.extend(["first.docx", "second.docx"]);
//!
//! let request = CompileRequest::new(sources)
//!     .with_editorial(EditorialSource::File("editorial.docx".into()));
//! let report = compile(&request, "volume.docx", &CompileConfig::default())?;
//! println!("{}", report.summary());
//! # Ok::<(), proceedings::Error>(())
//! ```
//!
//! ## Lower-level API
//!
//! ```no_run
//! use proceedings::author::parse_author;
//! use proceedings::extract::extract;
//!
//! let author = parse_author("Maria Silva - maria@ex.com - 00123 - Universidade X");
//! let text = extract("paper.docx")?;
//! # Ok::<(), proceedings::Error>(())
//! ```

pub mod article;
pub mod author;
pub mod compile;
pub mod compose;
pub mod docx;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub(crate) mod util;

pub use article::{ArticleBuilder, ArticleConfig, DocumentData, PreambleSkip};
pub use author::{AuthorParser, IdPolicy, ParserConfig, parse_author};
pub use compile::{
    CompileConfig, CompileReport, CompileRequest, EditorialSource, SourceList, compile,
};
pub use compose::{ComposeOptions, Composer, Editorial, compose, dedup_authors};
pub use error::{Error, Result};
pub use export::{Exporter, OutputFormat};
pub use extract::extract;
pub use model::{ArticleInfo, Author, Block, CompiledDocument, Section, SectionKind};
