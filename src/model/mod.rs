//! Core data model for compiling a proceedings volume.
//!
//! This module contains:
//! - Block content (paragraphs, runs, inline content, opaque subtrees)
//! - Author records and their duplicate-detection key
//! - Per-article structured records
//! - The compiled, sectioned output document

mod article;
mod author;
mod block;
mod compiled;

pub use article::ArticleInfo;
pub use author::{Author, AuthorKey};
pub use block::{Alignment, Block, BreakKind, Inline, OpaqueBlock, Paragraph, Run, RunStyle};
pub use compiled::{CompiledDocument, Section, SectionKind};
