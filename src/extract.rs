//! Text extraction from source files.
//!
//! Sources are either structured packages (`.docx`) or plain text (any other
//! extension). [`extract`] flattens a source to a single string; the block
//! level API ([`read_blocks`], [`SourceDocument`]) keeps paragraph structure
//! for callers that need it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::docx::read_docx;
use crate::error::Result;
use crate::model::{Block, Paragraph};
use crate::util::{decode_text, is_package};

/// How a source file is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Package,
    PlainText,
}

impl SourceKind {
    pub fn of(path: &Path) -> Self {
        if is_package(path) {
            SourceKind::Package
        } else {
            SourceKind::PlainText
        }
    }
}

/// A source file read once, with both its block structure and flat text.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub blocks: Vec<Block>,
    pub text: String,
}

impl SourceDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let kind = SourceKind::of(path);
        let (blocks, text) = match kind {
            SourceKind::Package => {
                let blocks = read_docx(path)?;
                let text = flatten(&blocks);
                (blocks, text)
            }
            SourceKind::PlainText => {
                let text = read_plain_text(path)?;
                (text_to_blocks(&text), text)
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            blocks,
            text,
        })
    }
}

/// Extract the plain text of a source.
///
/// For a package this is the inner text of every body block in document
/// order, with no separator between blocks. For a text file it is the
/// decoded file contents, unchanged.
pub fn extract<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    match SourceKind::of(path) {
        SourceKind::Package => Ok(flatten(&read_docx(path)?)),
        SourceKind::PlainText => read_plain_text(path),
    }
}

/// Read a source's block sequence. Text files become one paragraph per line.
pub fn read_blocks<P: AsRef<Path>>(path: P) -> Result<Vec<Block>> {
    let path = path.as_ref();
    match SourceKind::of(path) {
        SourceKind::Package => read_docx(path),
        SourceKind::PlainText => Ok(text_to_blocks(&read_plain_text(path)?)),
    }
}

pub fn read_plain_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_text(&bytes, None).into_owned())
}

/// Split text into paragraphs, one per line.
pub fn text_to_blocks(text: &str) -> Vec<Block> {
    text.lines()
        .map(|line| Block::from(Paragraph::with_text(line)))
        .collect()
}

/// Concatenate block inner text without delimiters.
pub fn flatten(blocks: &[Block]) -> String {
    blocks.iter().map(Block::text).collect()
}
