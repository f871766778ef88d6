//! Article info builder: one source document in, one [`ArticleInfo`] out.
//!
//! Block 0 is the title. The blocks that follow, up to the abstract heading,
//! form the author zone; only those lines are handed to the author parser.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::author::{AuthorParser, ParserConfig, is_abstract_heading};
use crate::error::Result;
use crate::extract::SourceDocument;
use crate::model::{ArticleInfo, Author, Block};
use crate::util::{file_name, file_stem};

/// Where the article body starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreambleSkip {
    /// Skip the title plus one block per recognized author. Stray lines
    /// between the last author and the abstract stay in the body.
    #[default]
    AuthorCount,
    /// Skip everything before the abstract heading.
    AbstractBoundary,
}

/// Configuration for building article records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleConfig {
    pub parser: ParserConfig,
    pub preamble_skip: PreambleSkip,
}

/// Builds [`ArticleInfo`] records from source files.
#[derive(Debug, Clone, Default)]
pub struct ArticleBuilder {
    config: ArticleConfig,
    parser: AuthorParser,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ArticleConfig) -> Self {
        Self {
            config,
            parser: AuthorParser::with_config(config.parser),
        }
    }

    pub fn config(&self) -> &ArticleConfig {
        &self.config
    }

    /// Read and analyze one source file.
    pub fn build<P: AsRef<Path>>(&self, path: P) -> Result<ArticleInfo> {
        let source = SourceDocument::open(path)?;
        Ok(self.build_source(source))
    }

    /// Analyze an already-read source.
    pub fn build_source(&self, source: SourceDocument) -> ArticleInfo {
        let SourceDocument {
            path, blocks, text, ..
        } = source;
        self.build_blocks(path, blocks, text)
    }

    /// Analyze a block sequence. `text` is the flattened source text kept
    /// for the plain-text export.
    pub fn build_blocks(&self, file_path: PathBuf, blocks: Vec<Block>, text: String) -> ArticleInfo {
        let title = blocks
            .first()
            .map(|b| b.text().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| file_stem(&file_path));

        let boundary = abstract_boundary(&blocks);
        let zone = blocks.get(1..boundary).unwrap_or_default();

        let mut authors = Vec::new();
        let mut preamble = Vec::new();
        for block in zone {
            let line = block.text();
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            preamble.push(line.to_string());
            if let Some(author) = self.parser.parse(line) {
                authors.push(author);
            }
        }

        let skip = match self.config.preamble_skip {
            PreambleSkip::AuthorCount => (authors.len() + 1).min(blocks.len()),
            PreambleSkip::AbstractBoundary => boundary.max(1).min(blocks.len()),
        };
        let content_blocks = blocks[skip..].to_vec();

        log::debug!(
            "{}: title {:?}, {} author(s), {} body block(s)",
            file_path.display(),
            title,
            authors.len(),
            content_blocks.len()
        );

        ArticleInfo {
            file_path,
            title,
            authors,
            preamble,
            content_blocks,
            text,
        }
    }

    /// Build every source in order. Unreadable sources are skipped with a
    /// warning and reported back alongside the records that did build.
    pub fn build_all<P: AsRef<Path>>(&self, paths: &[P]) -> (Vec<ArticleInfo>, Vec<(PathBuf, String)>) {
        let mut articles = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match self.build(path) {
                Ok(article) => articles.push(article),
                Err(e) => {
                    log::warn!("skipping {}: {e}", path.display());
                    skipped.push((path.to_path_buf(), e.to_string()));
                }
            }
        }
        (articles, skipped)
    }
}

/// Build one article with the default configuration.
pub fn build<P: AsRef<Path>>(path: P) -> Result<ArticleInfo> {
    ArticleBuilder::new().build(path)
}

/// Index of the first block after the title that opens the abstract, or
/// the block count when there is none.
pub fn abstract_boundary(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, b)| is_abstract_heading(&b.text()))
        .map_or(blocks.len(), |(i, _)| i)
}

/// Per-document record of the JSON data dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub paragraphs: Vec<String>,
    pub authors: Vec<Author>,
}

impl From<&ArticleInfo> for DocumentData {
    fn from(article: &ArticleInfo) -> Self {
        Self {
            file_name: file_name(&article.file_path),
            paragraphs: article.preamble.clone(),
            authors: article.authors.clone(),
        }
    }
}
