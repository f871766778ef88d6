//! Document composition: turns article records into a sectioned volume.
//!
//! Section order is fixed: author roster, table of contents, the optional
//! editorial, then one section per article in the caller's order.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::extract::{SourceDocument, text_to_blocks};
use crate::model::{
    ArticleInfo, Author, AuthorKey, Block, CompiledDocument, Inline, Paragraph, Run, Section,
    SectionKind,
};

pub const HEADING_STYLE: &str = "Heading1";
pub const TOC_HEADING_STYLE: &str = "TOCHeading";

/// Headings and field settings for the generated sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    pub roster_heading: String,
    pub toc_heading: String,
    pub editorial_heading: String,
    /// Field instruction of the table of contents.
    pub toc_instruction: String,
    /// Text shown until the consumer refreshes the table of contents.
    pub toc_placeholder: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            roster_heading: "Authors".to_string(),
            toc_heading: "Table of Contents".to_string(),
            editorial_heading: "Editorial".to_string(),
            toc_instruction: r#"TOC \o "1-3" \h \z \u"#.to_string(),
            toc_placeholder: "Update this field to build the table of contents.".to_string(),
        }
    }
}

/// Where the editorial foreword comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorialSource {
    /// A package or text file whose blocks are copied verbatim.
    File(PathBuf),
    /// Text typed directly; each line becomes a paragraph.
    Text(String),
}

/// An editorial read from its source, ready to compose or print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editorial {
    pub blocks: Vec<Block>,
    pub text: String,
}

impl EditorialSource {
    /// Read the editorial. A file is opened once for both its blocks and text.
    pub fn load(&self) -> Result<Editorial> {
        match self {
            EditorialSource::File(path) => {
                let SourceDocument { blocks, text, .. } = SourceDocument::open(path)?;
                Ok(Editorial { blocks, text })
            }
            EditorialSource::Text(text) => Ok(Editorial {
                blocks: text_to_blocks(text),
                text: text.clone(),
            }),
        }
    }
}

/// Builds a [`CompiledDocument`] from article records.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    options: ComposeOptions,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ComposeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose the volume. `authors` may contain duplicates; the roster is
    /// deduplicated and sorted here. Only reading the editorial can fail.
    pub fn compose(
        &self,
        articles: &[ArticleInfo],
        editorial: Option<&EditorialSource>,
        authors: &[Author],
    ) -> Result<CompiledDocument> {
        let editorial = editorial.map(EditorialSource::load).transpose()?;
        Ok(self.compose_loaded(articles, editorial.as_ref(), authors))
    }

    /// Compose with an editorial that has already been read.
    pub fn compose_loaded(
        &self,
        articles: &[ArticleInfo],
        editorial: Option<&Editorial>,
        authors: &[Author],
    ) -> CompiledDocument {
        let mut doc = CompiledDocument::new();

        doc.push(self.roster_section(&dedup_authors(authors)));
        doc.push(self.toc_section());

        if let Some(editorial) = editorial {
            doc.push(self.editorial_section(&editorial.blocks));
        }

        for (index, article) in articles.iter().enumerate() {
            doc.push(article_section(index, article));
        }

        log::debug!(
            "composed {} section(s), {} page break(s)",
            doc.sections.len(),
            doc.page_break_count()
        );
        doc
    }

    fn roster_section(&self, roster: &[Author]) -> Section {
        let mut section = Section::new(SectionKind::AuthorRoster);
        section.push(heading(&self.options.roster_heading));
        for author in roster {
            section.push(Paragraph::with_text(roster_line(author)));
        }
        section
    }

    fn toc_section(&self) -> Section {
        let mut section = Section::new(SectionKind::TableOfContents);
        section.push(
            Paragraph::with_text(self.options.toc_heading.as_str()).with_style(TOC_HEADING_STYLE),
        );
        section.push(Paragraph::new().with_run(Run {
            content: vec![Inline::Field {
                instruction: self.options.toc_instruction.clone(),
                placeholder: self.options.toc_placeholder.clone(),
            }],
            ..Default::default()
        }));
        section
    }

    fn editorial_section(&self, blocks: &[Block]) -> Section {
        let mut section = Section::new(SectionKind::Editorial);
        section.push(heading(&self.options.editorial_heading));
        section.blocks.extend(blocks.iter().cloned());
        section
    }
}

/// Compose with the default headings.
pub fn compose(
    articles: &[ArticleInfo],
    editorial: Option<&EditorialSource>,
    authors: &[Author],
) -> Result<CompiledDocument> {
    Composer::new().compose(articles, editorial, authors)
}

/// Every author of every article, in article order.
pub fn collect_authors(articles: &[ArticleInfo]) -> Vec<Author> {
    articles
        .iter()
        .flat_map(|a| a.authors.iter().cloned())
        .collect()
}

/// Remove duplicate authors and sort the result by name.
///
/// The first record seen for a key is kept; later duplicates only fill its
/// empty fields. The sort is stable, so equal names keep first-seen order.
pub fn dedup_authors(authors: &[Author]) -> Vec<Author> {
    let mut index: HashMap<AuthorKey, usize> = HashMap::with_capacity(authors.len());
    let mut roster: Vec<Author> = Vec::with_capacity(authors.len());

    for author in authors {
        match index.get(&author.key()) {
            Some(&i) => roster[i].merge_missing(author),
            None => {
                index.insert(author.key(), roster.len());
                roster.push(author.clone());
            }
        }
    }

    roster.sort_by(|a, b| a.name.cmp(&b.name));
    roster
}

/// `name - email - institution`, leaving out empty parts.
pub fn roster_line(author: &Author) -> String {
    [
        Some(author.name.as_str()),
        author.email.as_deref(),
        author.institution.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" - ")
}

fn heading(text: &str) -> Paragraph {
    Paragraph::with_text(text).with_style(HEADING_STYLE)
}

fn article_section(index: usize, article: &ArticleInfo) -> Section {
    let mut section = Section::new(SectionKind::Article(index));
    section.push(heading(&article.title));
    if let Some(byline) = article.byline() {
        section.push(Paragraph::new().with_run(Run::new(byline).italic()));
    }
    section.blocks.extend(article.content_blocks.iter().cloned());
    section
}
