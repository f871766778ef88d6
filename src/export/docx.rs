//! Merged package exporter.

use std::io::{self, Seek, Write};

use super::{Compilation, Exporter};
use crate::compose::{ComposeOptions, Composer, collect_authors};
use crate::docx::{PackageOptions, PackageWriter};

/// Configuration for package export.
#[derive(Debug, Clone, Default)]
pub struct DocxConfig {
    pub compose: ComposeOptions,
    /// Deflate level (0-9); the writer's default when unset.
    pub compression_level: Option<i64>,
}

/// Composes the volume and writes it as a single package with pagination
/// reset across sections.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter {
    config: DocxConfig,
}

impl DocxExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DocxConfig) -> Self {
        Self { config }
    }
}

impl Exporter for DocxExporter {
    fn export<W: Write + Seek>(&self, input: &Compilation<'_>, writer: &mut W) -> io::Result<()> {
        let authors = collect_authors(input.articles);
        let doc = Composer::with_options(self.config.compose.clone()).compose_loaded(
            input.articles,
            input.editorial,
            &authors,
        );

        let mut package = PackageWriter::new(
            writer,
            PackageOptions {
                title: None,
                reset_pagination: true,
                update_fields: true,
                compression_level: self.config.compression_level,
            },
        );
        package.write(&doc.to_blocks());
        package.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;
    use crate::docx::Package;
    use crate::model::{ArticleInfo, Author, Block, Paragraph};

    fn article(title: &str, author: &str) -> ArticleInfo {
        ArticleInfo {
            file_path: PathBuf::from(format!("{title}.docx")),
            title: title.into(),
            authors: vec![Author::new(author).with_email(format!("{author}@x.pt"))],
            preamble: vec![author.into()],
            content_blocks: vec![Block::from(Paragraph::with_text(format!("{title} body")))],
            text: String::new(),
        }
    }

    #[test]
    fn test_export_writes_merged_package() {
        let articles = vec![article("One", "ana"), article("Two", "rui")];
        let mut out = Cursor::new(Vec::new());
        DocxExporter::new()
            .export(&Compilation::new(&articles), &mut out)
            .unwrap();

        out.set_position(0);
        let package = Package::from_reader(out).unwrap();
        let texts: Vec<String> = package.blocks().unwrap().iter().map(Block::text).collect();

        assert_eq!(texts[0], "Authors");
        assert!(texts.contains(&"ana - ana@x.pt".to_string()));
        assert!(texts.contains(&"One body".to_string()));
        assert_eq!(texts.last().unwrap(), "Two body");

        let xml = package.document_xml();
        assert!(xml.contains(r#"<w:pgNumType w:start="1"/>"#));
        assert!(xml.contains("eachSect"));
        assert!(xml.contains("TOC \\o"));
    }
}
