//! Plain-text exporter.
//!
//! Writes the editorial (if any) and then each article's extracted text,
//! every part closed by a rule line:
//!
//! ```text
//! EDITORIAL:
//! <editorial text>
//!
//! -------------------------------
//!
//! FILE: paper.docx
//!
//! <article text>
//! -------------------------------
//!
//! ```

use std::io::{self, Seek, Write};

use super::{Compilation, Exporter};
use crate::util::file_name;

/// Separator line between parts.
pub const RULE: &str = "-------------------------------";

/// Configuration for plain-text export.
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Precede each article with a `FILE: <name>` header.
    pub file_headers: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { file_headers: true }
    }
}

/// Exporter for plain-text output.
#[derive(Debug, Clone, Default)]
pub struct TextExporter {
    config: TextConfig,
}

impl TextExporter {
    /// Create a new TextExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a TextExporter with the specified configuration.
    pub fn with_config(config: TextConfig) -> Self {
        Self { config }
    }
}

impl Exporter for TextExporter {
    fn export<W: Write + Seek>(&self, input: &Compilation<'_>, writer: &mut W) -> io::Result<()> {
        if let Some(editorial) = input.editorial
            && !editorial.text.trim().is_empty()
        {
            writeln!(writer, "EDITORIAL:")?;
            writeln!(writer, "{}", editorial.text)?;
            writeln!(writer)?;
            writeln!(writer, "{RULE}")?;
            writeln!(writer)?;
        }

        for article in input.articles {
            if self.config.file_headers {
                writeln!(writer, "FILE: {}", file_name(&article.file_path))?;
                writeln!(writer)?;
            }
            writer.write_all(article.text.as_bytes())?;
            writeln!(writer)?;
            writeln!(writer, "{RULE}")?;
            writeln!(writer)?;
        }

        writer.flush()
    }
}
