//! Export module for writing a compiled volume to its output format.
//!
//! Provides the `Exporter` trait and format-specific implementations.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write + Seek` destination
//!
//! # Example
//!
//! ```no_run
//! use proceedings::article::ArticleBuilder;
//! use proceedings::export::{Compilation, Exporter, TextExporter};
//! use std::fs::File;
//!
//! let (articles, _skipped) = ArticleBuilder::new().build_all(&["a.docx", "b.docx"]);
//! let mut file = File::create("volume.txt")?;
//! TextExporter::new().export(&Compilation::new(&articles), &mut file)?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::fmt;
use std::io::{self, Seek, Write};
use std::path::Path;

use crate::compose::Editorial;
use crate::error::{Error, Result};
use crate::model::ArticleInfo;
use crate::util::extension;

mod docx;
mod json;
mod text;

pub use docx::{DocxConfig, DocxExporter};
pub use json::{JsonConfig, JsonExporter};
pub use text::{RULE, TextConfig, TextExporter};

/// Everything an exporter needs: the built articles in output order and
/// the optional editorial, already read.
#[derive(Debug, Clone, Copy)]
pub struct Compilation<'a> {
    pub articles: &'a [ArticleInfo],
    pub editorial: Option<&'a Editorial>,
}

impl<'a> Compilation<'a> {
    pub fn new(articles: &'a [ArticleInfo]) -> Self {
        Self {
            articles,
            editorial: None,
        }
    }

    pub fn with_editorial(mut self, editorial: Option<&'a Editorial>) -> Self {
        self.editorial = editorial;
        self
    }
}

/// Trait for exporting a compilation to a specific format.
///
/// Exporters use a builder pattern where configuration is held in the struct,
/// and the `export` method writes to any `Write + Seek` destination.
pub trait Exporter {
    /// Export the compilation to the provided writer.
    ///
    /// The writer can be:
    /// - `std::fs::File` for disk output
    /// - `std::io::Cursor<Vec<u8>>` for seekable in-memory output
    /// - Any other type implementing `Write + Seek`
    fn export<W: Write + Seek>(&self, input: &Compilation<'_>, writer: &mut W) -> io::Result<()>;
}

/// Output formats, chosen by destination extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Docx,
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(OutputFormat::Docx),
            "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = extension(path);
        Self::from_extension(&ext).ok_or_else(|| {
            Error::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{ext}")
            })
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Docx => "DOCX",
            OutputFormat::Text => "TXT",
            OutputFormat::Json => "JSON",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/Volume.DOCX")).unwrap(),
            OutputFormat::Docx
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("v.txt")).unwrap(),
            OutputFormat::Text
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("v.json")).unwrap(),
            OutputFormat::Json
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("v.pdf")),
            Err(Error::UnsupportedFormat(ext)) if ext == ".pdf"
        ));
        assert!(OutputFormat::from_path(Path::new("volume")).is_err());
    }
}
