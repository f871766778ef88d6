//! JSON data dump: one record per processed source.

use std::io::{self, Seek, Write};

use super::{Compilation, Exporter};
use crate::article::DocumentData;

/// Configuration for JSON export.
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Indent the output.
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Exporter for the JSON data dump. The editorial is not part of the dump.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    config: JsonConfig,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }
}

impl Exporter for JsonExporter {
    fn export<W: Write + Seek>(&self, input: &Compilation<'_>, writer: &mut W) -> io::Result<()> {
        let records: Vec<DocumentData> = input.articles.iter().map(DocumentData::from).collect();
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut *writer, &records)?;
        } else {
            serde_json::to_writer(&mut *writer, &records)?;
        }
        writeln!(writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;
    use crate::model::{ArticleInfo, Author};

    #[test]
    fn test_records() {
        let articles = vec![ArticleInfo {
            file_path: PathBuf::from("/in/paper.docx"),
            title: "Paper".into(),
            authors: vec![Author::new("Ana Reis").with_id("12345")],
            preamble: vec!["Ana Reis 12345".into()],
            content_blocks: Vec::new(),
            text: String::new(),
        }];

        let mut out = Cursor::new(Vec::new());
        JsonExporter::with_config(JsonConfig { pretty: false })
            .export(&Compilation::new(&articles), &mut out)
            .unwrap();
        let out = String::from_utf8(out.into_inner()).unwrap();

        assert_eq!(
            out.trim_end(),
            r#"[{"fileName":"paper.docx","paragraphs":["Ana Reis 12345"],"authors":[{"name":"Ana Reis","id":"12345"}]}]"#
        );
    }

    #[test]
    fn test_empty_dump_is_an_empty_array() {
        let mut out = Cursor::new(Vec::new());
        JsonExporter::new()
            .export(&Compilation::new(&[]), &mut out)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(out.get_ref()).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }
}
