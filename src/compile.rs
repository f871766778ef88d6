//! Top-level compile: source list in, one output file out.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::article::{ArticleBuilder, ArticleConfig};
use crate::compose::collect_authors;
use crate::error::{Error, Result};
use crate::export::{
    Compilation, DocxConfig, DocxExporter, Exporter, JsonConfig, JsonExporter, OutputFormat,
    TextConfig, TextExporter,
};

pub use crate::compose::EditorialSource;

/// The ordered, editable list of source files.
///
/// Order decides article order in the output. Every editing operation
/// returns whether the list changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceList {
    files: Vec<PathBuf>,
}

impl SourceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        self.files.push(path.into());
        true
    }

    pub fn extend<I, P>(&mut self, paths: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let before = self.files.len();
        self.files.extend(paths.into_iter().map(Into::into));
        self.files.len() != before
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            return false;
        }
        self.files.remove(index);
        true
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.files.len() {
            return false;
        }
        self.files.swap(index, index - 1);
        true
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.files.len() {
            return false;
        }
        self.files.swap(index, index + 1);
        true
    }

    /// Drag-and-drop reorder: take the item at `from` and drop it before the
    /// item currently at `to` (`to == len` drops it at the end).
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.files.len();
        if from >= len || to > len {
            return false;
        }
        let target = if from < to { to - 1 } else { to };
        if target == from {
            return false;
        }
        let item = self.files.remove(from);
        self.files.insert(target, item);
        true
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.files.iter()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SourceList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SourceList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// One compile run's inputs.
#[derive(Debug, Clone, Default)]
pub struct CompileRequest {
    pub source_files: SourceList,
    pub editorial: Option<EditorialSource>,
}

impl CompileRequest {
    pub fn new(source_files: SourceList) -> Self {
        Self {
            source_files,
            editorial: None,
        }
    }

    pub fn with_editorial(mut self, editorial: EditorialSource) -> Self {
        self.editorial = Some(editorial);
        self
    }
}

/// Settings for every stage of a compile run.
#[derive(Debug, Clone, Default)]
pub struct CompileConfig {
    pub article: ArticleConfig,
    pub docx: DocxConfig,
    pub text: TextConfig,
    pub json: JsonConfig,
}

/// What a compile run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub format: OutputFormat,
    pub output: PathBuf,
    /// Articles written, in output order.
    pub articles: usize,
    /// Sources that could not be read, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
    /// Authors found across all articles, before deduplication.
    pub authors: usize,
    /// Page breaks inserted between sections (package output only).
    pub page_breaks: usize,
}

impl CompileReport {
    /// One-line status message.
    pub fn summary(&self) -> String {
        let mut msg = format!("{} compiled with {} article(s)", self.format, self.articles);
        if !self.skipped.is_empty() {
            msg.push_str(&format!(", {} skipped", self.skipped.len()));
        }
        msg
    }
}

/// Compile the request's sources into `destination`, choosing the output
/// format by its extension.
///
/// Unreadable sources are skipped and listed in the report, but a run with
/// no readable source at all is a validation error. Everything else (no
/// sources, unknown format, editorial or output errors) aborts the run.
/// Input errors are raised before the destination is opened; a failed write
/// may leave a partially written destination behind.
pub fn compile<P: AsRef<Path>>(
    request: &CompileRequest,
    destination: P,
    config: &CompileConfig,
) -> Result<CompileReport> {
    let destination = destination.as_ref();

    if request.source_files.is_empty() {
        return Err(Error::Validation("no source files selected".into()));
    }
    let format = OutputFormat::from_path(destination)?;

    log::info!(
        "compiling {} source(s) to {} ({format})",
        request.source_files.len(),
        destination.display()
    );
    if request.editorial.is_none() {
        log::warn!("compiling without an editorial");
    }

    let editorial = request
        .editorial
        .as_ref()
        .map(EditorialSource::load)
        .transpose()?;

    let builder = ArticleBuilder::with_config(config.article);
    let (articles, skipped) = builder.build_all(request.source_files.as_slice());
    if articles.is_empty() {
        let reasons: Vec<String> = skipped
            .iter()
            .map(|(path, reason)| format!("{}: {reason}", path.display()))
            .collect();
        return Err(Error::Validation(format!(
            "no readable source files ({})",
            reasons.join("; ")
        )));
    }
    let authors = collect_authors(&articles).len();

    let input = Compilation::new(&articles).with_editorial(editorial.as_ref());
    write_output(format, &input, destination, config).map_err(|source| Error::Write {
        path: destination.to_path_buf(),
        source,
    })?;

    // roster + contents + editorial + articles, one break between each
    let sections = 2 + usize::from(editorial.is_some()) + articles.len();
    let page_breaks = match format {
        OutputFormat::Docx => sections - 1,
        OutputFormat::Text | OutputFormat::Json => 0,
    };

    let report = CompileReport {
        format,
        output: destination.to_path_buf(),
        articles: articles.len(),
        skipped,
        authors,
        page_breaks,
    };
    log::info!("{}", report.summary());
    Ok(report)
}

fn write_output(
    format: OutputFormat,
    input: &Compilation<'_>,
    destination: &Path,
    config: &CompileConfig,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(destination)?);
    match format {
        OutputFormat::Docx => {
            DocxExporter::with_config(config.docx.clone()).export(input, &mut writer)?
        }
        OutputFormat::Text => {
            TextExporter::with_config(config.text.clone()).export(input, &mut writer)?
        }
        OutputFormat::Json => {
            JsonExporter::with_config(config.json.clone()).export(input, &mut writer)?
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> SourceList {
        names.iter().collect::<SourceList>()
    }

    fn names(list: &SourceList) -> Vec<String> {
        list.iter().map(|p| p.display().to_string()).collect()
    }

    #[test]
    fn test_move_up_and_down() {
        let mut files = list(&["a", "b", "c"]);
        assert!(files.move_up(2));
        assert_eq!(names(&files), ["a", "c", "b"]);
        assert!(!files.move_up(0));
        assert!(files.move_down(0));
        assert_eq!(names(&files), ["c", "a", "b"]);
        assert!(!files.move_down(2));
        assert!(!files.move_down(7));
    }

    #[test]
    fn test_move_item_drop_semantics() {
        let mut files = list(&["a", "b", "c", "d"]);
        // Drop "a" before "c": it lands between "b" and "c".
        assert!(files.move_item(0, 2));
        assert_eq!(names(&files), ["b", "a", "c", "d"]);
        // Drop at the end.
        assert!(files.move_item(0, 4));
        assert_eq!(names(&files), ["a", "c", "d", "b"]);
        // Drop "d" before "a".
        assert!(files.move_item(2, 0));
        assert_eq!(names(&files), ["d", "a", "c", "b"]);
        // Dropping right after itself is a no-op.
        assert!(!files.move_item(1, 2));
        assert!(!files.move_item(1, 1));
        assert!(!files.move_item(9, 0));
        assert!(!files.move_item(0, 9));
    }

    #[test]
    fn test_add_remove() {
        let mut files = SourceList::new();
        assert!(files.add("a"));
        assert!(files.extend(["b", "c"]));
        assert!(!files.extend(Vec::<PathBuf>::new()));
        assert!(files.remove(1));
        assert!(!files.remove(5));
        assert_eq!(names(&files), ["a", "c"]);
    }

    #[test]
    fn test_empty_request_is_rejected() {
        let err = compile(
            &CompileRequest::default(),
            "/nonexistent/out.docx",
            &CompileConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_unknown_format_is_rejected_before_reading() {
        let request = CompileRequest::new(list(&["/nonexistent/a.docx"]));
        let err = compile(&request, "/tmp/out.pdf", &CompileConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_summary() {
        let report = CompileReport {
            format: OutputFormat::Docx,
            output: PathBuf::from("v.docx"),
            articles: 3,
            skipped: vec![(PathBuf::from("x.docx"), "bad".into())],
            authors: 5,
            page_breaks: 4,
        };
        assert_eq!(report.summary(), "DOCX compiled with 3 article(s), 1 skipped");
    }
}
