//! Block-level document content: paragraphs, runs and opaque subtrees.
//!
//! A [`Block`] is owned by exactly one document. Cloning a block yields an
//! independent deep copy; nothing here refers back to the package it was
//! read from, so blocks can move freely between documents.

/// A body-level unit of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    /// A non-paragraph body element (table, content control, ...) carried
    /// through as its serialized XML.
    Opaque(OpaqueBlock),
}

/// Paragraph justification (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// A paragraph: optional paragraph properties plus an ordered list of runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph style id (`w:pStyle`), e.g. `"Heading1"`.
    pub style: Option<String>,
    pub alignment: Option<Alignment>,
    pub runs: Vec<Run>,
}

/// A styled span of content within a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub style: RunStyle,
    pub content: Vec<Inline>,
}

/// Character formatting carried by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    /// Underline kind (`w:u/@w:val`), e.g. `"single"`.
    pub underline: Option<String>,
    /// ASCII font name (`w:rFonts/@w:ascii`).
    pub font: Option<String>,
    /// Font size in half-points (`w:sz`).
    pub size: Option<u32>,
    /// Hex RGB color (`w:color`).
    pub color: Option<String>,
}

/// Inline run content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Tab,
    Break(BreakKind),
    /// A field the consumer evaluates when rendering, e.g. a table of contents.
    Field {
        instruction: String,
        placeholder: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    Line,
    Page,
    Column,
}

/// Serialized XML of a body element that is not a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueBlock {
    /// The element and its whole subtree, as it appeared in the source part.
    pub xml: String,
    /// Concatenated text of the subtree.
    pub text: String,
}

impl Block {
    /// Inner text of the block: text content only, no tabs or breaks.
    pub fn text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.text(),
            Block::Opaque(o) => o.text.clone(),
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Opaque(_) => None,
        }
    }

    /// Whether this block is a paragraph holding nothing but a page break.
    pub fn is_page_break(&self) -> bool {
        let Some(p) = self.as_paragraph() else {
            return false;
        };
        let mut inlines = p.runs.iter().flat_map(|r| r.content.iter());
        matches!(inlines.next(), Some(Inline::Break(BreakKind::Page))) && inlines.next().is_none()
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl Alignment {
    /// Parse a `w:jc` value. Both the transitional and strict spellings are accepted.
    pub fn from_val(val: &str) -> Option<Self> {
        match val {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "distribute" => Some(Alignment::Justify),
            _ => None,
        }
    }

    pub fn as_val(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph with a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new().with_run(Run::new(text))
    }

    /// A paragraph that only forces a page break.
    pub fn page_break() -> Self {
        Self::new().with_run(Run {
            style: RunStyle::default(),
            content: vec![Inline::Break(BreakKind::Page)],
        })
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            run.push_text(&mut out);
        }
        out
    }
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            style: RunStyle::default(),
            content: vec![Inline::Text(text.into())],
        }
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style.italic = true;
        self
    }

    pub fn push_text(&self, out: &mut String) {
        for inline in &self.content {
            match inline {
                Inline::Text(t) => out.push_str(t),
                Inline::Field { placeholder, .. } => out.push_str(placeholder),
                Inline::Tab | Inline::Break(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let p = Paragraph::new()
            .with_run(Run::new("Hello, "))
            .with_run(Run::new("world").bold());
        assert_eq!(p.text(), "Hello, world");
    }

    #[test]
    fn test_text_skips_tabs_and_breaks() {
        let p = Paragraph::new().with_run(Run {
            style: RunStyle::default(),
            content: vec![
                Inline::Text("a".into()),
                Inline::Tab,
                Inline::Break(BreakKind::Line),
                Inline::Text("b".into()),
            ],
        });
        assert_eq!(Block::from(p).text(), "ab");
    }

    #[test]
    fn test_page_break_detection() {
        assert!(Block::from(Paragraph::page_break()).is_page_break());
        assert!(!Block::from(Paragraph::with_text("x")).is_page_break());
        assert!(!Block::from(Paragraph::new()).is_page_break());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Block::from(Paragraph::with_text("original"));
        let mut copy = original.clone();
        if let Block::Paragraph(p) = &mut copy {
            p.runs[0].content[0] = Inline::Text("changed".into());
        }
        assert_eq!(original.text(), "original");
        assert_eq!(copy.text(), "changed");
    }

    #[test]
    fn test_alignment_values() {
        assert_eq!(Alignment::from_val("both"), Some(Alignment::Justify));
        assert_eq!(Alignment::from_val("start"), Some(Alignment::Left));
        assert_eq!(Alignment::from_val("bogus"), None);
        assert_eq!(Alignment::Center.as_val(), "center");
    }
}
