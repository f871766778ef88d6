use super::{Block, Paragraph};

/// Kind of a section in the compiled volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    AuthorRoster,
    TableOfContents,
    Editorial,
    /// The article at this position in the caller's source order.
    Article(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub blocks: Vec<Block>,
}

/// The assembled volume: sections in composition order.
///
/// Sections are separated by page breaks when flattened; nothing follows
/// the last block of the last section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledDocument {
    pub sections: Vec<Section>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }
}

impl CompiledDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Number of page breaks inserted between sections.
    pub fn page_break_count(&self) -> usize {
        self.sections.len().saturating_sub(1)
    }

    /// Flatten into the body block sequence, inserting a page break after
    /// every section except the last.
    pub fn to_blocks(&self) -> Vec<Block> {
        let total: usize = self.sections.iter().map(|s| s.blocks.len()).sum();
        let mut blocks = Vec::with_capacity(total + self.sections.len());
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                blocks.push(Block::from(Paragraph::page_break()));
            }
            blocks.extend(section.blocks.iter().cloned());
        }
        blocks
    }
}
