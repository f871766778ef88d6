use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::pagination::reset_pagination;
use super::xml::{escape_xml, io_error};
use crate::model::{Block, BreakKind, Inline, Paragraph, Run, RunStyle};

/// Options for a newly created package.
#[derive(Debug, Clone, Default)]
pub struct PackageOptions {
    /// Written to `docProps/core.xml` as `dc:title`.
    pub title: Option<String>,
    /// Rewrite section properties so page and note numbering restart.
    pub reset_pagination: bool,
    /// Ask the consumer to refresh fields on open. Implied when the body
    /// contains a field.
    pub update_fields: bool,
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<i64>,
}

/// Writes blocks into a new package.
///
/// Blocks are appended with [`write`](Self::write) and the package parts are
/// only emitted by [`save`](Self::save).
pub struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    body: String,
    has_fields: bool,
    options: PackageOptions,
}

impl PackageWriter<File> {
    /// Create a package file on disk.
    pub fn create<P: AsRef<Path>>(path: P, options: PackageOptions) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file, options))
    }
}

impl<W: Write + Seek> PackageWriter<W> {
    pub fn new(writer: W, options: PackageOptions) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            body: String::new(),
            has_fields: false,
            options,
        }
    }

    /// Append blocks to the document body.
    pub fn write(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.has_fields |= contains_field(block);
            write_block(&mut self.body, block);
        }
    }

    /// Emit every package part and finish the archive.
    pub fn save(mut self) -> io::Result<W> {
        let deflated = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(Some(self.options.compression_level.unwrap_or(6)));

        let mut document = String::with_capacity(self.body.len() + 1024);
        document.push_str(DOCUMENT_HEADER);
        document.push_str(&self.body);
        document.push_str(BODY_SECTION_PROPERTIES);
        document.push_str("</w:body>\n</w:document>\n");
        if self.options.reset_pagination {
            document = reset_pagination(&document)?;
        }

        let update_fields = self.options.update_fields || self.has_fields;
        let parts: [(&str, String); 7] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
            ("docProps/core.xml", core_properties(self.options.title.as_deref())),
            ("word/document.xml", document),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
            ("word/styles.xml", STYLES_XML.to_string()),
            ("word/settings.xml", settings(update_fields)),
        ];

        for (name, content) in parts {
            self.zip.start_file(name, deflated).map_err(io_error)?;
            self.zip.write_all(content.as_bytes())?;
        }

        self.zip.finish().map_err(io_error)
    }
}

/// Write blocks into a new package file on disk.
pub fn write_docx<P: AsRef<Path>>(
    blocks: &[Block],
    path: P,
    options: PackageOptions,
) -> io::Result<()> {
    let mut writer = PackageWriter::create(path, options)?;
    writer.write(blocks);
    writer.save()?;
    Ok(())
}

/// Write blocks into a package on any [`Write`] + [`Seek`] destination.
pub fn write_docx_to_writer<W: Write + Seek>(
    blocks: &[Block],
    writer: W,
    options: PackageOptions,
) -> io::Result<W> {
    let mut package = PackageWriter::new(writer, options);
    package.write(blocks);
    package.save()
}

fn contains_field(block: &Block) -> bool {
    block.as_paragraph().is_some_and(|p| {
        p.runs
            .iter()
            .flat_map(|r| r.content.iter())
            .any(|i| matches!(i, Inline::Field { .. }))
    })
}

pub(crate) fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph(p) => write_paragraph(out, p),
        Block::Opaque(o) => out.push_str(&o.xml),
    }
    out.push('\n');
}

fn write_paragraph(out: &mut String, p: &Paragraph) {
    out.push_str("<w:p>");
    if p.style.is_some() || p.alignment.is_some() {
        out.push_str("<w:pPr>");
        if let Some(style) = &p.style {
            out.push_str(&format!("<w:pStyle w:val=\"{}\"/>", escape_xml(style)));
        }
        if let Some(alignment) = p.alignment {
            out.push_str(&format!("<w:jc w:val=\"{}\"/>", alignment.as_val()));
        }
        out.push_str("</w:pPr>");
    }
    for run in &p.runs {
        write_run(out, run);
    }
    out.push_str("</w:p>");
}

fn write_run(out: &mut String, run: &Run) {
    out.push_str("<w:r>");
    write_run_properties(out, &run.style);
    for inline in &run.content {
        match inline {
            Inline::Text(text) => {
                out.push_str("<w:t xml:space=\"preserve\">");
                out.push_str(&escape_xml(text));
                out.push_str("</w:t>");
            }
            Inline::Tab => out.push_str("<w:tab/>"),
            Inline::Break(BreakKind::Line) => out.push_str("<w:br/>"),
            Inline::Break(BreakKind::Page) => out.push_str("<w:br w:type=\"page\"/>"),
            Inline::Break(BreakKind::Column) => out.push_str("<w:br w:type=\"column\"/>"),
            Inline::Field {
                instruction,
                placeholder,
            } => {
                out.push_str("<w:fldChar w:fldCharType=\"begin\" w:dirty=\"true\"/>");
                out.push_str("<w:instrText xml:space=\"preserve\"> ");
                out.push_str(&escape_xml(instruction));
                out.push_str(" </w:instrText>");
                out.push_str("<w:fldChar w:fldCharType=\"separate\"/>");
                out.push_str("<w:t xml:space=\"preserve\">");
                out.push_str(&escape_xml(placeholder));
                out.push_str("</w:t>");
                out.push_str("<w:fldChar w:fldCharType=\"end\"/>");
            }
        }
    }
    out.push_str("</w:r>");
}

/// Run properties in schema order.
fn write_run_properties(out: &mut String, style: &RunStyle) {
    if *style == RunStyle::default() {
        return;
    }
    out.push_str("<w:rPr>");
    if let Some(font) = &style.font {
        let font = escape_xml(font);
        out.push_str(&format!(
            "<w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:cs=\"{font}\"/>"
        ));
    }
    if style.bold {
        out.push_str("<w:b/>");
    }
    if style.italic {
        out.push_str("<w:i/>");
    }
    if let Some(color) = &style.color {
        out.push_str(&format!("<w:color w:val=\"{}\"/>", escape_xml(color)));
    }
    if let Some(size) = style.size {
        out.push_str(&format!("<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>"));
    }
    if let Some(underline) = &style.underline {
        out.push_str(&format!("<w:u w:val=\"{}\"/>", escape_xml(underline)));
    }
    out.push_str("</w:rPr>");
}

fn core_properties(title: Option<&str>) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
"#,
    );
    if let Some(title) = title {
        xml.push_str(&format!("  <dc:title>{}</dc:title>\n", escape_xml(title)));
    }
    xml.push_str("</cp:coreProperties>\n");
    xml
}

fn settings(update_fields: bool) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:zoom w:percent="100"/>
  <w:defaultTabStop w:val="708"/>
  <w:characterSpacingControl w:val="doNotCompress"/>
"#,
    );
    if update_fields {
        xml.push_str("  <w:updateFields w:val=\"true\"/>\n");
    }
    xml.push_str(
        r#"  <w:footnotePr><w:numRestart w:val="eachSect"/></w:footnotePr>
  <w:endnotePr><w:numRestart w:val="eachSect"/></w:endnotePr>
  <w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>
</w:settings>
"#,
    );
    xml
}

const DOCUMENT_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:wpc="http://schemas.microsoft.com/office/word/2010/wordprocessingCanvas" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:wp14="http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:w10="urn:schemas-microsoft-com:office:word" xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml" xmlns:wpg="http://schemas.microsoft.com/office/word/2010/wordprocessingGroup" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" mc:Ignorable="w14 wp14">
<w:body>
"#;

/// A4 portrait with 2.5cm margins.
const BODY_SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1417" w:right="1701" w:bottom="1417" w:left="1701" w:header="708" w:footer="708" w:gutter="0"/><w:cols w:space="708"/><w:docGrid w:linePitch="360"/></w:sectPr>
"#;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>
"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>
"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/>
</Relationships>
"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
  <w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:rPr><w:sz w:val="56"/><w:szCs w:val="56"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="26"/><w:szCs w:val="26"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="TOCHeading"><w:name w:val="TOC Heading"/><w:basedOn w:val="Heading1"/><w:next w:val="Normal"/><w:pPr><w:outlineLvl w:val="9"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="TOC1"><w:name w:val="toc 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:spacing w:after="100"/></w:pPr></w:style>
</w:styles>
"#;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::docx::Package;
    use crate::model::{Alignment, OpaqueBlock};

    fn round_trip(blocks: &[Block], options: PackageOptions) -> Package {
        let cursor = write_docx_to_writer(blocks, Cursor::new(Vec::new()), options).unwrap();
        Package::from_reader(Cursor::new(cursor.into_inner())).unwrap()
    }

    #[test]
    fn test_blocks_round_trip() {
        let blocks = vec![
            Block::from(
                Paragraph::with_text("Title & <More>")
                    .with_style("Heading1")
                    .with_alignment(Alignment::Center),
            ),
            Block::from(Paragraph::new().with_run(Run::new("emphasis").italic())),
            Block::from(Paragraph::page_break()),
            Block::Opaque(OpaqueBlock {
                xml: "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"
                    .into(),
                text: "cell".into(),
            }),
        ];
        let package = round_trip(&blocks, PackageOptions::default());
        assert_eq!(package.blocks().unwrap(), blocks);
    }

    #[test]
    fn test_field_sets_update_fields() {
        let field = Paragraph::new().with_run(Run {
            style: RunStyle::default(),
            content: vec![Inline::Field {
                instruction: "TOC \\o \"1-3\"".into(),
                placeholder: "refresh me".into(),
            }],
        });
        let cursor =
            write_docx_to_writer(&[field.into()], Cursor::new(Vec::new()), PackageOptions::default())
                .unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        let mut settings = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("word/settings.xml").unwrap(), &mut settings)
            .unwrap();
        assert!(settings.contains("<w:updateFields w:val=\"true\"/>"));
    }

    #[test]
    fn test_reset_pagination_option() {
        let blocks = vec![Block::from(Paragraph::with_text("x"))];
        let reset = round_trip(
            &blocks,
            PackageOptions {
                reset_pagination: true,
                ..Default::default()
            },
        );
        assert!(reset.document_xml().contains(r#"<w:pgNumType w:start="1"/>"#));

        let plain = round_trip(&blocks, PackageOptions::default());
        assert!(!plain.document_xml().contains("pgNumType"));
    }
}
