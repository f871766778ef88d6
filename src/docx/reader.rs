use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use super::PackageError;
use super::parser::parse_document;
use super::xml::{attr_value, local_name};
use crate::error::{Error, Result};
use crate::model::Block;

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// An opened structured package, holding its main document part.
#[derive(Debug, Clone)]
pub struct Package {
    main_part: String,
    document_xml: String,
}

impl Package {
    /// Open a package from disk.
    ///
    /// A missing file is an I/O error; anything wrong with the package itself
    /// (not a zip, no main part, malformed XML) is [`Error::UnreadableDocument`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(file).map_err(|e| Error::unreadable(path, e))
    }

    /// Open a package from any [`Read`] + [`Seek`] source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> std::result::Result<Self, PackageError> {
        let mut archive = ZipArchive::new(reader)?;
        let main_part = find_main_part(&mut archive)?;
        let bytes = read_archive_file_bytes(&mut archive, &main_part)
            .map_err(|_| PackageError::MissingPart(main_part.clone()))?;
        let document_xml = String::from_utf8(bytes)?;

        Ok(Self {
            main_part,
            document_xml,
        })
    }

    /// Path of the main document part inside the archive.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Raw XML of the main document part.
    pub fn document_xml(&self) -> &str {
        &self.document_xml
    }

    /// Body blocks in document order.
    pub fn blocks(&self) -> std::result::Result<Vec<Block>, PackageError> {
        Ok(parse_document(&self.document_xml)?)
    }
}

/// Read a package's body blocks from disk.
pub fn read_docx<P: AsRef<Path>>(path: P) -> Result<Vec<Block>> {
    let path = path.as_ref();
    let package = Package::open(path)?;
    package.blocks().map_err(|e| Error::unreadable(path, e))
}

/// Locate the main document part through the package relationships,
/// falling back to the conventional location.
fn find_main_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> std::result::Result<String, PackageError> {
    if let Ok(rels) = read_archive_file_bytes(archive, PACKAGE_RELS) {
        let rels = String::from_utf8(rels)?;
        if let Some(target) = parse_office_document_target(&rels)? {
            return Ok(target);
        }
    }

    if archive.index_for_name(DEFAULT_MAIN_PART).is_some() {
        return Ok(DEFAULT_MAIN_PART.to_string());
    }

    Err(PackageError::MissingPart(DEFAULT_MAIN_PART.to_string()))
}

fn parse_office_document_target(
    rels: &str,
) -> std::result::Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(rels);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if local_name(e.name().as_ref()) == b"Relationship" => {
                let is_main = attr_value(&e, b"Type")
                    .is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL));
                if is_main && let Some(target) = attr_value(&e, b"Target") {
                    return Ok(Some(target.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn read_archive_file_bytes<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> std::result::Result<Vec<u8>, PackageError> {
    let mut file = archive.by_name(name)?;
    let mut buf = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    const BODY: &str = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hi</w:t></w:r></w:p></w:body></w:document>"#;

    #[test]
    fn test_main_part_from_relationships() {
        let rels = r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/custom/main.xml"/></Relationships>"#;
        let data = build_zip(&[("_rels/.rels", rels), ("custom/main.xml", BODY)]);
        let package = Package::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(package.main_part(), "custom/main.xml");
        assert_eq!(package.blocks().unwrap()[0].text(), "Hi");
    }

    #[test]
    fn test_main_part_fallback() {
        let data = build_zip(&[("word/document.xml", BODY)]);
        let package = Package::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(package.main_part(), "word/document.xml");
    }

    #[test]
    fn test_missing_main_part() {
        let data = build_zip(&[("word/styles.xml", "<w:styles/>")]);
        let err = Package::from_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, PackageError::MissingPart(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let err = Package::from_reader(Cursor::new(b"plain text".to_vec())).unwrap_err();
        assert!(matches!(err, PackageError::Zip(_)));
    }
}
