//! The document store: WordprocessingML packages (`.docx`).
//!
//! - [`Package`] / [`read_docx`] open a package and decode its body into blocks
//! - [`PackageWriter`] / [`write_docx`] create a package from blocks
//! - [`reset_pagination`] rewrites section properties for merged output
//!
//! Only the main document part is interpreted; everything else about the
//! package layout is treated as opaque.

mod pagination;
mod parser;
mod reader;
mod writer;
pub(crate) mod xml;

pub use pagination::reset_pagination;
pub use parser::parse_document;
pub use reader::{Package, read_docx};
pub use writer::{PackageOptions, PackageWriter, write_docx, write_docx_to_writer};

use thiserror::Error;

/// Why a package could not be opened or decoded.
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("not a readable zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("missing main document part: {0}")]
    MissingPart(String),

    #[error("main document part is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
