//! Small helpers shared by the readers and exporters.

use std::borrow::Cow;
use std::path::Path;

/// Decode the bytes of a plain-text article or editorial source.
///
/// Tries UTF-8 (a BOM is honored) first, then `hint_encoding` if given, and
/// finally Windows-1252, which never fails. Valid UTF-8 is borrowed.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// File name with extension, e.g. `"paper.docx"`.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// File name without extension, e.g. `"paper"`.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name(path))
}

/// Lowercased extension without the dot, or an empty string.
pub fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Whether a path names a structured package (by extension).
pub fn is_package(path: &Path) -> bool {
    extension(path) == "docx"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Olá, mundo".as_bytes(), None), "Olá, mundo");
    }

    #[test]
    fn test_decode_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFhello";
        assert_eq!(decode_text(bytes, None), "hello");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "Jos\xe9" is "José" in CP1252 and invalid UTF-8
        assert_eq!(decode_text(b"Jos\xe9", None), "José");
    }

    #[test]
    fn test_path_helpers() {
        let path = Path::new("/tmp/articles/Paper One.DOCX");
        assert_eq!(file_name(path), "Paper One.DOCX");
        assert_eq!(file_stem(path), "Paper One");
        assert_eq!(extension(path), "docx");
        assert!(is_package(path));
        assert!(!is_package(Path::new("notes.txt")));
        assert!(!is_package(Path::new("README")));
    }
}
