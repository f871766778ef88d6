use std::path::PathBuf;

use super::{Author, Block};

/// Structured view of one source article, built fresh for every compile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    pub file_path: PathBuf,
    pub title: String,
    /// Authors recognized in the author zone, in block order.
    pub authors: Vec<Author>,
    /// Author-zone paragraph texts (trimmed, non-empty).
    pub preamble: Vec<String>,
    /// Article body: deep copies of the blocks after the preamble.
    pub content_blocks: Vec<Block>,
    /// Flattened text of the whole source, as returned by the text extractor.
    pub text: String,
}

impl ArticleInfo {
    /// Author names joined for the byline under the article heading.
    /// Nameless authors are listed by email, or left out without one.
    pub fn byline(&self) -> Option<String> {
        let names: Vec<&str> = self
            .authors
            .iter()
            .filter_map(|a| {
                if !a.name.is_empty() {
                    Some(a.name.as_str())
                } else {
                    a.email.as_deref().filter(|e| !e.is_empty())
                }
            })
            .collect();
        if names.is_empty() {
            return None;
        }
        Some(names.join(" / "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_authors(authors: Vec<Author>) -> ArticleInfo {
        ArticleInfo {
            file_path: PathBuf::from("a.docx"),
            title: "A".into(),
            authors,
            preamble: Vec::new(),
            content_blocks: Vec::new(),
            text: String::new(),
        }
    }

    #[test]
    fn test_byline_joins_names() {
        let article = with_authors(vec![Author::new("Ana"), Author::new("Rui")]);
        assert_eq!(article.byline().as_deref(), Some("Ana / Rui"));
    }

    #[test]
    fn test_byline_uses_email_for_nameless_author() {
        let article = with_authors(vec![
            Author::new("Ana"),
            Author::new("").with_email("rui@x.pt"),
            Author::new(""),
        ]);
        assert_eq!(article.byline().as_deref(), Some("Ana / rui@x.pt"));
    }

    #[test]
    fn test_byline_without_usable_authors() {
        assert_eq!(with_authors(Vec::new()).byline(), None);
        assert_eq!(with_authors(vec![Author::new("")]).byline(), None);
    }
}
