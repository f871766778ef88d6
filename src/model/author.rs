use serde::{Deserialize, Serialize};

/// An author record recovered from an article's preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Identity used to detect duplicate authors across articles.
///
/// Authors with an email are the same person when their emails match
/// exactly; authors without one are compared by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuthorKey {
    Email(String),
    Name(String),
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn key(&self) -> AuthorKey {
        match self.email.as_deref() {
            Some(email) if !email.is_empty() => AuthorKey::Email(email.to_string()),
            _ => AuthorKey::Name(self.name.clone()),
        }
    }

    /// Fill fields that are empty here from `other`. Fields already set win.
    pub fn merge_missing(&mut self, other: &Author) {
        if self.name.is_empty() {
            self.name = other.name.clone();
        }
        fill(&mut self.email, &other.email);
        fill(&mut self.institution, &other.institution);
        fill(&mut self.id, &other.id);
    }
}

fn fill(slot: &mut Option<String>, other: &Option<String>) {
    let empty = slot.as_deref().is_none_or(str::is_empty);
    if empty && other.as_deref().is_some_and(|v| !v.is_empty()) {
        *slot = other.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefers_email() {
        let a = Author::new("Maria").with_email("maria@ex.com");
        assert_eq!(a.key(), AuthorKey::Email("maria@ex.com".into()));
        assert_eq!(Author::new("Maria").key(), AuthorKey::Name("Maria".into()));
    }

    #[test]
    fn test_empty_email_falls_back_to_name() {
        let a = Author::new("Maria").with_email("");
        assert_eq!(a.key(), AuthorKey::Name("Maria".into()));
    }

    #[test]
    fn test_merge_missing_keeps_existing_fields() {
        let mut first = Author::new("Maria Silva").with_email("maria@ex.com");
        let later = Author::new("M. Silva")
            .with_email("maria@ex.com")
            .with_institution("Universidade X");
        first.merge_missing(&later);
        assert_eq!(first.name, "Maria Silva");
        assert_eq!(first.institution.as_deref(), Some("Universidade X"));
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let json = serde_json::to_string(&Author::new("Ana")).unwrap();
        assert_eq!(json, r#"{"name":"Ana"}"#);
    }
}
