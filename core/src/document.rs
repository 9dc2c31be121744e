use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// An immutable document held by the search index.
///
/// Identity is the random 128-bit id assigned at creation: two documents with
/// identical text but different ids are distinct, and equality and hashing
/// compare the id alone. `metadata` is opaque to the index and carried through
/// to search hits untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: Uuid,
    pub text: String,
    pub metadata: Option<Value>,
}

impl Document {
    pub fn new(text: impl Into<String>, metadata: Option<Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            metadata,
        }
    }

    /// The document text as a pretty-printed JSON object.
    pub fn pretty_json(&self) -> String {
        serde_json::to_string_pretty(&serde_json::json!({ "text": self.text }))
            .unwrap_or_else(|_| String::new())
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::json!({ "doc": self.metadata }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_the_id_not_the_text() {
        let a = Document::new("same text", None);
        let b = Document::new("same text", None);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
