use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Book entity - one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub isbn: String,
    pub title: String,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub publication_year: i32,
    /// Price in minor currency units.
    pub price: i64,
    pub currency: String,
    pub sample_url: Option<String>,
}

impl Book {
    /// Case-insensitive match against title, isbn, authors and tags.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.title.to_lowercase().contains(&needle)
            || self.isbn.to_lowercase() == needle
            || self
                .authors
                .iter()
                .chain(&self.tags)
                .any(|s| s.to_lowercase().contains(&needle))
    }
}
