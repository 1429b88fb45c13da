use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::error::TypeError;

/// Fixed classification for stored documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Healthcare,
    Defence,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 2] = [Category::Healthcare, Category::Defence];

    /// The backend wire string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Healthcare => "Healthcare",
            Category::Defence => "Defence",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Healthcare" => Ok(Category::Healthcare),
            "Defence" => Ok(Category::Defence),
            other => Err(TypeError::UnknownCategory(other.to_string())),
        }
    }
}

/// Opaque stable identifier assigned to a document by the backend.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Metadata for a document held by the storage backend.
///
/// Records are created by a successful upload and are immutable afterwards;
/// the client only ever holds read-only cached copies. The `content_hash`
/// was fixed at upload time and is reused verbatim when the document is
/// transferred — it is never recomputed client-side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub filename: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "docHashHex")]
    pub content_hash: Digest,
}

impl DocumentRecord {
    /// Case-insensitive match against filename and description, as used by
    /// the catalog's free-text search.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.filename.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&term))
                .unwrap_or(false)
    }
}
