//! Client-side document catalog.
//!
//! A read-mostly cache of the backend's [`DocumentRecord`] list. Refresh
//! replaces the snapshot wholesale, so concurrent readers observe either the
//! old list or the new one, never a mix.

use std::sync::{Arc, RwLock};

use sealdoc_types::{Category, DocumentId, DocumentRecord};

/// Filter over the cached records.
///
/// All set fields must match. Category is an exact match; `name_contains`
/// matches the filename only; `search` matches filename or description.
/// String matching is case-insensitive throughout.
#[derive(Clone, Debug, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub name_contains: Option<String>,
    pub search: Option<String>,
}

impl CatalogFilter {
    pub fn by_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    fn matches(&self, record: &DocumentRecord) -> bool {
        if let Some(category) = self.category {
            if record.category != category {
                return false;
            }
        }
        if let Some(ref name) = self.name_contains {
            if !record
                .filename
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }
        if let Some(ref term) = self.search {
            if !record.matches_search(term) {
                return false;
            }
        }
        true
    }
}

/// Shared snapshot cache of stored-document metadata.
///
/// The backend owns the records; this cache only ever holds read-only
/// copies and is consulted by the transfer workflow for selection.
pub struct DocumentCatalog {
    records: RwLock<Arc<[DocumentRecord]>>,
}

impl DocumentCatalog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Replace the cached list wholesale with a fresh backend snapshot.
    pub fn replace(&self, records: Vec<DocumentRecord>) {
        let snapshot: Arc<[DocumentRecord]> = Arc::from(records);
        *self.records.write().expect("catalog lock poisoned") = snapshot;
    }

    /// The current snapshot. Cheap to clone; unaffected by later refreshes.
    pub fn snapshot(&self) -> Arc<[DocumentRecord]> {
        Arc::clone(&self.records.read().expect("catalog lock poisoned"))
    }

    /// Look up a record by id in the current snapshot.
    pub fn get(&self, id: &DocumentId) -> Option<DocumentRecord> {
        self.snapshot().iter().find(|r| &r.id == id).cloned()
    }

    /// Records matching the filter, in snapshot order.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<DocumentRecord> {
        self.snapshot()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        Self::new()
    }
}
