//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorFilter};
pub use book::{Book, BookData, BookFilter};
pub use book_instance::{BookInstance, BookInstanceData, BookInstanceFilter, BookInstanceStatus};
pub use genre::{Genre, GenreData, GenreFilter};

/// Identity assigned by the store when a record is inserted
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identity (UUID v4)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A persisted catalog record.
///
/// `Data` is everything except the identity: what a validated form produces and
/// what the store writes. `Filter` selects records by foreign reference.
pub trait Record: Clone + Send + Sync + 'static {
    type Data: Clone + Send + Sync + 'static;
    type Filter: RecordFilter<Self> + Clone + Send + Sync + 'static;

    /// Path segment used in canonical URLs (`/catalog/{KIND}/{id}`)
    const KIND: &'static str;

    fn id(&self) -> &RecordId;

    fn from_parts(id: RecordId, data: Self::Data) -> Self;

    fn data(&self) -> Self::Data;

    /// Canonical location of this record
    fn url(&self) -> String {
        format!("/catalog/{}/{}", Self::KIND, self.id())
    }

    /// Collection listing for this record kind
    fn list_url() -> String {
        format!("/catalog/{}s", Self::KIND)
    }
}

/// Predicate a store applies when scanning records
pub trait RecordFilter<R>: Default {
    fn matches(&self, record: &R) -> bool;
}

/// Human-readable date used in derived fields (`Oct 14, 1983`)
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}
