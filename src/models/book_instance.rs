//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Record, RecordFilter, RecordId};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl Default for BookInstanceStatus {
    fn default() -> Self {
        BookInstanceStatus::Maintenance
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: RecordId,
    pub book: RecordId,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstanceData {
    pub book: RecordId,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Due date only matters while the copy is out of circulation
    pub fn effective_due_back(&self) -> Option<NaiveDate> {
        match self.status {
            BookInstanceStatus::Available => None,
            _ => self.due_back,
        }
    }
}

impl Record for BookInstance {
    type Data = BookInstanceData;
    type Filter = BookInstanceFilter;

    const KIND: &'static str = "bookinstance";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_parts(id: RecordId, data: BookInstanceData) -> Self {
        Self {
            id,
            book: data.book,
            imprint: data.imprint,
            status: data.status,
            due_back: data.due_back,
        }
    }

    fn data(&self) -> BookInstanceData {
        BookInstanceData {
            book: self.book.clone(),
            imprint: self.imprint.clone(),
            status: self.status,
            due_back: self.due_back,
        }
    }
}

/// Copies of a given book and/or in a given status
#[derive(Debug, Clone, Default)]
pub struct BookInstanceFilter {
    pub book: Option<RecordId>,
    pub status: Option<BookInstanceStatus>,
}

impl BookInstanceFilter {
    pub fn of_book(book: RecordId) -> Self {
        Self {
            book: Some(book),
            status: None,
        }
    }

    pub fn with_status(status: BookInstanceStatus) -> Self {
        Self {
            book: None,
            status: Some(status),
        }
    }
}

impl RecordFilter<BookInstance> for BookInstanceFilter {
    fn matches(&self, record: &BookInstance) -> bool {
        if let Some(ref book) = self.book {
            if &record.book != book {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        true
    }
}
