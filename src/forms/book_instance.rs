//! Book instance (copy) form

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{date_field, field_error, iso_date, parse_date, unescape, Form};
use crate::models::{BookInstance, BookInstanceData, BookInstanceStatus, RecordId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BookInstanceForm {
    #[validate(length(min = 1, message = "Book must be specified."))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified."))]
    pub imprint: String,
    /// Empty means the default status
    #[validate(custom(function = "status_name"))]
    pub status: String,
    #[validate(custom(function = "iso_date"))]
    pub due_back: String,
}

fn status_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<BookInstanceStatus>().is_ok() {
        return Ok(());
    }
    let names: Vec<&str> = BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect();
    Err(field_error(
        "status",
        format!("Status must be one of {}.", names.join(", ")),
    ))
}

impl Form for BookInstanceForm {
    type Output = BookInstanceData;

    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn map_text(self, f: fn(&str) -> String) -> Self {
        Self {
            book: f(&self.book),
            imprint: f(&self.imprint),
            status: f(&self.status),
            due_back: f(&self.due_back),
        }
    }

    fn normalize(&self) -> BookInstanceData {
        BookInstanceData {
            book: RecordId::new(self.book.as_str()),
            imprint: self.imprint.clone(),
            status: self.status.parse().unwrap_or_default(),
            due_back: parse_date(&self.due_back).ok().flatten(),
        }
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(copy: &BookInstance) -> Self {
        Self {
            book: copy.book.to_string(),
            imprint: unescape(&copy.imprint),
            status: copy.status.to_string(),
            due_back: date_field(copy.due_back),
        }
    }
}
