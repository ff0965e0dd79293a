//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_date, Record, RecordFilter, RecordId};

/// Full author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: RecordId,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Validated author fields, without identity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "family_name, first_name"; whichever part is present when the other is
    /// blank, empty when both are.
    pub fn full_name(&self) -> String {
        let first = self.first_name.trim();
        let family = self.family_name.trim();
        match (family.is_empty(), first.is_empty()) {
            (false, false) => format!("{}, {}", family, first),
            (false, true) => family.to_string(),
            (true, false) => first.to_string(),
            (true, true) => String::new(),
        }
    }

    /// "birth - death" with either side blank when unknown, empty when both are
    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        format!(
            "{} - {}",
            format_date(self.date_of_birth),
            format_date(self.date_of_death)
        )
        .trim()
        .to_string()
    }

    /// Listing order: family name, then first name
    pub fn sort_key(&self) -> (String, String) {
        (
            self.family_name.to_lowercase(),
            self.first_name.to_lowercase(),
        )
    }
}

impl Record for Author {
    type Data = AuthorData;
    type Filter = AuthorFilter;

    const KIND: &'static str = "author";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_parts(id: RecordId, data: AuthorData) -> Self {
        Self {
            id,
            first_name: data.first_name,
            family_name: data.family_name,
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        }
    }

    fn data(&self) -> AuthorData {
        AuthorData {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Authors carry no foreign references; the filter selects every author.
#[derive(Debug, Clone, Default)]
pub struct AuthorFilter;

impl RecordFilter<Author> for AuthorFilter {
    fn matches(&self, _record: &Author) -> bool {
        true
    }
}
