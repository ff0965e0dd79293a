//! Author form

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{check_alphanumeric, date_field, iso_date, parse_date, unescape, Form};
use crate::models::{Author, AuthorData};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AuthorForm {
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(function = "first_name_chars")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(function = "family_name_chars")
    )]
    pub family_name: String,
    #[validate(custom(function = "iso_date"))]
    pub date_of_birth: String,
    #[validate(custom(function = "iso_date"))]
    pub date_of_death: String,
}

fn first_name_chars(value: &str) -> Result<(), ValidationError> {
    check_alphanumeric(value, "First name")
}

fn family_name_chars(value: &str) -> Result<(), ValidationError> {
    check_alphanumeric(value, "Family name")
}

impl Form for AuthorForm {
    type Output = AuthorData;

    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn map_text(self, f: fn(&str) -> String) -> Self {
        Self {
            first_name: f(&self.first_name),
            family_name: f(&self.family_name),
            date_of_birth: f(&self.date_of_birth),
            date_of_death: f(&self.date_of_death),
        }
    }

    fn normalize(&self) -> AuthorData {
        AuthorData {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: parse_date(&self.date_of_birth).ok().flatten(),
            date_of_death: parse_date(&self.date_of_death).ok().flatten(),
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: unescape(&author.first_name),
            family_name: unescape(&author.family_name),
            date_of_birth: date_field(author.date_of_birth),
            date_of_death: date_field(author.date_of_death),
        }
    }
}
