//! Genre form

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{field_error, unescape, Form};
use crate::models::{Genre, GenreData};

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GenreForm {
    #[validate(custom(function = "genre_name"))]
    pub name: String,
}

fn genre_name(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(field_error("required", "Name must be specified."));
    }
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(field_error(
            "length",
            format!(
                "Name must be between {} and {} characters.",
                NAME_MIN, NAME_MAX
            ),
        ));
    }
    Ok(())
}

impl Form for GenreForm {
    type Output = GenreData;

    const FIELDS: &'static [&'static str] = &["name"];

    fn map_text(self, f: fn(&str) -> String) -> Self {
        Self { name: f(&self.name) }
    }

    fn normalize(&self) -> GenreData {
        GenreData {
            name: self.name.clone(),
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: unescape(&genre.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str) -> GenreForm {
        GenreForm {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(form("  Poetry ").submit().unwrap().name, "Poetry");

        let rejected = form("   ").submit().unwrap_err();
        assert_eq!(rejected.errors[0].message, "Name must be specified.");

        let rejected = form("SF").submit().unwrap_err();
        assert_eq!(
            rejected.errors[0].message,
            "Name must be between 3 and 100 characters."
        );
        assert_eq!(rejected.form.name, "SF");

        assert!(form(&"x".repeat(100)).submit().is_ok());
        assert!(form(&"x".repeat(101)).submit().is_err());
    }
}
