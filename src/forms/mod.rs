//! Form input pipeline: sanitize, validate, normalize.
//!
//! Each form struct mirrors the raw fields of a submission. [`Form::submit`]
//! trims and escapes every string field, runs the `validator` rules, and either
//! produces the normalized record data or a [`Rejected`] carrying every field
//! error together with the trimmed, unescaped echo of what the user typed.
//!
//! Stored text is escaped. Forms pre-filled from a record decode it first, so
//! resubmitting an unchanged form stores the same text again.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

pub use author::AuthorForm;
pub use book::BookForm;
pub use book_instance::BookInstanceForm;
pub use genre::GenreForm;

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A submission that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejected<F> {
    /// Trimmed echo of the submitted values, not escaped
    pub form: F,
    pub errors: Vec<FieldError>,
}

impl<F> Rejected<F> {
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

pub trait Form: Validate + Clone + Sized {
    /// Normalized record data produced by a valid submission
    type Output;

    /// Declaration order, used to report errors deterministically
    const FIELDS: &'static [&'static str];

    /// Apply `f` to every string field
    fn map_text(self, f: fn(&str) -> String) -> Self;

    /// Convert sanitized, validated fields into record data
    fn normalize(&self) -> Self::Output;

    fn submit(self) -> Result<Self::Output, Rejected<Self>> {
        let clean = self.clone().map_text(sanitize);
        match clean.validate() {
            Ok(()) => Ok(clean.normalize()),
            Err(report) => Err(Rejected {
                errors: collect_errors(&report, Self::FIELDS),
                form: self.map_text(trim),
            }),
        }
    }
}

fn collect_errors(report: &ValidationErrors, order: &[&'static str]) -> Vec<FieldError> {
    let fields = report.field_errors();
    let mut errors = Vec::new();
    for name in order {
        let Some(list) = fields.get(*name) else { continue };
        for error in list.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}.", name));
            errors.push(FieldError {
                field: name.to_string(),
                message,
            });
        }
    }
    errors
}

const ENTITIES: [(char, &str); 8] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('/', "&#x2F;"),
    ('\\', "&#x5C;"),
    ('`', "&#96;"),
];

fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Trimmed value with markup characters replaced by HTML entities
pub fn sanitize(value: &str) -> String {
    let trimmed = value.trim();
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match ENTITIES.iter().find(|(raw, _)| *raw == c) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

/// Inverse of [`sanitize`] for stored text; unknown `&` sequences are kept
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(_, entity)| rest.starts_with(entity)) {
            Some((raw, entity)) => {
                out.push(*raw);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Optional calendar date: empty is absent; otherwise `YYYY-MM-DD` or an
/// RFC 3339 timestamp, whose date part is kept.
pub fn parse_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    if value.is_empty() {
        return Ok(None);
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(_) => DateTime::parse_from_rfc3339(value).map(|dt| Some(dt.date_naive())),
    }
}

/// Date in the shape a form field expects
pub fn date_field(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub(crate) fn field_error(
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub(crate) fn iso_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value)
        .map(|_| ())
        .map_err(|_| field_error("date", "Invalid date."))
}

pub(crate) fn check_alphanumeric(value: &str, label: &str) -> Result<(), ValidationError> {
    if value.chars().all(char::is_alphanumeric) {
        Ok(())
    } else {
        Err(field_error(
            "alphanumeric",
            format!("{} has non-alphanumeric characters.", label),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_escapes_markup() {
        assert_eq!(sanitize("  plain  "), "plain");
        assert_eq!(
            sanitize("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;&#x2F;b&gt;"
        );
    }

    #[test]
    fn test_unescape_reverses_sanitize() {
        let raw = "Tom & Jerry's <b>\"AC/DC\"</b> `x` \\";
        assert_eq!(unescape(&sanitize(raw)), raw);
        assert_eq!(sanitize(&unescape(&sanitize(raw))), sanitize(raw));
        assert_eq!(unescape("R&D &amp"), "R&D &amp");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(""), Ok(None));
        assert_eq!(
            parse_date("1920-01-02"),
            Ok(NaiveDate::from_ymd_opt(1920, 1, 2))
        );
        assert_eq!(
            parse_date("2024-05-01T10:00:00Z"),
            Ok(NaiveDate::from_ymd_opt(2024, 5, 1))
        );
        assert!(parse_date("02/01/1920").is_err());
        assert!(parse_date("1920-02-30").is_err());
    }

    #[test]
    fn test_date_field() {
        assert_eq!(date_field(NaiveDate::from_ymd_opt(1920, 1, 2)), "1920-01-02");
        assert_eq!(date_field(None), "");
    }
}
