//! Author pages

use serde::Serialize;

use super::{summaries, AuthorView, BookSummary};
use crate::{
    forms::{AuthorForm, FieldError},
    models::Author,
    services::aggregation::AuthorWithBooks,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorListView {
    pub title: String,
    pub authors: Vec<AuthorView>,
}

impl AuthorListView {
    pub fn new(authors: &[Author]) -> Self {
        Self {
            title: "Author List".to_string(),
            authors: authors.iter().map(AuthorView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorDetailView {
    pub title: String,
    pub author: AuthorView,
    pub books: Vec<BookSummary>,
}

impl From<&AuthorWithBooks> for AuthorDetailView {
    fn from(found: &AuthorWithBooks) -> Self {
        Self {
            title: "Author Detail".to_string(),
            author: AuthorView::from(&found.author),
            books: summaries(&found.books),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorFormView {
    pub title: String,
    pub form: AuthorForm,
    pub errors: Vec<FieldError>,
}

impl AuthorFormView {
    pub fn new(title: &str, form: AuthorForm, errors: Vec<FieldError>) -> Self {
        Self {
            title: title.to_string(),
            form,
            errors,
        }
    }
}

/// Delete confirmation; `books` non-empty means the delete is refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorDeleteView {
    pub title: String,
    pub author: AuthorView,
    pub books: Vec<BookSummary>,
}

impl From<&AuthorWithBooks> for AuthorDeleteView {
    fn from(found: &AuthorWithBooks) -> Self {
        Self {
            title: "Delete Author".to_string(),
            author: AuthorView::from(&found.author),
            books: summaries(&found.books),
        }
    }
}
