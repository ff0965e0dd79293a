//! Genre pages

use serde::Serialize;

use super::{summaries, BookSummary, GenreView};
use crate::{
    forms::{FieldError, GenreForm},
    models::Genre,
    services::aggregation::GenreWithBooks,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreListView {
    pub title: String,
    pub genres: Vec<GenreView>,
}

impl GenreListView {
    pub fn new(genres: &[Genre]) -> Self {
        Self {
            title: "Genre List".to_string(),
            genres: genres.iter().map(GenreView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreDetailView {
    pub title: String,
    pub genre: GenreView,
    pub books: Vec<BookSummary>,
}

impl From<&GenreWithBooks> for GenreDetailView {
    fn from(found: &GenreWithBooks) -> Self {
        Self {
            title: "Genre Detail".to_string(),
            genre: GenreView::from(&found.genre),
            books: summaries(&found.books),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreFormView {
    pub title: String,
    pub form: GenreForm,
    pub errors: Vec<FieldError>,
}

impl GenreFormView {
    pub fn new(title: &str, form: GenreForm, errors: Vec<FieldError>) -> Self {
        Self {
            title: title.to_string(),
            form,
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreDeleteView {
    pub title: String,
    pub genre: GenreView,
    pub books: Vec<BookSummary>,
}

impl From<&GenreWithBooks> for GenreDeleteView {
    fn from(found: &GenreWithBooks) -> Self {
        Self {
            title: "Delete Genre".to_string(),
            genre: GenreView::from(&found.genre),
            books: summaries(&found.books),
        }
    }
}
