//! Book pages

use serde::Serialize;

use super::{AuthorView, BookInstanceView, GenreView, SelectOption};
use crate::{
    forms::{BookForm, FieldError},
    models::{Book, Record},
    services::aggregation::{BookDetail, BookEntry, BookFormData, BookWithInstances},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub isbn: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            url: book.url(),
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookListEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    /// `None` when the referenced author no longer exists
    pub author: Option<AuthorView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookListView {
    pub title: String,
    pub books: Vec<BookListEntry>,
}

impl BookListView {
    pub fn new(entries: &[BookEntry]) -> Self {
        Self {
            title: "Book List".to_string(),
            books: entries
                .iter()
                .map(|entry| BookListEntry {
                    id: entry.book.id.to_string(),
                    url: entry.book.url(),
                    title: entry.book.title.clone(),
                    author: entry.author.as_ref().map(AuthorView::from),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetailView {
    pub title: String,
    pub book: BookView,
    pub author: Option<AuthorView>,
    pub genres: Vec<GenreView>,
    pub instances: Vec<BookInstanceView>,
}

impl From<&BookDetail> for BookDetailView {
    fn from(detail: &BookDetail) -> Self {
        Self {
            title: detail.book.title.clone(),
            book: BookView::from(&detail.book),
            author: detail.author.as_ref().map(AuthorView::from),
            genres: detail.genres.iter().map(GenreView::from).collect(),
            instances: detail.instances.iter().map(BookInstanceView::from).collect(),
        }
    }
}

/// Create/update form with author and genre choices marked against `form`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookFormView {
    pub title: String,
    pub form: BookForm,
    pub authors: Vec<SelectOption>,
    pub genres: Vec<SelectOption>,
    pub errors: Vec<FieldError>,
}

impl BookFormView {
    pub fn new(
        title: &str,
        form: BookForm,
        choices: &BookFormData,
        errors: Vec<FieldError>,
    ) -> Self {
        let authors = choices
            .authors
            .iter()
            .map(|author| SelectOption {
                value: author.id.to_string(),
                label: author.full_name(),
                checked: author.id.as_str() == form.author,
            })
            .collect();
        let genres = choices
            .genres
            .iter()
            .map(|genre| SelectOption {
                value: genre.id.to_string(),
                label: genre.name.clone(),
                checked: form.genre.iter().any(|g| g == genre.id.as_str()),
            })
            .collect();

        Self {
            title: title.to_string(),
            form,
            authors,
            genres,
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDeleteView {
    pub title: String,
    pub book: BookView,
    pub instances: Vec<BookInstanceView>,
}

impl From<&BookWithInstances> for BookDeleteView {
    fn from(found: &BookWithInstances) -> Self {
        Self {
            title: "Delete Book".to_string(),
            book: BookView::from(&found.book),
            instances: found.instances.iter().map(BookInstanceView::from).collect(),
        }
    }
}
