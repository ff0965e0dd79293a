//! Book copy pages

use serde::Serialize;

use super::{status_options, BookInstanceView, BookSummary, SelectOption};
use crate::{
    forms::{BookInstanceForm, FieldError},
    services::aggregation::{BookInstanceFormData, BookInstanceWithBook},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInstanceListEntry {
    pub instance: BookInstanceView,
    pub book: Option<BookSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInstanceListView {
    pub title: String,
    pub book_instances: Vec<BookInstanceListEntry>,
}

impl BookInstanceListView {
    pub fn new(copies: &[BookInstanceWithBook]) -> Self {
        Self {
            title: "Book Instance List".to_string(),
            book_instances: copies
                .iter()
                .map(|found| BookInstanceListEntry {
                    instance: BookInstanceView::from(&found.instance),
                    book: found.book.as_ref().map(BookSummary::from),
                })
                .collect(),
        }
    }
}

fn copy_title(prefix: &str, found: &BookInstanceWithBook) -> String {
    match &found.book {
        Some(book) => format!("{} {}", prefix, book.title),
        None => prefix.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInstanceDetailView {
    pub title: String,
    pub instance: BookInstanceView,
    pub book: Option<BookSummary>,
}

impl From<&BookInstanceWithBook> for BookInstanceDetailView {
    fn from(found: &BookInstanceWithBook) -> Self {
        Self {
            title: copy_title("Copy", found),
            instance: BookInstanceView::from(&found.instance),
            book: found.book.as_ref().map(BookSummary::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInstanceFormView {
    pub title: String,
    pub form: BookInstanceForm,
    pub books: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
    pub errors: Vec<FieldError>,
}

impl BookInstanceFormView {
    pub fn new(
        title: &str,
        form: BookInstanceForm,
        choices: &BookInstanceFormData,
        errors: Vec<FieldError>,
    ) -> Self {
        let books = choices
            .books
            .iter()
            .map(|book| SelectOption {
                value: book.id.to_string(),
                label: book.title.clone(),
                checked: book.id.as_str() == form.book,
            })
            .collect();

        Self {
            title: title.to_string(),
            statuses: status_options(&form.status),
            form,
            books,
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInstanceDeleteView {
    pub title: String,
    pub instance: BookInstanceView,
    pub book: Option<BookSummary>,
}

impl From<&BookInstanceWithBook> for BookInstanceDeleteView {
    fn from(found: &BookInstanceWithBook) -> Self {
        Self {
            title: "Delete Book Copy".to_string(),
            instance: BookInstanceView::from(&found.instance),
            book: found.book.as_ref().map(BookSummary::from),
        }
    }
}
