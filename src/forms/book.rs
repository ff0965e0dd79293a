//! Book form

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{unescape, Form};
use crate::models::{Book, BookData, RecordId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must be specified."))]
    pub title: String,
    /// Author id picked from the selection list
    #[validate(length(min = 1, message = "Author must be specified."))]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must be specified."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must be specified."))]
    pub isbn: String,
    /// Checked genre ids; a single checkbox arrives as a one-element list
    pub genre: Vec<String>,
}

impl Form for BookForm {
    type Output = BookData;

    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    /// Blank and repeated genre choices are dropped
    fn map_text(self, f: fn(&str) -> String) -> Self {
        let mut genre: Vec<String> = Vec::with_capacity(self.genre.len());
        for id in self.genre.iter().map(|g| f(g)) {
            if !id.is_empty() && !genre.contains(&id) {
                genre.push(id);
            }
        }

        Self {
            title: f(&self.title),
            author: f(&self.author),
            summary: f(&self.summary),
            isbn: f(&self.isbn),
            genre,
        }
    }

    fn normalize(&self) -> BookData {
        BookData {
            title: self.title.clone(),
            author: RecordId::new(self.author.as_str()),
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre: self.genre.iter().map(|g| RecordId::new(g.as_str())).collect(),
        }
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: unescape(&book.title),
            author: book.author.to_string(),
            summary: unescape(&book.summary),
            isbn: unescape(&book.isbn),
            genre: book.genre.iter().map(|g| g.to_string()).collect(),
        }
    }
}
