//! Book model and related types

use serde::{Deserialize, Serialize};

use super::{Record, RecordFilter, RecordId};

/// Full book record. `author` and `genre` are references, populated by the
/// aggregation layer when a page needs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub author: RecordId,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookData {
    pub title: String,
    pub author: RecordId,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<RecordId>,
}

impl Record for Book {
    type Data = BookData;
    type Filter = BookFilter;

    const KIND: &'static str = "book";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_parts(id: RecordId, data: BookData) -> Self {
        Self {
            id,
            title: data.title,
            author: data.author,
            summary: data.summary,
            isbn: data.isbn,
            genre: data.genre,
        }
    }

    fn data(&self) -> BookData {
        BookData {
            title: self.title.clone(),
            author: self.author.clone(),
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre: self.genre.clone(),
        }
    }
}

/// Books referencing an author and/or tagged with a genre
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub author: Option<RecordId>,
    pub genre: Option<RecordId>,
}

impl BookFilter {
    pub fn by_author(author: RecordId) -> Self {
        Self {
            author: Some(author),
            genre: None,
        }
    }

    pub fn by_genre(genre: RecordId) -> Self {
        Self {
            author: None,
            genre: Some(genre),
        }
    }
}

impl RecordFilter<Book> for BookFilter {
    fn matches(&self, record: &Book) -> bool {
        if let Some(ref author) = self.author {
            if &record.author != author {
                return false;
            }
        }
        if let Some(ref genre) = self.genre {
            if !record.genre.contains(genre) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_reference() {
        let book = Book::from_parts(
            RecordId::new("b1"),
            BookData {
                title: "Foundation".to_string(),
                author: RecordId::new("a1"),
                summary: String::new(),
                isbn: String::new(),
                genre: vec![RecordId::new("g1"), RecordId::new("g2")],
            },
        );

        assert!(BookFilter::by_author(RecordId::new("a1")).matches(&book));
        assert!(!BookFilter::by_author(RecordId::new("a2")).matches(&book));
        assert!(BookFilter::by_genre(RecordId::new("g2")).matches(&book));
        assert!(!BookFilter::by_genre(RecordId::new("g3")).matches(&book));
    }
}
