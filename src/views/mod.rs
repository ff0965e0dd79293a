//! Render-agnostic view models.
//!
//! Everything here is plain serializable data: titles, display strings, and
//! selection lists with `checked` markers. No store types and no error objects
//! cross this boundary.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use serde::Serialize;

use crate::{
    models::{format_date, Author, Book, BookInstance, BookInstanceStatus, Genre, Record},
    services::aggregation::CatalogCounts,
};

pub use author::{AuthorDeleteView, AuthorDetailView, AuthorFormView, AuthorListView};
pub use book::{BookDeleteView, BookDetailView, BookFormView, BookListView};
pub use book_instance::{
    BookInstanceDeleteView, BookInstanceDetailView, BookInstanceFormView, BookInstanceListView,
};
pub use genre::{GenreDeleteView, GenreDetailView, GenreFormView, GenreListView};

/// What a page operation hands back to the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Page<T> {
    Render(T),
    /// Form re-rendered with field errors and the echoed input
    Invalid(T),
    /// Delete refused; the confirmation view lists the dependents
    Blocked(T),
    Redirect(String),
}

impl<T> Page<T> {
    pub fn view(&self) -> Option<&T> {
        match self {
            Page::Render(view) | Page::Invalid(view) | Page::Blocked(view) => Some(view),
            Page::Redirect(_) => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Page::Redirect(target) => Some(target),
            _ => None,
        }
    }
}

/// Presentable error page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub title: String,
    pub status: u16,
    pub message: String,
}

/// One entry of a select list or checkbox group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexView {
    pub title: String,
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

impl From<CatalogCounts> for IndexView {
    fn from(counts: CatalogCounts) -> Self {
        Self {
            title: "Basic Library Home".to_string(),
            book_count: counts.book_count,
            book_instance_count: counts.book_instance_count,
            book_instance_available_count: counts.book_instance_available_count,
            author_count: counts.author_count,
            genre_count: counts.genre_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorView {
    pub id: String,
    pub url: String,
    pub first_name: String,
    pub family_name: String,
    pub name: String,
    pub lifespan: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            url: author.url(),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            name: author.full_name(),
            lifespan: author.lifespan(),
            date_of_birth: format_date(author.date_of_birth),
            date_of_death: format_date(author.date_of_death),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreView {
    pub id: String,
    pub url: String,
    pub name: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id.to_string(),
            url: genre.url(),
            name: genre.name.clone(),
        }
    }
}

/// A book as it appears inside another record's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            url: book.url(),
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInstanceView {
    pub id: String,
    pub url: String,
    pub imprint: String,
    pub status: String,
    /// Empty unless the copy is out of circulation
    pub due_back: String,
}

impl From<&BookInstance> for BookInstanceView {
    fn from(copy: &BookInstance) -> Self {
        Self {
            id: copy.id.to_string(),
            url: copy.url(),
            imprint: copy.imprint.clone(),
            status: copy.status.to_string(),
            due_back: format_date(copy.effective_due_back()),
        }
    }
}

fn summaries(books: &[Book]) -> Vec<BookSummary> {
    books.iter().map(BookSummary::from).collect()
}

/// Every status, the selected one checked; an empty selection checks the default
fn status_options(selected: &str) -> Vec<SelectOption> {
    let selected = selected
        .parse::<BookInstanceStatus>()
        .unwrap_or_default();
    BookInstanceStatus::ALL
        .iter()
        .map(|status| SelectOption {
            value: status.as_str().to_string(),
            label: status.as_str().to_string(),
            checked: *status == selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;
    use chrono::NaiveDate;

    #[test]
    fn test_page_accessors() {
        let page: Page<u8> = Page::Redirect("/catalog/authors".to_string());
        assert_eq!(page.redirect_target(), Some("/catalog/authors"));
        assert!(page.view().is_none());

        let page = Page::Blocked(7u8);
        assert_eq!(page.view(), Some(&7));
        assert!(page.redirect_target().is_none());
    }

    #[test]
    fn test_copy_view_hides_due_back_when_available() {
        let mut copy = BookInstance {
            id: RecordId::new("c1"),
            book: RecordId::new("b1"),
            imprint: "Gollancz, 2011".to_string(),
            status: BookInstanceStatus::Available,
            due_back: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        assert_eq!(BookInstanceView::from(&copy).due_back, "");

        copy.status = BookInstanceStatus::Loaned;
        let view = BookInstanceView::from(&copy);
        assert_eq!(view.due_back, "Mar 1, 2024");
        assert_eq!(view.url, "/catalog/bookinstance/c1");
    }

    #[test]
    fn test_status_options_default_selection() {
        let options = status_options("");
        let checked: Vec<&str> = options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(checked, vec!["Maintenance"]);
        assert_eq!(options.len(), 4);

        let options = status_options("Loaned");
        assert!(options.iter().any(|o| o.value == "Loaned" && o.checked));
    }

    #[test]
    fn test_index_title() {
        let view = IndexView::from(CatalogCounts {
            book_count: 3,
            book_instance_count: 5,
            book_instance_available_count: 2,
            author_count: 2,
            genre_count: 1,
        });
        assert_eq!(view.title, "Basic Library Home");
        assert_eq!(view.book_instance_available_count, 2);
    }
}
