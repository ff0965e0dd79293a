//! Concurrent multi-read assembly.
//!
//! Every aggregate issues its independent reads together with `tokio::try_join!`:
//! the aggregate completes when all reads complete, and the first failing read
//! is returned without waiting for the others.

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, AuthorFilter, Book, BookFilter, BookInstance, BookInstanceFilter,
        BookInstanceStatus, Genre, GenreFilter, Record, RecordId,
    },
    repository::{Repository, Store},
};

/// Home page counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Debug, Clone)]
pub struct AuthorWithBooks {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone)]
pub struct GenreWithBooks {
    pub genre: Genre,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone)]
pub struct BookWithInstances {
    pub book: Book,
    pub instances: Vec<BookInstance>,
}

/// Book with its references populated
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

#[derive(Debug, Clone)]
pub struct BookInstanceWithBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Debug, Clone)]
pub struct BookEntry {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book form pre-population: the edited book (update only) and every
/// selectable author and genre
#[derive(Debug, Clone)]
pub struct BookFormData {
    pub book: Option<Book>,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone)]
pub struct BookInstanceFormData {
    pub instance: Option<BookInstance>,
    pub books: Vec<Book>,
}

async fn find_optional<R: Record>(
    store: &dyn Store<R>,
    id: Option<&RecordId>,
) -> AppResult<Option<R>> {
    match id {
        Some(id) => store.find_by_id(id).await,
        None => Ok(None),
    }
}

fn not_found(kind: &str, id: &RecordId) -> AppError {
    AppError::NotFound(format!("{} {} not found", kind, id))
}

fn sort_authors(authors: &mut [Author]) {
    authors.sort_by_key(|a| a.sort_key());
}

fn sort_genres(genres: &mut [Genre]) {
    genres.sort_by_key(|g| g.name.to_lowercase());
}

fn sort_books(books: &mut [Book]) {
    books.sort_by_key(|b| b.title.to_lowercase());
}

#[derive(Clone)]
pub struct AggregationService {
    repository: Repository,
}

impl AggregationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // HOME & LISTINGS
    // =========================================================================

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let repo = &self.repository;
        let all_books = BookFilter::default();
        let all_copies = BookInstanceFilter::default();
        let available = BookInstanceFilter::with_status(BookInstanceStatus::Available);
        let all_genres = GenreFilter::default();

        let (
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        ) = tokio::try_join!(
            repo.books.count_matching(&all_books),
            repo.book_instances.count_matching(&all_copies),
            repo.book_instances.count_matching(&available),
            repo.authors.count_matching(&AuthorFilter),
            repo.genres.count_matching(&all_genres),
        )?;

        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    /// Every author, by family name then first name
    pub async fn authors(&self) -> AppResult<Vec<Author>> {
        let mut authors = self.repository.authors.find_many(&AuthorFilter).await?;
        sort_authors(&mut authors);
        Ok(authors)
    }

    /// Every genre, by name
    pub async fn genres(&self) -> AppResult<Vec<Genre>> {
        let mut genres = self
            .repository
            .genres
            .find_many(&GenreFilter::default())
            .await?;
        sort_genres(&mut genres);
        Ok(genres)
    }

    /// Every book by title, with its author populated
    pub async fn books(&self) -> AppResult<Vec<BookEntry>> {
        let all_books = BookFilter::default();
        let (mut books, authors) = tokio::try_join!(
            self.repository.books.find_many(&all_books),
            self.repository.authors.find_many(&AuthorFilter),
        )?;
        sort_books(&mut books);

        let authors: HashMap<RecordId, Author> =
            authors.into_iter().map(|a| (a.id.clone(), a)).collect();
        Ok(books
            .into_iter()
            .map(|book| BookEntry {
                author: authors.get(&book.author).cloned(),
                book,
            })
            .collect())
    }

    /// Every copy, with its book populated
    pub async fn book_instances(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        let all_copies = BookInstanceFilter::default();
        let all_books = BookFilter::default();
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances.find_many(&all_copies),
            self.repository.books.find_many(&all_books),
        )?;

        let books: HashMap<RecordId, Book> = books.into_iter().map(|b| (b.id.clone(), b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| BookInstanceWithBook {
                book: books.get(&instance.book).cloned(),
                instance,
            })
            .collect())
    }

    // =========================================================================
    // PRIMARY + DEPENDENTS (detail and delete confirmation)
    // =========================================================================

    /// Author and the books referencing it; `None` when the author is absent
    pub async fn author_with_books(&self, id: &RecordId) -> AppResult<Option<AuthorWithBooks>> {
        let by_author = BookFilter::by_author(id.clone());
        let (author, mut books) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.find_many(&by_author),
        )?;
        sort_books(&mut books);
        tracing::debug!(author_id = %id, books = books.len(), "Loaded author with books");

        Ok(author.map(|author| AuthorWithBooks { author, books }))
    }

    pub async fn author_detail(&self, id: &RecordId) -> AppResult<AuthorWithBooks> {
        self.author_with_books(id)
            .await?
            .ok_or_else(|| not_found("Author", id))
    }

    /// Genre and the books tagged with it; `None` when the genre is absent
    pub async fn genre_with_books(&self, id: &RecordId) -> AppResult<Option<GenreWithBooks>> {
        let by_genre = BookFilter::by_genre(id.clone());
        let (genre, mut books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.find_many(&by_genre),
        )?;
        sort_books(&mut books);
        tracing::debug!(genre_id = %id, books = books.len(), "Loaded genre with books");

        Ok(genre.map(|genre| GenreWithBooks { genre, books }))
    }

    pub async fn genre_detail(&self, id: &RecordId) -> AppResult<GenreWithBooks> {
        self.genre_with_books(id)
            .await?
            .ok_or_else(|| not_found("Genre", id))
    }

    /// Book and its copies; `None` when the book is absent
    pub async fn book_with_instances(&self, id: &RecordId) -> AppResult<Option<BookWithInstances>> {
        let copies = BookInstanceFilter::of_book(id.clone());
        let (book, instances) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.book_instances.find_many(&copies),
        )?;
        tracing::debug!(book_id = %id, instances = instances.len(), "Loaded book with copies");

        Ok(book.map(|book| BookWithInstances { book, instances }))
    }

    /// Book, its copies, then its author and genres
    pub async fn book_detail(&self, id: &RecordId) -> AppResult<BookDetail> {
        let BookWithInstances { book, instances } = self
            .book_with_instances(id)
            .await?
            .ok_or_else(|| not_found("Book", id))?;

        let tagged = GenreFilter::with_ids(book.genre.clone());
        let (author, mut genres) = tokio::try_join!(
            self.repository.authors.find_by_id(&book.author),
            self.repository.genres.find_many(&tagged),
        )?;

        sort_genres(&mut genres);

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    /// Copy and its book; `None` when the copy is absent
    pub async fn book_instance(&self, id: &RecordId) -> AppResult<Option<BookInstanceWithBook>> {
        let Some(instance) = self.repository.book_instances.find_by_id(id).await? else {
            return Ok(None);
        };
        let book = self.repository.books.find_by_id(&instance.book).await?;
        Ok(Some(BookInstanceWithBook { instance, book }))
    }

    pub async fn book_instance_detail(&self, id: &RecordId) -> AppResult<BookInstanceWithBook> {
        self.book_instance(id)
            .await?
            .ok_or_else(|| not_found("Book copy", id))
    }

    // =========================================================================
    // FORM PRE-POPULATION
    // =========================================================================

    pub async fn author(&self, id: &RecordId) -> AppResult<Author> {
        self.repository
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Author", id))
    }

    pub async fn genre(&self, id: &RecordId) -> AppResult<Genre> {
        self.repository
            .genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Genre", id))
    }

    /// Authors and genres to choose from, plus the edited book when `id` is given
    pub async fn book_form(&self, id: Option<&RecordId>) -> AppResult<BookFormData> {
        let all_genres = GenreFilter::default();
        let (book, mut authors, mut genres) = tokio::try_join!(
            find_optional(&*self.repository.books, id),
            self.repository.authors.find_many(&AuthorFilter),
            self.repository.genres.find_many(&all_genres),
        )?;
        sort_authors(&mut authors);
        sort_genres(&mut genres);

        Ok(BookFormData {
            book,
            authors,
            genres,
        })
    }

    /// Books to choose from, plus the edited copy when `id` is given
    pub async fn book_instance_form(
        &self,
        id: Option<&RecordId>,
    ) -> AppResult<BookInstanceFormData> {
        let all_books = BookFilter::default();
        let (instance, mut books) = tokio::try_join!(
            find_optional(&*self.repository.book_instances, id),
            self.repository.books.find_many(&all_books),
        )?;
        sort_books(&mut books);

        Ok(BookInstanceFormData { instance, books })
    }
}
