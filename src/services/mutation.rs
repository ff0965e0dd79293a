//! Create, update and guarded delete.
//!
//! Submissions go through the form pipeline first; only normalized data reaches
//! a store. Deletes re-read dependents through the aggregation path right
//! before removing. That read-then-remove sequence is not atomic: a dependent
//! created between the two steps is not seen, and two concurrent requests can
//! both observe zero dependents. The catalog accepts this window.

use std::convert::Infallible;

use crate::{
    error::{AppError, AppResult},
    forms::{AuthorForm, BookForm, BookInstanceForm, Form, GenreForm, Rejected},
    models::{Author, Book, BookInstance, Genre, GenreFilter, Record, RecordId},
    repository::Repository,
};

use super::aggregation::{AggregationService, AuthorWithBooks, BookWithInstances, GenreWithBooks};

/// Outcome of a create or update submission
#[derive(Debug, Clone)]
pub enum Submission<R, F> {
    Saved(R),
    /// A genre with the submitted name already exists and stands in for the write
    Existing(R),
    Rejected(Rejected<F>),
}

impl<R: Record, F> Submission<R, F> {
    /// Where to send the user after a successful submission
    pub fn location(&self) -> Option<String> {
        match self {
            Submission::Saved(record) | Submission::Existing(record) => Some(record.url()),
            Submission::Rejected(_) => None,
        }
    }
}

/// Outcome of a guarded delete
#[derive(Debug, Clone)]
pub enum Removal<D> {
    Removed,
    /// Nothing to delete; treated as success
    Missing,
    /// Dependents still reference the record
    Blocked(D),
}

fn missing(kind: &str, id: &RecordId) -> AppError {
    AppError::NotFound(format!("{} {} not found", kind, id))
}

fn removal<D>(kind: &str, removed: bool, id: &RecordId) -> Removal<D> {
    if removed {
        tracing::info!(id = %id, "{} deleted", kind);
        Removal::Removed
    } else {
        tracing::info!(id = %id, "{} already gone", kind);
        Removal::Missing
    }
}

#[derive(Clone)]
pub struct MutationService {
    repository: Repository,
    aggregation: AggregationService,
}

impl MutationService {
    pub fn new(repository: Repository, aggregation: AggregationService) -> Self {
        Self {
            repository,
            aggregation,
        }
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn create_author(
        &self,
        form: AuthorForm,
    ) -> AppResult<Submission<Author, AuthorForm>> {
        let data = match form.submit() {
            Ok(data) => data,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };
        let author = self.repository.authors.insert(data).await?;
        tracing::info!(author_id = %author.id, "Author created");
        Ok(Submission::Saved(author))
    }

    pub async fn update_author(
        &self,
        id: &RecordId,
        form: AuthorForm,
    ) -> AppResult<Submission<Author, AuthorForm>> {
        let data = match form.submit() {
            Ok(data) => data,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };
        let author = self
            .repository
            .authors
            .update_by_id(id, data)
            .await?
            .ok_or_else(|| missing("Author", id))?;
        tracing::info!(author_id = %id, "Author updated");
        Ok(Submission::Saved(author))
    }

    pub async fn delete_author(&self, id: &RecordId) -> AppResult<Removal<AuthorWithBooks>> {
        let Some(found) = self.aggregation.author_with_books(id).await? else {
            return Ok(Removal::Missing);
        };
        if !found.books.is_empty() {
            tracing::info!(author_id = %id, books = found.books.len(), "Author delete blocked");
            return Ok(Removal::Blocked(found));
        }

        let removed = self.repository.authors.remove_by_id(id).await?;
        Ok(removal("Author", removed, id))
    }

    // =========================================================================
    // GENRES
    // =========================================================================

    async fn genre_named(&self, name: &str) -> AppResult<Option<Genre>> {
        let found = self
            .repository
            .genres
            .find_many(&GenreFilter::named(name))
            .await?;
        Ok(found.into_iter().next())
    }

    /// Creates the genre unless one with the same name exists, in which case
    /// that genre is returned instead.
    pub async fn create_genre(&self, form: GenreForm) -> AppResult<Submission<Genre, GenreForm>> {
        let data = match form.submit() {
            Ok(data) => data,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        if let Some(existing) = self.genre_named(&data.name).await? {
            tracing::info!(genre_id = %existing.id, "Genre name already exists; reusing");
            return Ok(Submission::Existing(existing));
        }

        let genre = self.repository.genres.insert(data).await?;
        tracing::info!(genre_id = %genre.id, "Genre created");
        Ok(Submission::Saved(genre))
    }

    /// Renames the genre unless the new name is already taken, in which case
    /// the genre holding that name is returned and nothing is written. An
    /// unknown id is NotFound whatever the name.
    pub async fn update_genre(
        &self,
        id: &RecordId,
        form: GenreForm,
    ) -> AppResult<Submission<Genre, GenreForm>> {
        let data = match form.submit() {
            Ok(data) => data,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        self.repository
            .genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| missing("Genre", id))?;

        if let Some(existing) = self.genre_named(&data.name).await? {
            tracing::info!(genre_id = %existing.id, "Genre name already exists; update skipped");
            return Ok(Submission::Existing(existing));
        }

        let genre = self
            .repository
            .genres
            .update_by_id(id, data)
            .await?
            .ok_or_else(|| missing("Genre", id))?;
        tracing::info!(genre_id = %id, "Genre updated");
        Ok(Submission::Saved(genre))
    }

    pub async fn delete_genre(&self, id: &RecordId) -> AppResult<Removal<GenreWithBooks>> {
        let Some(found) = self.aggregation.genre_with_books(id).await? else {
            return Ok(Removal::Missing);
        };
        if !found.books.is_empty() {
            tracing::info!(genre_id = %id, books = found.books.len(), "Genre delete blocked");
            return Ok(Removal::Blocked(found));
        }

        let removed = self.repository.genres.remove_by_id(id).await?;
        Ok(removal("Genre", removed, id))
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    pub async fn create_book(&self, form: BookForm) -> AppResult<Submission<Book, BookForm>> {
        let data = match form.submit() {
            Ok(data) => data,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };
        let book = self.repository.books.insert(data).await?;
        tracing::info!(book_id = %book.id, genres = book.genre.len(), "Book created");
        Ok(Submission::Saved(book))
    }

    pub async fn update_book(
        &self,
        id: &RecordId,
        form: BookForm,
    ) -> AppResult<Submission<Book, BookForm>> {
        let data = match form.submit() {
            Ok(data) => data,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };
        let book = self
            .repository
            .books
            .update_by_id(id, data)
            .await?
            .ok_or_else(|| missing("Book", id))?;
        tracing::info!(book_id = %id, "Book updated");
        Ok(Submission::Saved(book))
    }

    pub async fn delete_book(&self, id: &RecordId) -> AppResult<Removal<BookWithInstances>> {
        let Some(found) = self.aggregation.book_with_instances(id).await? else {
            return Ok(Removal::Missing);
        };
        if !found.instances.is_empty() {
            tracing::info!(book_id = %id, copies = found.instances.len(), "Book delete blocked");
            return Ok(Removal::Blocked(found));
        }

        let removed = self.repository.books.remove_by_id(id).await?;
        Ok(removal("Book", removed, id))
    }

    // =========================================================================
    // BOOK INSTANCES
    // =========================================================================

    pub async fn create_book_instance(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        let data = match form.submit() {
            Ok(data) => data,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };
        let copy = self.repository.book_instances.insert(data).await?;
        tracing::info!(book_instance_id = %copy.id, book_id = %copy.book, "Book copy created");
        Ok(Submission::Saved(copy))
    }

    pub async fn update_book_instance(
        &self,
        id: &RecordId,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        let data = match form.submit() {
            Ok(data) => data,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };
        let copy = self
            .repository
            .book_instances
            .update_by_id(id, data)
            .await?
            .ok_or_else(|| missing("Book copy", id))?;
        tracing::info!(book_instance_id = %id, "Book copy updated");
        Ok(Submission::Saved(copy))
    }

    /// Copies have no dependents, so this never blocks
    pub async fn delete_book_instance(&self, id: &RecordId) -> AppResult<Removal<Infallible>> {
        let removed = self.repository.book_instances.remove_by_id(id).await?;
        Ok(removal("Book copy", removed, id))
    }
}
