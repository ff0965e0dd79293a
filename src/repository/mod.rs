//! Repository layer: one typed store per record kind

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, Genre, Record, RecordId},
};

/// Query/command interface the catalog core consumes.
///
/// Stores do not enforce references between kinds; deletion guards live in
/// the mutation service.
#[async_trait]
pub trait Store<R: Record>: Send + Sync {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<R>>;

    async fn find_many(&self, filter: &R::Filter) -> AppResult<Vec<R>>;

    async fn count_matching(&self, filter: &R::Filter) -> AppResult<i64>;

    /// Persist a new record; the store assigns its identity
    async fn insert(&self, data: R::Data) -> AppResult<R>;

    async fn update_by_id(&self, id: &RecordId, data: R::Data) -> AppResult<Option<R>>;

    /// `false` when nothing had that identity
    async fn remove_by_id(&self, id: &RecordId) -> AppResult<bool>;
}

/// Main repository struct holding one store per record kind
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn Store<Author>>,
    pub genres: Arc<dyn Store<Genre>>,
    pub books: Arc<dyn Store<Book>>,
    pub book_instances: Arc<dyn Store<BookInstance>>,
}

impl Repository {
    /// Process-local stores, empty at startup
    pub fn in_memory() -> Self {
        Self {
            authors: Arc::new(memory::MemoryStore::<Author>::default()),
            genres: Arc::new(memory::MemoryStore::<Genre>::default()),
            books: Arc::new(memory::MemoryStore::<Book>::default()),
            book_instances: Arc::new(memory::MemoryStore::<BookInstance>::default()),
        }
    }

    /// Stores backed by the given PostgreSQL pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(postgres::AuthorsStore::new(pool.clone())),
            genres: Arc::new(postgres::GenresStore::new(pool.clone())),
            books: Arc::new(postgres::BooksStore::new(pool.clone())),
            book_instances: Arc::new(postgres::BookInstancesStore::new(pool)),
        }
    }
}
