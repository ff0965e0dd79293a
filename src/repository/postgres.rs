//! PostgreSQL stores.
//!
//! Identities are UUID v4 strings generated on insert. There are no foreign
//! keys: references between kinds are checked by the mutation service.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Postgres};

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::{
        Author, AuthorData, AuthorFilter, Book, BookData, BookFilter, BookInstance,
        BookInstanceData, BookInstanceFilter, Genre, GenreData, GenreFilter, Record, RecordId,
    },
};

// =========================================================================
// AUTHORS
// =========================================================================

#[derive(FromRow)]
struct AuthorRow {
    id: String,
    first_name: String,
    family_name: String,
    date_of_birth: Option<NaiveDate>,
    date_of_death: Option<NaiveDate>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author::from_parts(
            RecordId::from(row.id),
            AuthorData {
                first_name: row.first_name,
                family_name: row.family_name,
                date_of_birth: row.date_of_birth,
                date_of_death: row.date_of_death,
            },
        )
    }
}

#[derive(Clone)]
pub struct AuthorsStore {
    pool: Pool<Postgres>,
}

impl AuthorsStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store<Author> for AuthorsStore {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death \
             FROM authors WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Author::from))
    }

    async fn find_many(&self, _filter: &AuthorFilter) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            ORDER BY family_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn count_matching(&self, _filter: &AuthorFilter) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, data: AuthorData) -> AppResult<Author> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, family_name, date_of_birth, date_of_death
            "#,
        )
        .bind(RecordId::generate().as_str())
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_by_id(&self, id: &RecordId, data: AuthorData) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            UPDATE authors SET
                first_name = $2,
                family_name = $3,
                date_of_birth = $4,
                date_of_death = $5
            WHERE id = $1
            RETURNING id, first_name, family_name, date_of_birth, date_of_death
            "#,
        )
        .bind(id.as_str())
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Author::from))
    }

    async fn remove_by_id(&self, id: &RecordId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =========================================================================
// GENRES
// =========================================================================

#[derive(FromRow)]
struct GenreRow {
    id: String,
    name: String,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre::from_parts(RecordId::from(row.id), GenreData { name: row.name })
    }
}

fn id_list(ids: &Option<Vec<RecordId>>) -> Option<Vec<String>> {
    ids.as_ref()
        .map(|ids| ids.iter().map(|id| id.to_string()).collect())
}

#[derive(Clone)]
pub struct GenresStore {
    pool: Pool<Postgres>,
}

impl GenresStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store<Genre> for GenresStore {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Genre::from))
    }

    async fn find_many(&self, filter: &GenreFilter) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT id, name FROM genres
            WHERE ($1::text IS NULL OR name = $1)
              AND ($2::text[] IS NULL OR id = ANY($2))
            ORDER BY name
            "#,
        )
        .bind(filter.name.as_deref())
        .bind(id_list(&filter.ids))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn count_matching(&self, filter: &GenreFilter) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM genres
            WHERE ($1::text IS NULL OR name = $1)
              AND ($2::text[] IS NULL OR id = ANY($2))
            "#,
        )
        .bind(filter.name.as_deref())
        .bind(id_list(&filter.ids))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn insert(&self, data: GenreData) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, GenreRow>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(RecordId::generate().as_str())
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_by_id(&self, id: &RecordId, data: GenreData) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id.as_str())
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Genre::from))
    }

    async fn remove_by_id(&self, id: &RecordId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =========================================================================
// BOOKS (book_genres junction)
// =========================================================================

const BOOK_COLUMNS: &str = r#"
    b.id, b.title, b.author_id, b.summary, b.isbn,
    ARRAY(
        SELECT bg.genre_id FROM book_genres bg
        WHERE bg.book_id = b.id
        ORDER BY bg.position
    ) AS genre
"#;

const BOOK_FILTER: &str = r#"
    ($1::text IS NULL OR b.author_id = $1)
    AND ($2::text IS NULL OR EXISTS (
        SELECT 1 FROM book_genres bg WHERE bg.book_id = b.id AND bg.genre_id = $2
    ))
"#;

#[derive(FromRow)]
struct BookRow {
    id: String,
    title: String,
    author_id: String,
    summary: String,
    isbn: String,
    genre: Vec<String>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::from_parts(
            RecordId::from(row.id),
            BookData {
                title: row.title,
                author: RecordId::from(row.author_id),
                summary: row.summary,
                isbn: row.isbn,
                genre: row.genre.into_iter().map(RecordId::from).collect(),
            },
        )
    }
}

#[derive(Clone)]
pub struct BooksStore {
    pool: Pool<Postgres>,
}

impl BooksStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Replace the genre links of a book inside the caller's transaction
    async fn sync_book_genres(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        book_id: &RecordId,
        genres: &[RecordId],
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id.as_str())
            .execute(&mut **tx)
            .await?;

        for (idx, genre_id) in genres.iter().enumerate() {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id, position) VALUES ($1, $2, $3)",
            )
            .bind(book_id.as_str())
            .bind(genre_id.as_str())
            .bind(idx as i32)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Store<Book> for BooksStore {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books b WHERE b.id = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }

    async fn find_many(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books b WHERE {} ORDER BY b.title",
            BOOK_COLUMNS, BOOK_FILTER
        );
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(filter.author.as_ref().map(|id| id.as_str()))
            .bind(filter.genre.as_ref().map(|id| id.as_str()))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn count_matching(&self, filter: &BookFilter) -> AppResult<i64> {
        let query = format!("SELECT COUNT(*) FROM books b WHERE {}", BOOK_FILTER);
        let count: i64 = sqlx::query_scalar(&query)
            .bind(filter.author.as_ref().map(|id| id.as_str()))
            .bind(filter.genre.as_ref().map(|id| id.as_str()))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, data: BookData) -> AppResult<Book> {
        let id = RecordId::generate();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.as_str())
        .bind(&data.title)
        .bind(data.author.as_str())
        .bind(&data.summary)
        .bind(&data.isbn)
        .execute(&mut *tx)
        .await?;

        Self::sync_book_genres(&mut tx, &id, &data.genre).await?;
        tx.commit().await?;

        Ok(Book::from_parts(id, data))
    }

    async fn update_by_id(&self, id: &RecordId, data: BookData) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = $2,
                author_id = $3,
                summary = $4,
                isbn = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(&data.title)
        .bind(data.author.as_str())
        .bind(&data.summary)
        .bind(&data.isbn)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        Self::sync_book_genres(&mut tx, id, &data.genre).await?;
        tx.commit().await?;

        Ok(Some(Book::from_parts(id.clone(), data)))
    }

    async fn remove_by_id(&self, id: &RecordId) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

// =========================================================================
// BOOK INSTANCES
// =========================================================================

#[derive(FromRow)]
struct BookInstanceRow {
    id: String,
    book_id: String,
    imprint: String,
    status: String,
    due_back: Option<NaiveDate>,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|e| {
            AppError::Internal(format!("Book instance {} has invalid status: {}", row.id, e))
        })?;
        Ok(BookInstance::from_parts(
            RecordId::from(row.id),
            BookInstanceData {
                book: RecordId::from(row.book_id),
                imprint: row.imprint,
                status,
                due_back: row.due_back,
            },
        ))
    }
}

#[derive(Clone)]
pub struct BookInstancesStore {
    pool: Pool<Postgres>,
}

impl BookInstancesStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store<BookInstance> for BookInstancesStore {
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstanceRow>(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(BookInstance::try_from).transpose()
    }

    async fn find_many(&self, filter: &BookInstanceFilter) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(
            r#"
            SELECT id, book_id, imprint, status, due_back
            FROM book_instances
            WHERE ($1::text IS NULL OR book_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY imprint
            "#,
        )
        .bind(filter.book.as_ref().map(|id| id.as_str()))
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(BookInstance::try_from).collect()
    }

    async fn count_matching(&self, filter: &BookInstanceFilter) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM book_instances
            WHERE ($1::text IS NULL OR book_id = $1)
              AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(filter.book.as_ref().map(|id| id.as_str()))
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn insert(&self, data: BookInstanceData) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstanceRow>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(RecordId::generate().as_str())
        .bind(data.book.as_str())
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn update_by_id(
        &self,
        id: &RecordId,
        data: BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstanceRow>(
            r#"
            UPDATE book_instances SET
                book_id = $2,
                imprint = $3,
                status = $4,
                due_back = $5
            WHERE id = $1
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(id.as_str())
        .bind(data.book.as_str())
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_optional(&self.pool)
        .await?;
        row.map(BookInstance::try_from).transpose()
    }

    async fn remove_by_id(&self, id: &RecordId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
