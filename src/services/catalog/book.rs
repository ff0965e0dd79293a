use super::CatalogService;
use crate::{
    error::{AppError, AppResult},
    forms::{BookForm, Rejected},
    models::{Book, Record, RecordId},
    services::mutation::{Removal, Submission},
    views::{BookDeleteView, BookDetailView, BookFormView, BookListView, Page},
};

impl CatalogService {
    pub async fn book_list(&self) -> AppResult<Page<BookListView>> {
        let entries = self.aggregation.books().await?;
        Ok(Page::Render(BookListView::new(&entries)))
    }

    pub async fn book_detail(&self, id: &RecordId) -> AppResult<Page<BookDetailView>> {
        let detail = self.aggregation.book_detail(id).await?;
        Ok(Page::Render(BookDetailView::from(&detail)))
    }

    pub async fn book_create_form(&self) -> AppResult<Page<BookFormView>> {
        let choices = self.aggregation.book_form(None).await?;
        Ok(Page::Render(BookFormView::new(
            "Create Book",
            BookForm::default(),
            &choices,
            Vec::new(),
        )))
    }

    pub async fn book_create(&self, form: BookForm) -> AppResult<Page<BookFormView>> {
        match self.mutation.create_book(form).await? {
            Submission::Saved(book) | Submission::Existing(book) => Ok(Page::Redirect(book.url())),
            Submission::Rejected(rejected) => self.book_rejected("Create Book", rejected).await,
        }
    }

    pub async fn book_delete_form(&self, id: &RecordId) -> AppResult<Page<BookDeleteView>> {
        Ok(match self.aggregation.book_with_instances(id).await? {
            Some(found) => Page::Render(BookDeleteView::from(&found)),
            None => Page::Redirect(Book::list_url()),
        })
    }

    pub async fn book_delete(&self, id: &RecordId) -> AppResult<Page<BookDeleteView>> {
        Ok(match self.mutation.delete_book(id).await? {
            Removal::Removed | Removal::Missing => Page::Redirect(Book::list_url()),
            Removal::Blocked(found) => Page::Blocked(BookDeleteView::from(&found)),
        })
    }

    pub async fn book_update_form(&self, id: &RecordId) -> AppResult<Page<BookFormView>> {
        let choices = self.aggregation.book_form(Some(id)).await?;
        let book = choices
            .book
            .as_ref()
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        Ok(Page::Render(BookFormView::new(
            "Update Book",
            BookForm::from(book),
            &choices,
            Vec::new(),
        )))
    }

    pub async fn book_update(
        &self,
        id: &RecordId,
        form: BookForm,
    ) -> AppResult<Page<BookFormView>> {
        match self.mutation.update_book(id, form).await? {
            Submission::Saved(book) | Submission::Existing(book) => Ok(Page::Redirect(book.url())),
            Submission::Rejected(rejected) => self.book_rejected("Update Book", rejected).await,
        }
    }

    /// Re-render with every author and genre, marked against the attempted choices
    async fn book_rejected(
        &self,
        title: &str,
        rejected: Rejected<BookForm>,
    ) -> AppResult<Page<BookFormView>> {
        let choices = self.aggregation.book_form(None).await?;
        Ok(Page::Invalid(BookFormView::new(
            title,
            rejected.form,
            &choices,
            rejected.errors,
        )))
    }
}
