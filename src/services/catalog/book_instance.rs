use super::CatalogService;
use crate::{
    error::{AppError, AppResult},
    forms::{BookInstanceForm, Rejected},
    models::{BookInstance, Record, RecordId},
    services::mutation::{Removal, Submission},
    views::{
        BookInstanceDeleteView, BookInstanceDetailView, BookInstanceFormView, BookInstanceListView,
        Page,
    },
};

impl CatalogService {
    pub async fn book_instance_list(&self) -> AppResult<Page<BookInstanceListView>> {
        let copies = self.aggregation.book_instances().await?;
        Ok(Page::Render(BookInstanceListView::new(&copies)))
    }

    pub async fn book_instance_detail(
        &self,
        id: &RecordId,
    ) -> AppResult<Page<BookInstanceDetailView>> {
        let found = self.aggregation.book_instance_detail(id).await?;
        Ok(Page::Render(BookInstanceDetailView::from(&found)))
    }

    pub async fn book_instance_create_form(&self) -> AppResult<Page<BookInstanceFormView>> {
        let choices = self.aggregation.book_instance_form(None).await?;
        Ok(Page::Render(BookInstanceFormView::new(
            "Create Book Copy",
            BookInstanceForm::default(),
            &choices,
            Vec::new(),
        )))
    }

    pub async fn book_instance_create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Page<BookInstanceFormView>> {
        match self.mutation.create_book_instance(form).await? {
            Submission::Saved(copy) | Submission::Existing(copy) => Ok(Page::Redirect(copy.url())),
            Submission::Rejected(rejected) => {
                self.book_instance_rejected("Create Book Copy", rejected).await
            }
        }
    }

    pub async fn book_instance_delete_form(
        &self,
        id: &RecordId,
    ) -> AppResult<Page<BookInstanceDeleteView>> {
        Ok(match self.aggregation.book_instance(id).await? {
            Some(found) => Page::Render(BookInstanceDeleteView::from(&found)),
            None => Page::Redirect(BookInstance::list_url()),
        })
    }

    /// Copies are never referenced, so the delete always goes through
    pub async fn book_instance_delete(
        &self,
        id: &RecordId,
    ) -> AppResult<Page<BookInstanceDeleteView>> {
        match self.mutation.delete_book_instance(id).await? {
            Removal::Removed | Removal::Missing => Ok(Page::Redirect(BookInstance::list_url())),
            Removal::Blocked(never) => match never {},
        }
    }

    pub async fn book_instance_update_form(
        &self,
        id: &RecordId,
    ) -> AppResult<Page<BookInstanceFormView>> {
        let choices = self.aggregation.book_instance_form(Some(id)).await?;
        let copy = choices
            .instance
            .as_ref()
            .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))?;
        Ok(Page::Render(BookInstanceFormView::new(
            "Update Book Copy",
            BookInstanceForm::from(copy),
            &choices,
            Vec::new(),
        )))
    }

    pub async fn book_instance_update(
        &self,
        id: &RecordId,
        form: BookInstanceForm,
    ) -> AppResult<Page<BookInstanceFormView>> {
        match self.mutation.update_book_instance(id, form).await? {
            Submission::Saved(copy) | Submission::Existing(copy) => Ok(Page::Redirect(copy.url())),
            Submission::Rejected(rejected) => {
                self.book_instance_rejected("Update Book Copy", rejected).await
            }
        }
    }

    async fn book_instance_rejected(
        &self,
        title: &str,
        rejected: Rejected<BookInstanceForm>,
    ) -> AppResult<Page<BookInstanceFormView>> {
        let choices = self.aggregation.book_instance_form(None).await?;
        Ok(Page::Invalid(BookInstanceFormView::new(
            title,
            rejected.form,
            &choices,
            rejected.errors,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{catalog, created_id, seed_author, seed_book, seed_copy};
    use super::*;

    #[tokio::test]
    async fn test_default_status_is_maintenance() {
        let catalog = catalog();
        let author = seed_author(&catalog, "Frank", "Herbert").await;
        let book = seed_book(&catalog, "Dune", &author, &[]).await;
        let form = BookInstanceForm {
            book: book.to_string(),
            imprint: "Chilton, 1965".to_string(),
            status: String::new(),
            due_back: "2030-01-15".to_string(),
        };

        let id = created_id(catalog.book_instance_create(form).await.unwrap());
        let page = catalog.book_instance_detail(&id).await.unwrap();
        let view = page.view().unwrap();
        assert_eq!(view.title, "Copy Dune");
        assert_eq!(view.instance.status, "Maintenance");
        assert_eq!(view.instance.due_back, "Jan 15, 2030");
        assert_eq!(view.book.as_ref().unwrap().title, "Dune");
    }

    #[tokio::test]
    async fn test_rejected_copy_keeps_book_choice() {
        let catalog = catalog();
        let author = seed_author(&catalog, "Frank", "Herbert").await;
        let book = seed_book(&catalog, "Dune", &author, &[]).await;
        let form = BookInstanceForm {
            book: book.to_string(),
            imprint: String::new(),
            status: "Lost".to_string(),
            due_back: String::new(),
        };

        let page = catalog.book_instance_create(form).await.unwrap();
        let Page::Invalid(view) = page else {
            panic!("expected invalid page");
        };
        let fields: Vec<&str> = view.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["imprint", "status"]);
        assert_eq!(view.books.len(), 1);
        assert!(view.books[0].checked);
        assert_eq!(view.title, "Create Book Copy");
    }

    #[tokio::test]
    async fn test_update_and_list() {
        let catalog = catalog();
        let author = seed_author(&catalog, "Frank", "Herbert").await;
        let book = seed_book(&catalog, "Dune", &author, &[]).await;
        let id = seed_copy(&catalog, &book, "Loaned").await;

        let page = catalog.book_instance_update_form(&id).await.unwrap();
        let view = page.view().unwrap();
        assert_eq!(view.title, "Update Book Copy");
        assert!(view.statuses.iter().any(|o| o.value == "Loaned" && o.checked));

        let form = BookInstanceForm {
            status: "Available".to_string(),
            ..view.form.clone()
        };
        let page = catalog.book_instance_update(&id, form).await.unwrap();
        assert_eq!(
            page.redirect_target(),
            Some(format!("/catalog/bookinstance/{}", id).as_str())
        );

        let list = catalog.book_instance_list().await.unwrap();
        let view = list.view().unwrap();
        assert_eq!(view.title, "Book Instance List");
        assert_eq!(view.book_instances.len(), 1);
        assert_eq!(view.book_instances[0].instance.status, "Available");
    }

    #[tokio::test]
    async fn test_delete_is_unconditional() {
        let catalog = catalog();
        let author = seed_author(&catalog, "Frank", "Herbert").await;
        let book = seed_book(&catalog, "Dune", &author, &[]).await;
        let id = seed_copy(&catalog, &book, "Reserved").await;

        let form = catalog.book_instance_delete_form(&id).await.unwrap();
        assert_eq!(form.view().unwrap().title, "Delete Book Copy");

        let page = catalog.book_instance_delete(&id).await.unwrap();
        assert_eq!(page.redirect_target(), Some("/catalog/bookinstances"));
        assert!(matches!(
            catalog.book_instance_detail(&id).await,
            Err(AppError::NotFound(_))
        ));

        let again = catalog.book_instance_delete(&id).await.unwrap();
        assert_eq!(again.redirect_target(), Some("/catalog/bookinstances"));
    }
}
