use super::CatalogService;
use crate::{
    error::AppResult,
    forms::AuthorForm,
    models::{Author, Record, RecordId},
    services::mutation::{Removal, Submission},
    views::{AuthorDeleteView, AuthorDetailView, AuthorFormView, AuthorListView, Page},
};

impl CatalogService {
    pub async fn author_list(&self) -> AppResult<Page<AuthorListView>> {
        let authors = self.aggregation.authors().await?;
        Ok(Page::Render(AuthorListView::new(&authors)))
    }

    pub async fn author_detail(&self, id: &RecordId) -> AppResult<Page<AuthorDetailView>> {
        let found = self.aggregation.author_detail(id).await?;
        Ok(Page::Render(AuthorDetailView::from(&found)))
    }

    pub async fn author_create_form(&self) -> AppResult<Page<AuthorFormView>> {
        Ok(Page::Render(AuthorFormView::new(
            "Create Author",
            AuthorForm::default(),
            Vec::new(),
        )))
    }

    pub async fn author_create(&self, form: AuthorForm) -> AppResult<Page<AuthorFormView>> {
        Ok(submitted("Create Author", self.mutation.create_author(form).await?))
    }

    /// Confirmation page; an unknown author sends the user back to the list
    pub async fn author_delete_form(&self, id: &RecordId) -> AppResult<Page<AuthorDeleteView>> {
        Ok(match self.aggregation.author_with_books(id).await? {
            Some(found) => Page::Render(AuthorDeleteView::from(&found)),
            None => Page::Redirect(Author::list_url()),
        })
    }

    pub async fn author_delete(&self, id: &RecordId) -> AppResult<Page<AuthorDeleteView>> {
        Ok(match self.mutation.delete_author(id).await? {
            Removal::Removed | Removal::Missing => Page::Redirect(Author::list_url()),
            Removal::Blocked(found) => Page::Blocked(AuthorDeleteView::from(&found)),
        })
    }

    pub async fn author_update_form(&self, id: &RecordId) -> AppResult<Page<AuthorFormView>> {
        let author = self.aggregation.author(id).await?;
        Ok(Page::Render(AuthorFormView::new(
            "Update Author",
            AuthorForm::from(&author),
            Vec::new(),
        )))
    }

    pub async fn author_update(
        &self,
        id: &RecordId,
        form: AuthorForm,
    ) -> AppResult<Page<AuthorFormView>> {
        Ok(submitted("Update Author", self.mutation.update_author(id, form).await?))
    }
}

fn submitted(title: &str, outcome: Submission<Author, AuthorForm>) -> Page<AuthorFormView> {
    match outcome {
        Submission::Saved(author) | Submission::Existing(author) => Page::Redirect(author.url()),
        Submission::Rejected(rejected) => {
            Page::Invalid(AuthorFormView::new(title, rejected.form, rejected.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{catalog, created_id, seed_author, seed_book};
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_create_then_detail() {
        let catalog = catalog();
        let form = AuthorForm {
            first_name: "Octavia".to_string(),
            family_name: "Butler".to_string(),
            date_of_birth: "1947-06-22".to_string(),
            date_of_death: "2006-02-24".to_string(),
        };
        let page = catalog.author_create(form).await.unwrap();
        let target = page.redirect_target().unwrap().to_string();
        assert!(target.starts_with("/catalog/author/"));

        let id = created_id(page);
        let detail = catalog.author_detail(&id).await.unwrap();
        let view = detail.view().unwrap();
        assert_eq!(view.title, "Author Detail");
        assert_eq!(view.author.name, "Butler, Octavia");
        assert_eq!(view.author.lifespan, "Jun 22, 1947 - Feb 24, 2006");
        assert_eq!(view.author.url, target);
        assert!(view.books.is_empty());
    }

    #[tokio::test]
    async fn test_detail_of_unknown_author_is_not_found() {
        let result = catalog().author_detail(&RecordId::new("nope")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_create_echoes_input() {
        let catalog = catalog();
        let form = AuthorForm {
            first_name: String::new(),
            family_name: "Tolkien".to_string(),
            ..AuthorForm::default()
        };

        let page = catalog.author_create(form).await.unwrap();
        let Page::Invalid(view) = page else {
            panic!("expected invalid page");
        };
        assert_eq!(view.title, "Create Author");
        assert_eq!(view.form.family_name, "Tolkien");
        assert_eq!(view.errors.len(), 1);
        assert_eq!(view.errors[0].field, "first_name");

        let list = catalog.author_list().await.unwrap();
        assert!(list.view().unwrap().authors.is_empty());
    }

    #[tokio::test]
    async fn test_list_sorted_by_family_name() {
        let catalog = catalog();
        seed_author(&catalog, "Terry", "Pratchett").await;
        seed_author(&catalog, "Iain", "Banks").await;
        seed_author(&catalog, "Ann", "Leckie").await;

        let page = catalog.author_list().await.unwrap();
        let view = page.view().unwrap();
        let names: Vec<&str> = view.authors.iter().map(|a| a.family_name.as_str()).collect();
        assert_eq!(view.title, "Author List");
        assert_eq!(names, vec!["Banks", "Leckie", "Pratchett"]);
    }

    #[tokio::test]
    async fn test_update_form_prefilled() {
        let catalog = catalog();
        let id = seed_author(&catalog, "Ann", "Leckie").await;

        let page = catalog.author_update_form(&id).await.unwrap();
        let view = page.view().unwrap();
        assert_eq!(view.title, "Update Author");
        assert_eq!(view.form.first_name, "Ann");

        let missing = catalog.author_update_form(&RecordId::new("nope")).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let catalog = catalog();
        let id = seed_author(&catalog, "Ann", "Leckie").await;
        let form = AuthorForm {
            first_name: "Anne".to_string(),
            family_name: "Leckie".to_string(),
            ..AuthorForm::default()
        };

        let page = catalog.author_update(&id, form).await.unwrap();
        assert_eq!(page.redirect_target(), Some(format!("/catalog/author/{}", id).as_str()));

        let detail = catalog.author_detail(&id).await.unwrap();
        assert_eq!(detail.view().unwrap().author.first_name, "Anne");

        let form = AuthorForm {
            first_name: "Nobody".to_string(),
            family_name: "Known".to_string(),
            ..AuthorForm::default()
        };
        let missing = catalog.author_update(&RecordId::new("nope"), form).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_without_books() {
        let catalog = catalog();
        let id = seed_author(&catalog, "Ann", "Leckie").await;

        let page = catalog.author_delete(&id).await.unwrap();
        assert_eq!(page.redirect_target(), Some("/catalog/authors"));
        assert!(matches!(
            catalog.author_detail(&id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_books() {
        let catalog = catalog();
        let id = seed_author(&catalog, "Ann", "Leckie").await;
        seed_book(&catalog, "Ancillary Justice", &id, &[]).await;

        let page = catalog.author_delete(&id).await.unwrap();
        let Page::Blocked(view) = page else {
            panic!("expected blocked delete");
        };
        assert_eq!(view.title, "Delete Author");
        assert_eq!(view.books.len(), 1);
        assert_eq!(view.books[0].title, "Ancillary Justice");
        assert!(catalog.author_detail(&id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_form_for_unknown_author_redirects() {
        let page = catalog()
            .author_delete_form(&RecordId::new("nope"))
            .await
            .unwrap();
        assert_eq!(page.redirect_target(), Some("/catalog/authors"));

        let page = catalog().author_delete(&RecordId::new("nope")).await.unwrap();
        assert_eq!(page.redirect_target(), Some("/catalog/authors"));
    }
}
