use super::CatalogService;
use crate::{
    error::AppResult,
    forms::GenreForm,
    models::{Genre, Record, RecordId},
    services::mutation::{Removal, Submission},
    views::{GenreDeleteView, GenreDetailView, GenreFormView, GenreListView, Page},
};

impl CatalogService {
    pub async fn genre_list(&self) -> AppResult<Page<GenreListView>> {
        let genres = self.aggregation.genres().await?;
        Ok(Page::Render(GenreListView::new(&genres)))
    }

    pub async fn genre_detail(&self, id: &RecordId) -> AppResult<Page<GenreDetailView>> {
        let found = self.aggregation.genre_detail(id).await?;
        Ok(Page::Render(GenreDetailView::from(&found)))
    }

    pub async fn genre_create_form(&self) -> AppResult<Page<GenreFormView>> {
        Ok(Page::Render(GenreFormView::new(
            "Create Genre",
            GenreForm::default(),
            Vec::new(),
        )))
    }

    /// Redirects to the existing genre when the name is already taken
    pub async fn genre_create(&self, form: GenreForm) -> AppResult<Page<GenreFormView>> {
        Ok(submitted("Create Genre", self.mutation.create_genre(form).await?))
    }

    pub async fn genre_delete_form(&self, id: &RecordId) -> AppResult<Page<GenreDeleteView>> {
        Ok(match self.aggregation.genre_with_books(id).await? {
            Some(found) => Page::Render(GenreDeleteView::from(&found)),
            None => Page::Redirect(Genre::list_url()),
        })
    }

    pub async fn genre_delete(&self, id: &RecordId) -> AppResult<Page<GenreDeleteView>> {
        Ok(match self.mutation.delete_genre(id).await? {
            Removal::Removed | Removal::Missing => Page::Redirect(Genre::list_url()),
            Removal::Blocked(found) => Page::Blocked(GenreDeleteView::from(&found)),
        })
    }

    pub async fn genre_update_form(&self, id: &RecordId) -> AppResult<Page<GenreFormView>> {
        let genre = self.aggregation.genre(id).await?;
        Ok(Page::Render(GenreFormView::new(
            "Update Genre",
            GenreForm::from(&genre),
            Vec::new(),
        )))
    }

    pub async fn genre_update(
        &self,
        id: &RecordId,
        form: GenreForm,
    ) -> AppResult<Page<GenreFormView>> {
        Ok(submitted("Update Genre", self.mutation.update_genre(id, form).await?))
    }
}

fn submitted(title: &str, outcome: Submission<Genre, GenreForm>) -> Page<GenreFormView> {
    match outcome {
        Submission::Saved(genre) | Submission::Existing(genre) => Page::Redirect(genre.url()),
        Submission::Rejected(rejected) => {
            Page::Invalid(GenreFormView::new(title, rejected.form, rejected.errors))
        }
    }
}
