//! Author endpoints

use axum::extract::{Path, State};
use axum_extra::extract::Form;

use crate::{
    error::AppResult,
    forms::AuthorForm,
    models::RecordId,
    views::{AuthorDeleteView, AuthorDetailView, AuthorFormView, AuthorListView, Page},
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Page<AuthorListView>> {
    state.services.catalog.author_list().await
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<AuthorDetailView>> {
    state.services.catalog.author_detail(&id).await
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Page<AuthorFormView>> {
    state.services.catalog.author_create_form().await
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Page<AuthorFormView>> {
    state.services.catalog.author_create(form).await
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<AuthorDeleteView>> {
    state.services.catalog.author_delete_form(&id).await
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<AuthorDeleteView>> {
    state.services.catalog.author_delete(&id).await
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<AuthorFormView>> {
    state.services.catalog.author_update_form(&id).await
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Page<AuthorFormView>> {
    state.services.catalog.author_update(&id, form).await
}
