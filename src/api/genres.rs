//! Genre endpoints

use axum::extract::{Path, State};
use axum_extra::extract::Form;

use crate::{
    error::AppResult,
    forms::GenreForm,
    models::RecordId,
    views::{GenreDeleteView, GenreDetailView, GenreFormView, GenreListView, Page},
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Page<GenreListView>> {
    state.services.catalog.genre_list().await
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<GenreDetailView>> {
    state.services.catalog.genre_detail(&id).await
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Page<GenreFormView>> {
    state.services.catalog.genre_create_form().await
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Page<GenreFormView>> {
    state.services.catalog.genre_create(form).await
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<GenreDeleteView>> {
    state.services.catalog.genre_delete_form(&id).await
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<GenreDeleteView>> {
    state.services.catalog.genre_delete(&id).await
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<GenreFormView>> {
    state.services.catalog.genre_update_form(&id).await
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<GenreForm>,
) -> AppResult<Page<GenreFormView>> {
    state.services.catalog.genre_update(&id, form).await
}
