//! Book endpoints

use axum::extract::{Path, State};
use axum_extra::extract::Form;

use crate::{
    error::AppResult,
    forms::BookForm,
    models::RecordId,
    views::{BookDeleteView, BookDetailView, BookFormView, BookListView, Page},
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Page<BookListView>> {
    state.services.catalog.book_list().await
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<BookDetailView>> {
    state.services.catalog.book_detail(&id).await
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Page<BookFormView>> {
    state.services.catalog.book_create_form().await
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Page<BookFormView>> {
    state.services.catalog.book_create(form).await
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<BookDeleteView>> {
    state.services.catalog.book_delete_form(&id).await
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<BookDeleteView>> {
    state.services.catalog.book_delete(&id).await
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<BookFormView>> {
    state.services.catalog.book_update_form(&id).await
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<BookForm>,
) -> AppResult<Page<BookFormView>> {
    state.services.catalog.book_update(&id, form).await
}
