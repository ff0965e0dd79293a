//! Book copy endpoints

use axum::extract::{Path, State};
use axum_extra::extract::Form;

use crate::{
    error::AppResult,
    forms::BookInstanceForm,
    models::RecordId,
    views::{
        BookInstanceDeleteView, BookInstanceDetailView, BookInstanceFormView, BookInstanceListView,
        Page,
    },
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Page<BookInstanceListView>> {
    state.services.catalog.book_instance_list().await
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<BookInstanceDetailView>> {
    state.services.catalog.book_instance_detail(&id).await
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Page<BookInstanceFormView>> {
    state.services.catalog.book_instance_create_form().await
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Page<BookInstanceFormView>> {
    state.services.catalog.book_instance_create(form).await
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<BookInstanceDeleteView>> {
    state.services.catalog.book_instance_delete_form(&id).await
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<BookInstanceDeleteView>> {
    state.services.catalog.book_instance_delete(&id).await
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Page<BookInstanceFormView>> {
    state.services.catalog.book_instance_update_form(&id).await
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Page<BookInstanceFormView>> {
    state.services.catalog.book_instance_update(&id, form).await
}
