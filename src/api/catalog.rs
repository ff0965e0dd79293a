//! Catalog home

use axum::extract::State;

use crate::{error::AppResult, views::{IndexView, Page}, AppState};

pub async fn index(State(state): State<AppState>) -> AppResult<Page<IndexView>> {
    state.services.catalog.index().await
}
