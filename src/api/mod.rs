//! HTTP surface for the catalog
//!
//! Handlers are thin: extract, call the page operation, hand the [`Page`] back.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{views::Page, AppState};

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        match self {
            Page::Render(view) => (StatusCode::OK, Json(view)).into_response(),
            Page::Invalid(view) => (StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response(),
            Page::Blocked(view) => (StatusCode::CONFLICT, Json(view)).into_response(),
            Page::Redirect(target) => Redirect::to(&target).into_response(),
        }
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/catalog", get(catalog::index))
        // Authors
        .route("/catalog/authors", get(authors::list))
        .route("/catalog/author/create", get(authors::create_form).post(authors::create))
        .route("/catalog/author/:id", get(authors::detail))
        .route("/catalog/author/:id/delete", get(authors::delete_form).post(authors::delete))
        .route("/catalog/author/:id/update", get(authors::update_form).post(authors::update))
        // Genres
        .route("/catalog/genres", get(genres::list))
        .route("/catalog/genre/create", get(genres::create_form).post(genres::create))
        .route("/catalog/genre/:id", get(genres::detail))
        .route("/catalog/genre/:id/delete", get(genres::delete_form).post(genres::delete))
        .route("/catalog/genre/:id/update", get(genres::update_form).post(genres::update))
        // Books
        .route("/catalog/books", get(books::list))
        .route("/catalog/book/create", get(books::create_form).post(books::create))
        .route("/catalog/book/:id", get(books::detail))
        .route("/catalog/book/:id/delete", get(books::delete_form).post(books::delete))
        .route("/catalog/book/:id/update", get(books::update_form).post(books::update))
        // Book copies
        .route("/catalog/bookinstances", get(book_instances::list))
        .route(
            "/catalog/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/catalog/bookinstance/:id", get(book_instances::detail))
        .route(
            "/catalog/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(catalog)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
