//! API integration tests, driven in-process over the in-memory backend

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use library_catalog::{
    api, config::AppConfig, repository::Repository, services::Services, AppState,
};

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

fn app() -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(Repository::in_memory())),
    };
    api::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };

    Reply {
        status,
        location,
        body,
    }
}

async fn get(app: &Router, uri: &str) -> Reply {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, form: &str) -> Reply {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

/// Submits a create form and returns the new record's id
async fn create(app: &Router, kind: &str, form: &str) -> String {
    let reply = post(app, &format!("/catalog/{}/create", kind), form).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER, "{:?}", reply.body);
    let location = reply.location.expect("No Location header");
    let prefix = format!("/catalog/{}/", kind);
    assert!(location.starts_with(&prefix));
    location[prefix.len()..].to_string()
}

#[tokio::test]
async fn test_health_check() {
    let reply = get(&app(), "/health").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "healthy");
}

#[tokio::test]
async fn test_home_counts() {
    let app = app();
    let author = create(&app, "author", "first_name=Jane&family_name=Austen").await;
    let book = create(
        &app,
        "book",
        &format!("title=Emma&author={}&summary=Matchmaking&isbn=9780141439587", author),
    )
    .await;
    create(&app, "bookinstance", &format!("book={}&imprint=Penguin&status=Available", book)).await;

    let reply = get(&app, "/catalog").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["title"], "Basic Library Home");
    assert_eq!(reply.body["book_count"], 1);
    assert_eq!(reply.body["book_instance_count"], 1);
    assert_eq!(reply.body["book_instance_available_count"], 1);
    assert_eq!(reply.body["author_count"], 1);
    assert_eq!(reply.body["genre_count"], 0);
}

#[tokio::test]
async fn test_unknown_author_is_not_found() {
    let reply = get(&app(), "/catalog/author/does-not-exist").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["status"], 404);
    assert_eq!(reply.body["title"], "Not Found");
}

#[tokio::test]
async fn test_book_with_empty_title_is_rejected() {
    let app = app();
    let reply = post(&app, "/catalog/book/create", "title=&author=a1&summary=s&isbn=123").await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body["title"], "Create Book");
    assert_eq!(reply.body["form"]["author"], "a1");
    assert_eq!(reply.body["form"]["isbn"], "123");
    let errors = reply.body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "title");

    let list = get(&app, "/catalog/books").await;
    assert_eq!(list.body["books"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_book_with_several_genres() {
    let app = app();
    let author = create(&app, "author", "first_name=Neil&family_name=Gaiman").await;
    let fantasy = create(&app, "genre", "name=Fantasy").await;
    let horror = create(&app, "genre", "name=Horror").await;
    let book = create(
        &app,
        "book",
        &format!(
            "title=Coraline&author={}&summary=Doors&isbn=9780380807345&genre={}&genre={}",
            author, horror, fantasy
        ),
    )
    .await;

    let reply = get(&app, &format!("/catalog/book/{}", book)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["title"], "Coraline");
    assert_eq!(reply.body["author"]["name"], "Gaiman, Neil");
    let genres: Vec<&str> = reply.body["genres"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(genres, vec!["Fantasy", "Horror"]);

    let form = get(&app, &format!("/catalog/book/{}/update", book)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body["genres"]
        .as_array()
        .unwrap()
        .iter()
        .all(|g| g["checked"] == true));
}

#[tokio::test]
async fn test_duplicate_genre_redirects_to_existing() {
    let app = app();
    let first = create(&app, "genre", "name=Poetry").await;

    let reply = post(&app, "/catalog/genre/create", "name=Poetry").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location, Some(format!("/catalog/genre/{}", first)));

    let list = get(&app, "/catalog/genres").await;
    assert_eq!(list.body["genres"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_genre_in_use_is_refused() {
    let app = app();
    let author = create(&app, "author", "first_name=Mary&family_name=Shelley").await;
    let genre = create(&app, "genre", "name=Gothic").await;
    let book = create(
        &app,
        "book",
        &format!(
            "title=Frankenstein&author={}&summary=Monster&isbn=9780486282114&genre={}",
            author, genre
        ),
    )
    .await;

    let reply = post(&app, &format!("/catalog/genre/{}/delete", genre), "").await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["title"], "Delete Genre");
    let books = reply.body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], book.as_str());

    let still_there = get(&app, &format!("/catalog/genre/{}", genre)).await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_author_then_gone() {
    let app = app();
    let author = create(&app, "author", "first_name=Jane&family_name=Austen").await;

    let confirm = get(&app, &format!("/catalog/author/{}/delete", author)).await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert_eq!(confirm.body["title"], "Delete Author");

    let reply = post(&app, &format!("/catalog/author/{}/delete", author), "").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/catalog/authors"));

    let gone = get(&app, &format!("/catalog/author/{}", author)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_copy_status() {
    let app = app();
    let author = create(&app, "author", "first_name=Jane&family_name=Austen").await;
    let book = create(
        &app,
        "book",
        &format!("title=Emma&author={}&summary=Matchmaking&isbn=9780141439587", author),
    )
    .await;
    let copy = create(
        &app,
        "bookinstance",
        &format!("book={}&imprint=Penguin&status=Loaned&due_back=2030-06-01", book),
    )
    .await;

    let detail = get(&app, &format!("/catalog/bookinstance/{}", copy)).await;
    assert_eq!(detail.body["title"], "Copy Emma");
    assert_eq!(detail.body["instance"]["due_back"], "Jun 1, 2030");

    let reply = post(
        &app,
        &format!("/catalog/bookinstance/{}/update", copy),
        &format!("book={}&imprint=Penguin&status=Available&due_back=2030-06-01", book),
    )
    .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);

    let detail = get(&app, &format!("/catalog/bookinstance/{}", copy)).await;
    assert_eq!(detail.body["instance"]["status"], "Available");
    assert_eq!(detail.body["instance"]["due_back"], "");
}
