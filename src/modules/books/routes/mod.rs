//! HTTP adapter over the book store.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use libris_http::error::AppError;

use super::models::{Book, NewBook};
use super::store::BookStore;
use crate::utils;

const WELCOME_PAGE: &str = "<h1>Welcome to the Libris book catalog</h1>";

/// Routes for the catalog, bound to `store`.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", get(serve_home))
        .route("/books", get(list_books))
        .route("/book", post(create_book))
        .route(
            "/book/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

async fn serve_home() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

async fn list_books(State(store): State<Arc<BookStore>>) -> Json<Vec<Book>> {
    let books = store.list().await;
    tracing::info!(target: "libris.books", count = books.len(), "list books");
    Json(books)
}

async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = utils::parse_id(&raw_id)?;
    tracing::info!(target: "libris.books", book_id = id, "get book");
    Ok(Json(store.get(id).await?))
}

async fn create_book(
    State(store): State<Arc<BookStore>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let candidate: NewBook = utils::decode_json(&body)?;
    let book = store.create(candidate).await?;
    tracing::info!(target: "libris.books", book_id = book.id, name = %book.name, "create book");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Book>, AppError> {
    let id = utils::parse_id(&raw_id)?;
    let replacement: NewBook = utils::decode_json(&body)?;
    let book = store.update(id, replacement).await?;
    tracing::info!(target: "libris.books", book_id = id, name = %book.name, "update book");
    Ok(Json(book))
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(raw_id): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    let id = utils::parse_id(&raw_id)?;
    store.delete(id).await?;
    tracing::info!(target: "libris.books", book_id = id, "delete book");
    Ok(Json("Delete successful"))
}
