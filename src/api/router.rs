use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_book, create_category, create_person, delete_book, delete_category,
    delete_person, get_book, get_category, get_person, lend_book, list_books, list_categories,
    list_persons, return_book, update_book, update_category, update_person,
};

/// Creates the API router with all library endpoints
///
/// Books:
/// - GET/POST /books
/// - GET/PUT/DELETE /books/:id (PUT only changes the description)
/// - PUT /books/prestar/:id - Lend a book
/// - PUT /books/devolver/:id - Return a book
///
/// Persons and categories follow the same list/create/get/update/delete layout.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Books
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/prestar/:id", put(lend_book))
        .route("/books/devolver/:id", put(return_book))
        // Persons
        .route("/persons", get(list_persons).post(create_person))
        .route(
            "/persons/:id",
            get(get_person).put(update_person).delete(delete_person),
        )
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
