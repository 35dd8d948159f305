//! HTTP route handlers for the Buchhalle API.
//!
//! - `auth`: token cookie issuing and logout
//! - `books`: catalog CRUD
//! - `borrows`: borrow/return flow and the borrowed-books listing
//! - `health`: health check and system status endpoints

pub mod auth;
pub mod books;
pub mod borrows;
pub mod health;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};

use crate::middleware;
use crate::state::AppState;

/// Builds the application router. Cross-cutting layers (tracing, body
/// limit, CORS) are added by the binary on top of this.
pub fn router(state: AppState) -> Router {
    let cfg = state.config.clone();

    // Only the listing is behind the token guard; issuing, borrowing and
    // returning are open, matching the public wire contract.
    let guarded = Router::new()
        .route("/bookBorrowed", get(borrows::list_borrowed))
        .route_layer(from_fn_with_state(cfg, middleware::auth::require_token));

    Router::new()
        .route("/", get(health::greeting))
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/{id}", get(books::get_book).put(books::update_book))
        .route("/borrow/{id}", post(borrows::borrow_book))
        .route("/bookBorrowed/{id}", delete(borrows::return_book))
        .route("/jwt", post(auth::issue_token))
        .route("/logout", post(auth::logout))
        .merge(guarded)
        .with_state(state)
}
