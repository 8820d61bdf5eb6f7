use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::emails;
use crate::state::AppState;

/// Routes mounted at `/emails`.
///
/// ```text
/// POST   /          -> register
/// POST   /verify    -> verify
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(emails::register))
        .route("/verify", post(emails::verify))
        .route("/{id}", delete(emails::delete))
}
