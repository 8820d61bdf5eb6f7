use axum::routing::{get, post};
use axum::Router;

use crate::handlers::aliases;
use crate::state::AppState;

/// Routes mounted at `/aliases`.
///
/// ```text
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(aliases::create)).route(
        "/{id}",
        get(aliases::get_by_id)
            .put(aliases::update)
            .delete(aliases::delete),
    )
}
