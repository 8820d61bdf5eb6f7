use axum::routing::get;
use axum::Router;

use crate::handlers::emails;
use crate::state::AppState;

/// Target of the link in verification mails, mounted at root level.
///
/// ```text
/// GET /verify?token=   -> verify_link
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/verify", get(emails::verify_link))
}
