pub mod aliases;
pub mod emails;
pub mod health;
pub mod users;
pub mod verify;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users                                  create
/// /users/by-email?email=                  resolve user ID by email
/// /users/{id}                             get, update, delete
/// /users/{id}/emails                      list registered emails
/// /users/{id}/aliases                     list aliases
///
/// /emails                                 register (sends verification mail)
/// /emails/verify                          verify with token
/// /emails/{id}                            delete
///
/// /aliases                                create (provisions forwarding rule)
/// /aliases/{id}                           get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/emails", emails::router())
        .nest("/aliases", aliases::router())
}
