//! Handlers for the `/users` resource.

use aliasly_core::models::{Alias, Email, UserResponse};
use aliasly_core::types::EntityId;
use aliasly_service::messages::{CreateUserRequest, UpdateUserRequest};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ByEmailQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub user_id: EntityId,
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(input) = payload?;
    let user = state.users.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/v1/users/by-email?email=
pub async fn find_by_email(
    State(state): State<AppState>,
    query: Result<Query<ByEmailQuery>, QueryRejection>,
) -> AppResult<Json<UserIdResponse>> {
    let Query(query) = query?;
    let user_id = state.users.get_user_by_email(&query.email).await?;
    Ok(Json(UserIdResponse { user_id }))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.get_user(&id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<Json<UserResponse>> {
    let Json(input) = payload?;
    let user = state.users.update_user(&id, input).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<EntityId>) -> AppResult<StatusCode> {
    state.users.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}/emails
pub async fn list_emails(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Vec<Email>>> {
    Ok(Json(state.emails.list_emails(&id).await?))
}

/// GET /api/v1/users/{id}/aliases
pub async fn list_aliases(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Vec<Alias>>> {
    Ok(Json(state.emails.list_aliases(&id).await?))
}
