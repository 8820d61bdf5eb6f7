//! Handlers for the `/aliases` resource.

use aliasly_core::models::Alias;
use aliasly_core::types::EntityId;
use aliasly_service::messages::{CreateAliasRequest, UpdateAliasRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/aliases
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateAliasRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Alias>)> {
    let Json(input) = payload?;
    let alias = state.emails.create_alias(input).await?;
    Ok((StatusCode::CREATED, Json(alias)))
}

/// GET /api/v1/aliases/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Alias>> {
    Ok(Json(state.emails.get_alias(&id).await?))
}

/// PUT /api/v1/aliases/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    payload: Result<Json<UpdateAliasRequest>, JsonRejection>,
) -> AppResult<Json<Alias>> {
    let Json(input) = payload?;
    Ok(Json(state.emails.update_alias(&id, input).await?))
}

/// DELETE /api/v1/aliases/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<EntityId>) -> AppResult<StatusCode> {
    state.emails.delete_alias(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
