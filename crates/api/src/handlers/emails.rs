//! Handlers for the `/emails` resource and the verification link.

use aliasly_core::models::Email;
use aliasly_core::types::EntityId;
use aliasly_service::messages::{RegisterEmailRequest, VerifyEmailRequest};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

/// POST /api/v1/emails
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterEmailRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Email>)> {
    let Json(input) = payload?;
    let email = state.emails.register_email(input).await?;
    Ok((StatusCode::CREATED, Json(email)))
}

/// POST /api/v1/emails/verify
pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyEmailRequest>, JsonRejection>,
) -> AppResult<Json<Email>> {
    let Json(input) = payload?;
    Ok(Json(state.emails.verify_email(&input.token).await?))
}

/// GET /verify?token=
pub async fn verify_link(
    State(state): State<AppState>,
    query: Result<Query<VerifyQuery>, QueryRejection>,
) -> AppResult<Json<Email>> {
    let Query(query) = query?;
    Ok(Json(state.emails.verify_email(&query.token).await?))
}

/// DELETE /api/v1/emails/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<EntityId>) -> AppResult<StatusCode> {
    state.emails.delete_email(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
