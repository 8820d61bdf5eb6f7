//! Request messages for the user and email services.
//!
//! These are the inputs of the RPC surface; the HTTP gateway deserializes
//! them straight from JSON bodies. Field rules are checked with `validator`
//! before any storage access.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Profile changes. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterEmailRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(email(message = "email_address must be a valid address"))]
    pub email_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAliasRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "email_id must not be empty"))]
    pub email_id: String,
    pub alias_prefix: String,
}

/// Alias changes. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAliasRequest {
    #[validate(length(min = 1, message = "email_id must not be empty"))]
    pub email_id: Option<String>,
    pub alias_prefix: Option<String>,
}
