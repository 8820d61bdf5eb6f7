use crate::mail::MailError;
use crate::provider::ProviderError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing, soft-deleted, or (for alias provisioning) not owned/not verified.
    #[error("{entity} not found ({key})")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique field collides with an existing row.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by entity ID.
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        CoreError::NotFound {
            entity,
            key: format!("id {id}"),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { constraint } => {
                CoreError::Conflict(format!("Duplicate value violates unique constraint: {constraint}"))
            }
            StoreError::Backend(msg) => CoreError::Internal(format!("Storage error: {msg}")),
        }
    }
}

impl From<ProviderError> for CoreError {
    fn from(err: ProviderError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

impl From<MailError> for CoreError {
    fn from(err: MailError) -> Self {
        CoreError::Internal(err.to_string())
    }
}
