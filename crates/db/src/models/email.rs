//! Email row.

use aliasly_core::models::Email;
use aliasly_core::types::Timestamp;
use sqlx::FromRow;

/// Row from the `emails` table. `token` is NULL once verified.
#[derive(Debug, Clone, FromRow)]
pub struct EmailRow {
    pub id: String,
    pub user_id: String,
    pub address: String,
    pub verified: bool,
    pub token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl From<EmailRow> for Email {
    fn from(row: EmailRow) -> Self {
        Email {
            id: row.id,
            user_id: row.user_id,
            address: row.address,
            verified: row.verified,
            token: row.token,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}
