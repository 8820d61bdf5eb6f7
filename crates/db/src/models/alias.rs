//! Alias row.

use aliasly_core::models::Alias;
use aliasly_core::types::Timestamp;
use sqlx::FromRow;

/// Row from the `aliases` table.
#[derive(Debug, Clone, FromRow)]
pub struct AliasRow {
    pub id: String,
    pub user_id: String,
    pub email_id: String,
    pub alias_address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl From<AliasRow> for Alias {
    fn from(row: AliasRow) -> Self {
        Alias {
            id: row.id,
            user_id: row.user_id,
            email_id: row.email_id,
            alias_address: row.alias_address,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}
