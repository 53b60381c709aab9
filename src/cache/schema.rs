//! Database schema for the result cache
//!
//! A single table keyed by (url, is_full); the drafts column holds the
//! serialized draft set as a JSON array of strings.

use crate::cache::error::DbError;
use libsql::{Connection, params};

/// Initialize the cache schema
pub async fn initialize_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS draft_cache (
            url TEXT NOT NULL,
            is_full INTEGER NOT NULL,
            drafts TEXT NOT NULL,
            created_at INTEGER,
            PRIMARY KEY (url, is_full)
        )",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create draft_cache table: {}", e)))?;

    Ok(())
}
