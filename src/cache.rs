//! # Result Cache Module
//!
//! Persists generated draft sets keyed by (request URL, fullness flag) in a
//! libsql store, so repeat requests skip crawling and generation entirely.
//!
//! The consistency discipline is last-write-wins: `store` upserts and
//! overwrites any prior record for the same key pair. Lookups are exact-match
//! on both key fields; a stored payload that fails JSON parsing or shape
//! validation is treated as a miss, never as a hard failure.

pub mod error;
mod schema;

pub use error::DbError;

use chrono::Utc;
use libsql::{Connection, params};
use tracing::{debug, instrument, warn};

use crate::validator::{DraftSet, validate_drafts};

/// libsql-backed cache of generated draft sets
#[derive(Clone)]
pub struct CacheStore {
    conn: Connection,
}

impl CacheStore {
    /// Create a cache store over an existing connection
    #[instrument(skip(conn))]
    pub async fn new(conn: Connection) -> Result<Self, DbError> {
        schema::initialize_schema(&conn).await?;
        Ok(Self { conn })
    }

    /// Open a local database file
    pub async fn new_local(path: &str) -> Result<Self, DbError> {
        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| DbError::Connection(format!("Failed to connect to database: {}", e)))?;

        Self::new(conn).await
    }

    /// Connect to a remote libsql endpoint with an access token
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self, DbError> {
        let db = libsql::Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| DbError::Connection(format!("Failed to open remote database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| DbError::Connection(format!("Failed to connect to database: {}", e)))?;

        Self::new(conn).await
    }

    /// Look up a cached draft set by exact key match
    ///
    /// Returns `Ok(None)` on a miss, and also when the stored payload is
    /// corrupt (unparsable JSON or failing shape validation).
    #[instrument(skip(self))]
    pub async fn lookup(&self, url: &str, full: bool) -> Result<Option<DraftSet>, DbError> {
        let mut rows = self
            .conn
            .query(
                "SELECT drafts FROM draft_cache WHERE url = ? AND is_full = ?",
                params![url, i64::from(full)],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to query cache: {}", e)))?;

        let row = match rows.next().await {
            Ok(Some(row)) => row,
            Ok(None) => return Ok(None),
            Err(e) => return Err(DbError::Data(format!("Failed to read cache row: {}", e))),
        };

        let payload: String = row
            .get(0)
            .map_err(|e| DbError::Data(format!("Failed to read cached payload: {}", e)))?;

        let candidates: Vec<String> = match serde_json::from_str(&payload) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Cached payload for {} is unparsable, treating as miss: {}", url, e);
                return Ok(None);
            }
        };

        match validate_drafts(candidates) {
            Ok(drafts) => {
                debug!("Cache hit for {} (full: {})", url, full);
                Ok(Some(drafts))
            }
            Err(e) => {
                warn!("Cached payload for {} failed validation, treating as miss: {}", url, e);
                Ok(None)
            }
        }
    }

    /// Upsert a draft set, overwriting any prior record for the key pair
    #[instrument(skip(self, drafts))]
    pub async fn store(&self, url: &str, full: bool, drafts: &DraftSet) -> Result<(), DbError> {
        let payload = serde_json::to_string(drafts)
            .map_err(|e| DbError::Data(format!("Failed to serialize drafts: {}", e)))?;
        let now = Utc::now().timestamp();

        self.conn
            .execute(
                "INSERT INTO draft_cache (url, is_full, drafts, created_at)
                 VALUES (?, ?, ?, ?)
                 ON CONFLICT(url, is_full) DO UPDATE SET
                 drafts = excluded.drafts,
                 created_at = excluded.created_at",
                params![url, i64::from(full), payload, now],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to store drafts: {}", e)))?;

        debug!("Stored {} drafts for {} (full: {})", drafts.len(), url, full);
        Ok(())
    }
}
