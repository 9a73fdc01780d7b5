//! Database schema and migrations

use rusqlite::Connection;

use crate::Result;
use crate::db::embedder::EMBEDDING_DIM;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// # Errors
///
/// Returns error if migration fails
pub fn init(conn: &Connection) -> Result<()> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// v1: documents table and vector index
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        "
        -- Document ids repeat across collections, so the key is composite
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            text TEXT NOT NULL,
            source TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (collection, id)
        );

        -- Vector table for document embeddings (cosine distance).
        -- The collection partition key keeps KNN scans scoped to one
        -- collection, so neighbors elsewhere cannot consume the limit.
        CREATE VIRTUAL TABLE IF NOT EXISTS documents_vec USING vec0(
            doc_key TEXT PRIMARY KEY,
            collection TEXT partition key,
            embedding FLOAT[{EMBEDDING_DIM}] distance_metric=cosine
        );

        PRAGMA user_version = 1;
        "
    ))?;

    tracing::info!("migrated to schema v1 (documents + vector search)");
    Ok(())
}
