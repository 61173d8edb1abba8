//! SQLite document storage
//!
//! Every collection lives in one `documents` table; document bodies are
//! stored as JSON text. Ids are UUID v7, timestamps RFC 3339 UTC.

#![allow(clippy::result_large_err)]

use std::path::Path;

use chrono::Utc;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use seedkit_core::model::{Document, StoredDocument};
use seedkit_core::ops::Storage;
use seedkit_core::{SeedError, TRACKING_COLLECTION};
use uuid::Uuid;

use crate::db;
use crate::errors::{from_insert, from_rusqlite, Result};
use crate::migrations::apply_migrations;

/// `Storage` backed by a SQLite connection
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database at `path` and apply migrations
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or a migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        db::configure(&conn)?;
        Self::from_connection(conn)
    }

    /// Fresh in-memory database, migrated
    ///
    /// # Errors
    ///
    /// Fails if a migration fails.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    /// Wrap an existing connection, applying pending migrations
    ///
    /// # Errors
    ///
    /// Fails if a migration fails.
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Number of documents in a collection
    ///
    /// # Errors
    ///
    /// Fails on a database error.
    pub fn count(&self, collection: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1",
                [collection],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn load(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>> {
        let data_json: Option<String> = self
            .conn
            .query_row(
                "SELECT data_json FROM documents WHERE collection = ?1 AND id = ?2",
                [collection, id],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        match data_json {
            Some(json) => Ok(Some(StoredDocument::new(id, decode(&json)?))),
            None => Ok(None),
        }
    }
}

fn decode(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}

fn encode(data: &Document) -> Result<String> {
    Ok(serde_json::to_string(data)?)
}

/// SELECT for `find` with the query's string fields as SQL predicates
///
/// Paths are inlined so `json_extract(data_json, '$.seed_id')` lines up with
/// the ledger index; only plain identifier keys are inlined. The ledger
/// collection is inlined too, as the index is partial on it.
fn find_query(collection: &str, query: &Document) -> (String, Vec<String>) {
    let mut params = Vec::new();
    let mut sql = String::from("SELECT id, data_json FROM documents WHERE ");
    if collection == TRACKING_COLLECTION {
        sql.push_str(&format!("collection = '{}'", TRACKING_COLLECTION));
    } else {
        params.push(collection.to_string());
        sql.push_str("collection = ?1");
    }

    for (key, value) in query {
        let Some(expected) = value.as_str() else {
            continue;
        };
        if !is_plain_key(key) {
            continue;
        }
        params.push(expected.to_string());
        sql.push_str(&format!(
            " AND json_extract(data_json, '$.{}') = ?{}",
            key,
            params.len()
        ));
    }

    sql.push_str(" ORDER BY rowid");
    (sql, params)
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Storage for SqliteStorage {
    fn find(&self, collection: &str, query: &Document) -> Result<Vec<StoredDocument>> {
        let (sql, params) = find_query(collection, query);
        let mut stmt = self.conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows: Vec<(String, String)> = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        // SQL narrows on string fields only; the rest is checked here
        let mut found = Vec::new();
        for (id, json) in rows {
            let doc = StoredDocument::new(id, decode(&json)?);
            if doc.matches(query) {
                found.push(doc);
            }
        }
        Ok(found)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>> {
        self.load(collection, id)
    }

    fn create(&mut self, collection: &str, data: Document) -> Result<StoredDocument> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now().to_rfc3339();
        let seed_id = data.get("seed_id").and_then(|v| v.as_str());

        self.conn
            .execute(
                "INSERT INTO documents (collection, id, data_json, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                rusqlite::params![collection, id, encode(&data)?, now],
            )
            .map_err(|e| from_insert(e, collection, seed_id))?;

        Ok(StoredDocument::new(id, data))
    }

    fn update(&mut self, collection: &str, id: &str, data: Document) -> Result<StoredDocument> {
        let mut doc = self.load(collection, id)?.ok_or_else(|| {
            SeedError::storage(
                "update",
                format!("document '{}' not found in '{}'", id, collection),
            )
        })?;
        doc.data.extend(data);

        self.conn
            .execute(
                "UPDATE documents SET data_json = ?1, updated_at = ?2
                 WHERE collection = ?3 AND id = ?4",
                rusqlite::params![encode(&doc.data)?, Utc::now().to_rfc3339(), collection, id],
            )
            .map_err(from_rusqlite)?;

        Ok(doc)
    }

    fn delete(&mut self, collection: &str, id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                [collection, id],
            )
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }
}
