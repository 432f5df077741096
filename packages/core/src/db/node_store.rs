//! TreeNodeStore - Durable CRUD over NodeRecord
//!
//! This module implements the durable node store on top of
//! [`DatabaseService`]. It is the only place that speaks SQL; everything
//! above it works in terms of [`NodeRecord`] and [`NodeWrite`].
//!
//! # Merge semantics
//!
//! `save_node` is an upsert with merge semantics, performed inside a single
//! transaction: the existing record (if any) is read, `created_at` is carried
//! over from it, every other field comes from the incoming partial (absent
//! `name` defaults to the empty string, absent `parent_id` to the `ROOT`
//! sentinel, absent `ancestor_name_path` to none), and `updated_at` is set to
//! now. A concurrent reader never observes a half-written record.
//!
//! # Failure semantics
//!
//! Absence is `Ok(None)` / an empty vec, never an error. Connection, schema,
//! and transaction failures surface as distinct [`StoreError`] variants and
//! are never masked as "not found". The one deliberate exception is
//! `get_all_nodes`, a diagnostic full scan that degrades to an empty list.
//!
//! # Examples
//!
//! ```no_run
//! use assettree_core::db::{DatabaseService, TreeNodeStore};
//! use assettree_core::models::NodeWrite;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Arc::new(DatabaseService::new(PathBuf::from("./data/assettree.db")).await?);
//!     let store = TreeNodeStore::new(db);
//!
//!     let saved = store
//!         .save_node(NodeWrite::new("a1").with_name("Building"))
//!         .await?;
//!     assert_eq!(saved.name, "Building");
//!
//!     Ok(())
//! }
//! ```

use crate::db::database::DatabaseService;
use crate::db::error::StoreError;
use crate::models::{NodeRecord, NodeWrite, ROOT_PARENT_ID};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::sync::Arc;

/// Columns selected for every record query, in `row_to_record` order.
const RECORD_COLUMNS: &str = "id, name, parent_id, ancestor_name_path, created_at, updated_at";

/// Durable store for tree node records
///
/// Thin wrapper over an injected [`DatabaseService`]; holds no state of its
/// own beyond the shared connection handle, so it is cheap to clone behind an
/// `Arc` and share across adapters.
pub struct TreeNodeStore {
    db: Arc<DatabaseService>,
}

impl TreeNodeStore {
    /// Create a new store over an owned database service
    pub fn new(db: Arc<DatabaseService>) -> Self {
        Self { db }
    }

    /// Format a timestamp for storage (RFC 3339, microsecond precision).
    fn format_timestamp(ts: DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Parse a stored timestamp.
    fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StoreError::corrupted(format!("Unable to parse timestamp '{}': {}", s, e)))
    }

    /// Convert a result row to a NodeRecord
    ///
    /// Expected columns (in order): id, name, parent_id, ancestor_name_path,
    /// created_at, updated_at. This is the central conversion point for all
    /// query operations.
    fn row_to_record(row: &libsql::Row) -> Result<NodeRecord, StoreError> {
        let id: String = row
            .get(0)
            .map_err(|e| StoreError::corrupted(format!("Failed to get id: {}", e)))?;
        let name: String = row
            .get(1)
            .map_err(|e| StoreError::corrupted(format!("Failed to get name: {}", e)))?;
        let parent_id: String = row
            .get(2)
            .map_err(|e| StoreError::corrupted(format!("Failed to get parent_id: {}", e)))?;
        let ancestor_name_path: Option<String> = row
            .get(3)
            .map_err(|e| StoreError::corrupted(format!("Failed to get ancestor_name_path: {}", e)))?;
        let created_at_str: String = row
            .get(4)
            .map_err(|e| StoreError::corrupted(format!("Failed to get created_at: {}", e)))?;
        let updated_at_str: String = row
            .get(5)
            .map_err(|e| StoreError::corrupted(format!("Failed to get updated_at: {}", e)))?;

        Ok(NodeRecord {
            id,
            name,
            parent_id,
            ancestor_name_path,
            created_at: Self::parse_timestamp(&created_at_str)?,
            updated_at: Self::parse_timestamp(&updated_at_str)?,
        })
    }

    /// Point lookup on an existing connection (shared by `load_node` and the
    /// read step inside `save_node`'s transaction).
    async fn load_node_on(
        conn: &libsql::Connection,
        id: &str,
    ) -> Result<Option<NodeRecord>, StoreError> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM tree_nodes WHERE id = ?",
                RECORD_COLUMNS
            ))
            .await
            .map_err(|e| {
                StoreError::query_failed(format!("Failed to prepare load_node query: {}", e))
            })?;

        let mut rows = stmt.query([id]).await.map_err(|e| {
            StoreError::query_failed(format!("Failed to execute load_node query: {}", e))
        })?;

        match rows
            .next()
            .await
            .map_err(|e| StoreError::query_failed(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// Run a listing query and collect the decoded records.
    async fn query_records(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<NodeRecord>, StoreError> {
        let conn = self.db.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare(sql)
            .await
            .map_err(|e| StoreError::query_failed(format!("Failed to prepare query: {}", e)))?;

        let mut rows = stmt
            .query(params)
            .await
            .map_err(|e| StoreError::query_failed(format!("Failed to execute query: {}", e)))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StoreError::query_failed(format!("Failed to fetch row: {}", e)))?
        {
            records.push(Self::row_to_record(&row)?);
        }

        Ok(records)
    }

    /// Upsert a node with merge semantics, atomically
    ///
    /// The read-existing and write steps share one `BEGIN IMMEDIATE`
    /// transaction, so no other writer can interleave between them for the
    /// same id. Returns the record as written.
    ///
    /// # Errors
    ///
    /// `StoreError::TransactionFailed` when the transaction cannot be begun,
    /// aborts mid-flight, or fails to commit; the transaction is rolled back
    /// and the caller must surface the error.
    pub async fn save_node(&self, write: NodeWrite) -> Result<NodeRecord, StoreError> {
        let conn = self.db.connect_with_timeout().await?;

        conn.execute("BEGIN IMMEDIATE", ()).await.map_err(|e| {
            StoreError::transaction_failed(format!("Failed to begin transaction: {}", e))
        })?;

        let record = match Self::save_node_on(&conn, write).await {
            Ok(record) => record,
            Err(e) => {
                let _rollback = conn.execute("ROLLBACK", ()).await;
                return Err(e);
            }
        };

        if let Err(e) = conn.execute("COMMIT", ()).await {
            let _rollback = conn.execute("ROLLBACK", ()).await;
            return Err(StoreError::transaction_failed(format!(
                "Failed to commit transaction: {}",
                e
            )));
        }

        tracing::debug!(node_id = %record.id, "node saved");
        Ok(record)
    }

    /// The read-merge-write step of `save_node`, on an open transaction.
    async fn save_node_on(
        conn: &libsql::Connection,
        write: NodeWrite,
    ) -> Result<NodeRecord, StoreError> {
        let existing = Self::load_node_on(conn, &write.id).await?;

        let mut now = Utc::now();
        if let Some(existing) = &existing {
            // updated_at must strictly advance even when two writes land
            // within the same microsecond
            if now <= existing.updated_at {
                now = existing.updated_at + Duration::microseconds(1);
            }
        }

        let record = NodeRecord {
            id: write.id,
            name: write.name.unwrap_or_default(),
            parent_id: write
                .parent_id
                .unwrap_or_else(|| ROOT_PARENT_ID.to_string()),
            ancestor_name_path: write.ancestor_name_path,
            created_at: existing.as_ref().map(|e| e.created_at).unwrap_or(now),
            updated_at: now,
        };

        conn.execute(
            "INSERT OR REPLACE INTO tree_nodes (id, name, parent_id, ancestor_name_path, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                record.id.as_str(),
                record.name.as_str(),
                record.parent_id.as_str(),
                record.ancestor_name_path.as_deref(),
                Self::format_timestamp(record.created_at),
                Self::format_timestamp(record.updated_at),
            ),
        )
        .await
        .map_err(|e| {
            StoreError::transaction_failed(format!("Failed to upsert node {}: {}", record.id, e))
        })?;

        Ok(record)
    }

    /// Get a node by id
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if the node exists
    /// - `Ok(None)` if it does not (not an error)
    /// - `Err(_)` if the database itself fails (never reported as absence)
    pub async fn load_node(&self, id: &str) -> Result<Option<NodeRecord>, StoreError> {
        let conn = self.db.connect_with_timeout().await?;
        Self::load_node_on(&conn, id).await
    }

    /// Index lookup for all top-level nodes (`parent_id == "ROOT"`)
    ///
    /// Returns an empty vec when none exist; database errors propagate.
    pub async fn get_root_nodes(&self) -> Result<Vec<NodeRecord>, StoreError> {
        self.query_records(
            &format!(
                "SELECT {} FROM tree_nodes WHERE parent_id = ? ORDER BY created_at, id",
                RECORD_COLUMNS
            ),
            [ROOT_PARENT_ID],
        )
        .await
    }

    /// Index lookup for the children of one parent
    pub async fn get_child_nodes(&self, parent_id: &str) -> Result<Vec<NodeRecord>, StoreError> {
        self.query_records(
            &format!(
                "SELECT {} FROM tree_nodes WHERE parent_id = ? ORDER BY created_at, id",
                RECORD_COLUMNS
            ),
            [parent_id],
        )
        .await
    }

    /// Full scan of every record, best-effort
    ///
    /// Diagnostic use only: degrades to an empty list on failure instead of
    /// propagating the error.
    pub async fn get_all_nodes(&self) -> Vec<NodeRecord> {
        let scan = self
            .query_records(
                &format!(
                    "SELECT {} FROM tree_nodes ORDER BY created_at, id",
                    RECORD_COLUMNS
                ),
                (),
            )
            .await;

        match scan {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Failed to scan tree_nodes, returning empty list: {}", e);
                Vec::new()
            }
        }
    }

    /// Delete a node by id
    ///
    /// Idempotent: deleting a non-existent id is not an error. Returns
    /// whether a record existed.
    pub async fn delete_node(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.db.connect_with_timeout().await?;

        let affected = conn
            .execute("DELETE FROM tree_nodes WHERE id = ?", [id])
            .await
            .map_err(|e| StoreError::query_failed(format!("Failed to delete node {}: {}", id, e)))?;

        if affected > 0 {
            tracing::debug!(node_id = %id, "node deleted");
        }
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> anyhow::Result<(TreeNodeStore, TempDir)> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(DatabaseService::new(db_path).await?);
        Ok((TreeNodeStore::new(db), temp_dir))
    }

    #[tokio::test]
    async fn test_save_defaults_missing_fields() -> anyhow::Result<()> {
        let (store, _temp_dir) = create_test_store().await?;

        let saved = store.save_node(NodeWrite::new("bare")).await?;
        assert_eq!(saved.name, "");
        assert_eq!(saved.parent_id, ROOT_PARENT_ID);
        assert!(saved.ancestor_name_path.is_none());
        assert_eq!(saved.created_at, saved.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_resave_resets_absent_fields_but_keeps_created_at() -> anyhow::Result<()> {
        let (store, _temp_dir) = create_test_store().await?;

        let first = store
            .save_node(
                NodeWrite::new("n1")
                    .with_name("Boiler")
                    .with_parent("a1")
                    .with_ancestor_path("Building"),
            )
            .await?;

        // A partial carrying only the id resets name/parent to their defaults
        let second = store.save_node(NodeWrite::new("n1")).await?;
        assert_eq!(second.name, "");
        assert_eq!(second.parent_id, ROOT_PARENT_ID);
        assert!(second.ancestor_name_path.is_none());
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at > first.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() -> anyhow::Result<()> {
        let (store, _temp_dir) = create_test_store().await?;

        store.save_node(NodeWrite::new("d1").with_name("Doomed")).await?;

        assert!(store.delete_node("d1").await?);
        assert!(!store.delete_node("d1").await?);
        assert!(store.load_node("d1").await?.is_none());

        Ok(())
    }
}
