//! Database Connection Management
//!
//! This module provides the database connection and schema setup for the
//! AssetTree node store, using an embedded libsql database.
//!
//! # Architecture
//!
//! - **Path-agnostic**: accepts any valid PathBuf chosen by the owner
//! - **Owned, injected service**: no process-wide singleton; whoever
//!   constructs the service owns its lifecycle and hands it to the store
//! - **Versioned schema**: `PRAGMA user_version` records the schema
//!   generation; setup is idempotent and refuses files stamped with a newer
//!   generation than this build understands
//! - **WAL mode**: Write-Ahead Logging for better concurrency
//!
//! # Connection pattern
//!
//! Use `connect_with_timeout()` in async functions. The busy timeout makes
//! concurrent operations wait and retry instead of failing immediately with
//! `SQLITE_BUSY` when the Tokio runtime interleaves writers.
//!
//! ```no_run
//! # use assettree_core::db::DatabaseService;
//! # use std::path::PathBuf;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabaseService::new(PathBuf::from("./data/assettree.db")).await?;
//! let conn = db.connect_with_timeout().await?;
//! # Ok(())
//! # }
//! ```

use crate::db::error::StoreError;
use libsql::{Builder, Database};
use std::path::PathBuf;
use std::sync::Arc;

/// Schema generation stamped into `PRAGMA user_version`.
///
/// Generation 1: `tree_nodes` table with `parent_id` and `name` indexes.
pub const SCHEMA_GENERATION: i64 = 1;

/// Database service owning the libsql handle and schema setup
///
/// # Examples
///
/// ```no_run
/// use assettree_core::db::DatabaseService;
/// use std::path::PathBuf;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let db = DatabaseService::new(PathBuf::from("/path/to/assettree.db")).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseService {
    /// libsql database handle (wrapped in Arc for sharing)
    pub db: Arc<Database>,

    /// Path to the database file
    pub db_path: PathBuf,
}

impl DatabaseService {
    /// Create a new DatabaseService with the specified database path
    ///
    /// This will:
    /// 1. Ensure the parent directory exists (create if needed)
    /// 2. Open/create the database file
    /// 3. Run the idempotent, versioned schema setup
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - The parent directory cannot be created
    /// - The database connection fails
    /// - Schema setup fails, or the file carries a newer schema generation
    pub async fn new(db_path: PathBuf) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::PermissionDenied {
                        StoreError::permission_denied(db_path.clone())
                    } else {
                        StoreError::DirectoryCreationFailed(e)
                    }
                })?;
            }
        }

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| StoreError::connection_failed(db_path.clone(), e))?;

        let service = Self {
            db: Arc::new(db),
            db_path,
        };

        service.initialize_schema().await?;

        Ok(service)
    }

    /// Execute a PRAGMA statement
    ///
    /// PRAGMA statements return rows, so we must use query() instead of
    /// execute(). This helper encapsulates that pattern.
    async fn execute_pragma(
        &self,
        conn: &libsql::Connection,
        pragma: &str,
    ) -> Result<(), StoreError> {
        let mut stmt = conn.prepare(pragma).await.map_err(|e| {
            StoreError::query_failed(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        let _ = stmt.query(()).await.map_err(|e| {
            StoreError::query_failed(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        Ok(())
    }

    /// Read the schema generation recorded in the database file.
    async fn schema_generation(&self, conn: &libsql::Connection) -> Result<i64, StoreError> {
        let mut stmt = conn
            .prepare("PRAGMA user_version")
            .await
            .map_err(|e| StoreError::query_failed(format!("Failed to read user_version: {}", e)))?;

        let mut rows = stmt
            .query(())
            .await
            .map_err(|e| StoreError::query_failed(format!("Failed to read user_version: {}", e)))?;

        let row = rows
            .next()
            .await
            .map_err(|e| StoreError::query_failed(format!("Failed to read user_version: {}", e)))?
            .ok_or_else(|| {
                StoreError::initialization_failed("PRAGMA user_version returned no rows")
            })?;

        row.get::<i64>(0)
            .map_err(|e| StoreError::query_failed(format!("Failed to decode user_version: {}", e)))
    }

    /// Initialize database schema and configuration
    ///
    /// Safe to call on every open: table and index creation use
    /// `IF NOT EXISTS`, and the generation stamp is only advanced when the
    /// file is older than this build. A file stamped with a newer generation
    /// is refused rather than guessed at.
    async fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect_with_timeout().await?;

        // Enable WAL mode for better concurrency
        self.execute_pragma(&conn, "PRAGMA journal_mode = WAL")
            .await?;

        let generation = self.schema_generation(&conn).await?;
        if generation > SCHEMA_GENERATION {
            return Err(StoreError::initialization_failed(format!(
                "database schema generation {} is newer than supported generation {}",
                generation, SCHEMA_GENERATION
            )));
        }

        // Create tree nodes table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tree_nodes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL DEFAULT '',
                parent_id TEXT NOT NULL DEFAULT 'ROOT',
                ancestor_name_path TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| {
            StoreError::initialization_failed(format!("Failed to create tree_nodes table: {}", e))
        })?;

        // Index on parent_id (hierarchy queries: roots and children)
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tree_nodes_parent ON tree_nodes(parent_id)",
            (),
        )
        .await
        .map_err(|e| {
            StoreError::initialization_failed(format!(
                "Failed to create index 'idx_tree_nodes_parent': {}",
                e
            ))
        })?;

        // Index on name (display lookups)
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tree_nodes_name ON tree_nodes(name)",
            (),
        )
        .await
        .map_err(|e| {
            StoreError::initialization_failed(format!(
                "Failed to create index 'idx_tree_nodes_name': {}",
                e
            ))
        })?;

        if generation < SCHEMA_GENERATION {
            self.execute_pragma(&conn, &format!("PRAGMA user_version = {}", SCHEMA_GENERATION))
                .await?;
        }

        Ok(())
    }

    /// Get a synchronous connection to the database
    ///
    /// Only use this in synchronous, single-threaded contexts where the
    /// connection will not be used across await points. Most code should
    /// use `connect_with_timeout()` instead.
    pub fn connect(&self) -> Result<libsql::Connection, StoreError> {
        self.db.connect().map_err(StoreError::Libsql)
    }

    /// Get an async connection with busy timeout configured
    ///
    /// Sets a 5-second busy timeout so concurrent operations wait and retry
    /// instead of failing immediately when the database is locked.
    pub async fn connect_with_timeout(&self) -> Result<libsql::Connection, StoreError> {
        let conn = self.connect()?;

        self.execute_pragma(&conn, "PRAGMA busy_timeout = 5000")
            .await?;

        Ok(conn)
    }
}
