//! Store Error Types
//!
//! This module defines error types for storage operations, providing
//! clear error handling for connection, setup, and transaction failures.
//!
//! Simple absence is never an error: lookups return `Ok(None)` (or an empty
//! vec) when nothing matches, and the variants below are reserved for the
//! database actually misbehaving. Callers can therefore tell "not found"
//! apart from "store unavailable" without inspecting message strings.

use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
///
/// Covers connection and schema setup failures (the "store unavailable"
/// family), aborted write transactions, and query/decode failures.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to establish database connection
    #[error("Failed to connect to database at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        source: libsql::Error,
    },

    /// Failed to initialize or validate the database schema
    #[error("Failed to initialize database schema: {0}")]
    InitializationFailed(String),

    /// Permission denied when accessing the database path
    #[error("Permission denied for database path: {path}")]
    PermissionDenied { path: PathBuf },

    /// Failed to create parent directory for the database file
    #[error("Failed to create parent directory for database: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    /// libsql operation error
    #[error("Database operation failed: {0}")]
    Libsql(#[from] libsql::Error),

    /// Statement preparation or execution failed
    #[error("Query failed: {context}")]
    QueryFailed { context: String },

    /// Write transaction aborted (rolled back)
    #[error("Transaction failed: {context}")]
    TransactionFailed { context: String },

    /// Stored row could not be decoded into a record
    #[error("Corrupted record: {context}")]
    Corrupted { context: String },
}

impl StoreError {
    /// Create a connection failed error
    pub fn connection_failed(path: PathBuf, source: libsql::Error) -> Self {
        Self::ConnectionFailed { path, source }
    }

    /// Create an initialization failed error
    pub fn initialization_failed(msg: impl Into<String>) -> Self {
        Self::InitializationFailed(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(path: PathBuf) -> Self {
        Self::PermissionDenied { path }
    }

    /// Create a query failed error with context
    pub fn query_failed(context: impl Into<String>) -> Self {
        Self::QueryFailed {
            context: context.into(),
        }
    }

    /// Create a transaction failed error with context
    pub fn transaction_failed(context: impl Into<String>) -> Self {
        Self::TransactionFailed {
            context: context.into(),
        }
    }

    /// Create a corrupted record error with context
    pub fn corrupted(context: impl Into<String>) -> Self {
        Self::Corrupted {
            context: context.into(),
        }
    }
}
