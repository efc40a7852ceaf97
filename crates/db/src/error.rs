use std::path::PathBuf;
use thiserror::Error;

/// Database error types for taproot
#[derive(Error, Debug)]
pub enum DbError {
    /// Error establishing connection to the database
    #[error("Failed to connect to database at {path}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: Box<surrealdb::Error>,
    },

    /// Error during schema initialization
    #[error("Failed to initialize database schema: {0}")]
    Schema(#[source] Box<surrealdb::Error>),

    /// Error executing a query
    #[error("Query execution failed")]
    Query(#[source] Box<surrealdb::Error>),

    /// Error creating database directory
    #[error("Failed to create database directory at {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error when a requested todo was not found
    #[error("Todo '{id}' not found")]
    NotFound { id: String },

    /// Error for invalid input, such as a blank description
    #[error("{message}")]
    Validation { message: String },

    /// Error when a todo would become its own parent
    #[error("Todo '{id}' cannot be its own parent")]
    InvalidParent { id: String },

    /// Error when deleting a todo that still has children
    #[error("Cannot delete todo '{id}': it has children, delete them first")]
    HasChildren { id: String },

    /// Error when a pagination cursor cannot be decoded
    #[error("Malformed cursor: {reason}")]
    MalformedCursor { reason: String },

    /// Error when no unused todo id could be allocated
    #[error("Failed to allocate a unique todo id")]
    IdExhausted,
}

impl From<surrealdb::Error> for DbError {
    fn from(err: surrealdb::Error) -> Self {
        DbError::Query(Box::new(err))
    }
}

impl DbError {
    /// Get the full error message including nested SurrealDB error details.
    ///
    /// This is useful for displaying detailed error information to users.
    pub fn full_message(&self) -> String {
        match self {
            DbError::Query(err) => {
                format!("Query execution failed: {}", err)
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;
