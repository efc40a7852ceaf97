//! Database module for Taproot
//!
//! Provides SurrealDB connection management with embedded RocksDB backend,
//! schema initialization, and data models for todo management.

pub mod cursor;
pub mod error;
pub mod id;
pub mod models;
pub mod repository;
pub mod schema;

pub use error::{DbError, DbResult};
pub use models::{NewTodo, Todo};
pub use repository::{
    DEFAULT_PAGE_SIZE, ListPage, MAX_PAGE_SIZE, MIN_PAGE_SIZE, ParentFilter, TodoFilter,
    TodoLister, TodoRepository, TodoUpdate,
};

use std::path::{Path, PathBuf};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Default database directory under the user's home
pub const DEFAULT_DB_DIR: &str = ".taproot/data";

/// Database wrapper providing connection management for SurrealDB
pub struct Database {
    /// The underlying SurrealDB client
    client: Surreal<Db>,
    /// Path where the database is stored
    path: PathBuf,
}

impl Database {
    /// Connect to a SurrealDB database at the specified path.
    ///
    /// Creates the database directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CreateDirectory` if directory creation fails.
    /// Returns `DbError::Connection` if database connection fails.
    pub async fn connect(path: &Path) -> DbResult<Self> {
        let path = Self::prepare_path(path)?;

        let client =
            Surreal::new::<RocksDb>(path.clone())
                .await
                .map_err(|e| DbError::Connection {
                    path: path.clone(),
                    source: Box::new(e),
                })?;

        Ok(Self { client, path })
    }

    /// Initialize the database schema.
    ///
    /// Selects the Taproot namespace and database, then initializes the
    /// todo table and its indexes.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Schema` if schema initialization fails.
    pub async fn init(&self) -> DbResult<()> {
        self.client
            .use_ns("taproot")
            .use_db("main")
            .await
            .map_err(|e| DbError::Schema(Box::new(e)))?;

        schema::init_schema(&self.client).await?;

        Ok(())
    }

    /// Get a reference to the underlying SurrealDB client.
    ///
    /// Use this for executing queries against the database.
    pub fn client(&self) -> &Surreal<Db> {
        &self.client
    }

    /// Get the path where the database is stored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the default database path.
    ///
    /// Returns `<home>/.taproot/data`, falling back to `.taproot/data`
    /// relative to the current working directory when the home directory
    /// cannot be determined.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DB_DIR)
    }

    /// Prepare the database path by validating and creating directories.
    fn prepare_path(path: &Path) -> DbResult<PathBuf> {
        let path = path.to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| DbError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| DbError::CreateDirectory {
                path: path.clone(),
                source: e,
            })?;
        }

        Ok(path)
    }
}

// Ensure Database is Send + Sync for async compatibility
static_assertions::assert_impl_all!(Database: Send, Sync);
