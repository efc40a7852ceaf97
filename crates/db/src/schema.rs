//! Database schema initialization for taproot
//!
//! Defines the SurrealDB schema for the todo table and its indexes.

use crate::error::DbError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// SQL statements for schema initialization
mod sql {
    /// Define the todo table with all fields.
    ///
    /// `parent` is a non-owning back-reference; there is no cascade and no
    /// foreign-key style existence check, matching the integrity rules
    /// enforced in the repository layer.
    pub const DEFINE_TODO_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS todo SCHEMAFULL;

        DEFINE FIELD description ON todo TYPE string;

        DEFINE FIELD done ON todo TYPE bool DEFAULT false;

        DEFINE FIELD parent ON todo TYPE option<record<todo>>;

        DEFINE FIELD due_date ON todo TYPE option<datetime>;

        DEFINE FIELD created_at ON todo TYPE datetime DEFAULT time::now();

        DEFINE FIELD updated_at ON todo TYPE datetime DEFAULT time::now();
    "#;

    /// Indexes backing the filter dimensions and the keyset sort
    pub const DEFINE_TODO_INDEXES: &str = r#"
        DEFINE INDEX IF NOT EXISTS idx_todo_parent ON todo FIELDS parent;

        DEFINE INDEX IF NOT EXISTS idx_todo_done ON todo FIELDS done;

        DEFINE INDEX IF NOT EXISTS idx_todo_due_date ON todo FIELDS due_date;

        DEFINE INDEX IF NOT EXISTS idx_todo_created ON todo FIELDS created_at, id;
    "#;
}

/// Initialize the database schema.
///
/// Creates the todo table and its indexes. This function is idempotent -
/// it can be called multiple times safely as it uses `IF NOT EXISTS`
/// clauses.
///
/// # Errors
///
/// Returns `DbError::Schema` if any schema definition fails.
pub async fn init_schema(client: &Surreal<Db>) -> Result<(), DbError> {
    client
        .query(sql::DEFINE_TODO_TABLE)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    client
        .query(sql::DEFINE_TODO_INDEXES)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use surrealdb::engine::local::RocksDb;

    /// Helper to create a test database
    async fn setup_test_db() -> (Surreal<Db>, std::path::PathBuf) {
        let temp_dir = env::temp_dir().join(format!(
            "taproot-schema-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        std::fs::create_dir_all(&temp_dir).unwrap();

        let client = Surreal::new::<RocksDb>(temp_dir.clone()).await.unwrap();
        client.use_ns("taproot").use_db("test").await.unwrap();

        (client, temp_dir)
    }

    /// Clean up test database
    fn cleanup(path: &std::path::Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    #[tokio::test]
    async fn test_init_schema_succeeds() {
        let (client, temp_dir) = setup_test_db().await;

        let result = init_schema(&client).await;
        assert!(result.is_ok(), "Schema init failed: {:?}", result.err());

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let (client, temp_dir) = setup_test_db().await;

        let result1 = init_schema(&client).await;
        assert!(result1.is_ok(), "First init failed: {:?}", result1.err());

        let result2 = init_schema(&client).await;
        assert!(result2.is_ok(), "Second init failed: {:?}", result2.err());

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_schema_applies_defaults() {
        let (client, temp_dir) = setup_test_db().await;
        init_schema(&client).await.unwrap();

        client
            .query("CREATE todo:abc123 SET description = \"Defaults test\"")
            .await
            .unwrap();

        #[derive(serde::Deserialize)]
        struct Row {
            done: bool,
            created_at: Option<surrealdb::sql::Datetime>,
            updated_at: Option<surrealdb::sql::Datetime>,
        }

        let mut result = client
            .query("SELECT done, created_at, updated_at FROM todo:abc123")
            .await
            .unwrap();
        let row: Option<Row> = result.take(0).unwrap();
        let row = row.unwrap();

        assert!(!row.done, "done should default to false");
        assert!(row.created_at.is_some(), "created_at should default");
        assert!(row.updated_at.is_some(), "updated_at should default");

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_schema_rejects_missing_description() {
        let (client, temp_dir) = setup_test_db().await;
        init_schema(&client).await.unwrap();

        let result = client.query("CREATE todo:abc123 SET done = true").await;
        let failed = match result {
            Err(_) => true,
            Ok(response) => response.check().is_err(),
        };
        assert!(failed, "creating a todo without description should fail");

        cleanup(&temp_dir);
    }
}
