//! Add command for creating new todos
//!
//! Implements the `taproot add` command to create new todos with all
//! supported options.

use chrono::{DateTime, Utc};
use clap::Args;
use taproot_db::{Database, DbResult, NewTodo, TodoRepository};

use crate::commands::parse_datetime;

/// Create a new todo
#[derive(Debug, Args)]
pub struct AddCommand {
    /// What needs doing
    #[arg(required = true)]
    pub description: String,

    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_datetime)]
    pub due: Option<DateTime<Utc>>,

    /// Parent todo ID (creates a subtask)
    #[arg(long)]
    pub parent: Option<String>,
}

impl AddCommand {
    /// Execute the add command.
    ///
    /// Creates a new todo with the specified options and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Validation` for a blank description or a malformed
    /// parent id, and `DbError::Query` if the database operation fails.
    pub async fn execute(&self, db: &Database) -> DbResult<String> {
        let mut new_todo = NewTodo::new(&self.description);
        if let Some(due) = self.due {
            new_todo = new_todo.with_due_date(due);
        }
        if let Some(parent) = &self.parent {
            new_todo = new_todo.with_parent(parent);
        }

        let repo = TodoRepository::new(db.client());
        let todo = repo.create(&new_todo).await?;

        Ok(todo.record_id().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use taproot_db::DbError;

    /// Helper to create a test database
    async fn setup_test_db() -> (Database, std::path::PathBuf) {
        let temp_dir = env::temp_dir().join(format!(
            "taproot-add-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::connect(&temp_dir).await.unwrap();
        db.init().await.unwrap();

        (db, temp_dir)
    }

    /// Clean up test database
    fn cleanup(path: &std::path::Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    #[tokio::test]
    async fn test_add_simple_todo() {
        let (db, temp_dir) = setup_test_db().await;

        let cmd = AddCommand {
            description: "Buy milk".to_string(),
            due: None,
            parent: None,
        };

        let id = cmd.execute(&db).await.expect("Add should succeed");
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let repo = TodoRepository::new(db.client());
        let todo = repo.get(&id).await.unwrap().expect("Todo should exist");
        assert_eq!(todo.description, "Buy milk");
        assert!(!todo.done);
        assert!(todo.due_date.is_none());

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_add_with_due_and_parent() {
        let (db, temp_dir) = setup_test_db().await;

        let parent_cmd = AddCommand {
            description: "Plan trip".to_string(),
            due: None,
            parent: None,
        };
        let parent_id = parent_cmd.execute(&db).await.unwrap();

        let due = parse_datetime("2025-06-01").unwrap();
        let child_cmd = AddCommand {
            description: "Book flights".to_string(),
            due: Some(due),
            parent: Some(parent_id.clone()),
        };
        let child_id = child_cmd.execute(&db).await.unwrap();

        let repo = TodoRepository::new(db.client());
        let child = repo.get(&child_id).await.unwrap().unwrap();
        assert_eq!(child.parent_id(), Some(parent_id));
        assert_eq!(child.due_date, Some(due));

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_add_blank_description_fails() {
        let (db, temp_dir) = setup_test_db().await;

        let cmd = AddCommand {
            description: "   ".to_string(),
            due: None,
            parent: None,
        };

        let result = cmd.execute(&db).await;
        assert!(matches!(result, Err(DbError::Validation { .. })));

        cleanup(&temp_dir);
    }
}
