//! Test infrastructure for integration tests
//!
//! Provides isolated database setup/teardown and CLI command execution helpers.
//! Each test gets its own database instance to ensure no shared state.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::path::PathBuf;
use taproot_cli::commands::{AddCommand, DeleteCommand, ListCommand, UpdateCommand};
use taproot_db::{DEFAULT_PAGE_SIZE, Database};

/// Test context containing an isolated database and temp directory
pub struct TestContext {
    pub db: Database,
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an isolated database.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub async fn new() -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "taproot-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::connect(&temp_dir).await.unwrap();
        db.init().await.unwrap();

        Self { db, temp_dir }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

/// Create an AddCommand with default optional fields filled in.
pub fn add_cmd(description: &str) -> AddCommand {
    AddCommand {
        description: description.to_string(),
        due: None,
        parent: None,
    }
}

/// Create an AddCommand with a due date.
#[allow(dead_code)]
pub fn add_cmd_with_due(description: &str, due: DateTime<Utc>) -> AddCommand {
    AddCommand {
        description: description.to_string(),
        due: Some(due),
        parent: None,
    }
}

/// Create an AddCommand with a parent.
pub fn add_cmd_with_parent(description: &str, parent: &str) -> AddCommand {
    AddCommand {
        description: description.to_string(),
        due: None,
        parent: Some(parent.to_string()),
    }
}

/// Create an UpdateCommand with no fields set.
pub fn update_cmd(id: &str) -> UpdateCommand {
    UpdateCommand {
        id: id.to_string(),
        description: None,
        done: false,
        pending: false,
        due: None,
        clear_due: false,
        parent: None,
        root: false,
    }
}

/// Create a DeleteCommand.
pub fn delete_cmd(id: &str) -> DeleteCommand {
    DeleteCommand { id: id.to_string() }
}

/// Parse a YYYY-MM-DD date into midnight UTC.
#[allow(dead_code)]
pub fn parse_due(s: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Create a ListCommand with no filters.
pub fn list_cmd() -> ListCommand {
    ListCommand {
        query: None,
        done: false,
        pending: false,
        due_before: None,
        due_after: None,
        due_on: None,
        parent: None,
        root: false,
        page_size: DEFAULT_PAGE_SIZE,
        cursor: None,
    }
}
