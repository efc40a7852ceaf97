//! Data models for taproot todos
//!
//! Defines Rust types that map to the SurrealDB schema for todo records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// A todo record
///
/// Todos form a shallow tree: a record optionally points at a parent todo
/// through the `parent` field, and records whose `parent` is unset are
/// root-level. `created_at` and `updated_at` are assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier (SurrealDB record ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,

    /// Optional parent todo; NONE means root-level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Thing>,

    /// What needs doing; non-empty after trimming
    pub description: String,

    /// Completion flag
    #[serde(default)]
    pub done: bool,

    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Creation timestamp, set once by the database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp, refreshed on every mutation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// The plain record id (without the table prefix), if assigned
    pub fn record_id(&self) -> Option<String> {
        self.id.as_ref().map(|t| t.id.to_raw())
    }

    /// The plain parent record id, if this todo has a parent
    pub fn parent_id(&self) -> Option<String> {
        self.parent.as_ref().map(|t| t.id.to_raw())
    }

    /// The `(created_at, id)` pagination sort key.
    ///
    /// Stored records always carry both; `None` only occurs for values
    /// constructed in memory before insertion.
    pub fn sort_key(&self) -> Option<(DateTime<Utc>, String)> {
        Some((self.created_at?, self.record_id()?))
    }
}

/// Input for creating a todo
///
/// The id and both timestamps are assigned by the store; callers supply
/// only the user-facing fields.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    /// What needs doing (required, validated non-blank after trim)
    pub description: String,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Optional parent todo id
    pub parent: Option<String>,
}

impl NewTodo {
    /// Create a new todo input with the given description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the parent todo id
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
