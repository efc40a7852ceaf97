//! Todo CRUD repository
//!
//! Owns creation, lookup, partial update, and guarded deletion of todo
//! records. The integrity rules live here rather than in the schema: a todo
//! cannot be its own parent, and a todo with children cannot be deleted.

use chrono::{DateTime, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use tracing::{debug, trace};

use crate::error::{DbError, DbResult};
use crate::id::{self, IdGenerator};
use crate::models::{NewTodo, Todo};
use crate::repository::filter::datetime_literal;

/// Partial update of a todo.
///
/// The outer `Option` distinguishes "leave unchanged" from "set"; for the
/// nullable fields the inner `Option` distinguishes "set to a value" from
/// "clear". An update with no fields set is still valid and refreshes
/// `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct TodoUpdate {
    /// Replace the description
    pub description: Option<String>,
    /// Replace the done flag
    pub done: Option<bool>,
    /// Replace (`Some(Some(_))`) or clear (`Some(None)`) the due date
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replace (`Some(Some(_))`) or clear (`Some(None)`) the parent
    pub parent: Option<Option<String>>,
}

impl TodoUpdate {
    /// Create an empty update (touches only `updated_at`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the done flag
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clear the due date
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Re-parent under the given todo
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent = Some(Some(parent_id.into()));
        self
    }

    /// Detach from any parent, making the todo root-level
    pub fn make_root(mut self) -> Self {
        self.parent = Some(None);
        self
    }

    /// Whether any data field is being changed
    pub fn has_updates(&self) -> bool {
        self.description.is_some()
            || self.done.is_some()
            || self.due_date.is_some()
            || self.parent.is_some()
    }
}

/// Repository for todo persistence operations
pub struct TodoRepository<'a> {
    client: &'a Surreal<Db>,
}

impl<'a> TodoRepository<'a> {
    /// Create a new TodoRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Create a todo and return the stored record.
    ///
    /// The description is trimmed before storage. An id is allocated from a
    /// salted hash of the description, retrying on the rare collision.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Validation` for a blank description or a malformed
    /// parent id, `DbError::InvalidParent` if the allocated id collides with
    /// the requested parent, and `DbError::IdExhausted` if no unused id
    /// could be found.
    pub async fn create(&self, new_todo: &NewTodo) -> DbResult<Todo> {
        let description = validate_description(&new_todo.description)?;

        if let Some(parent_id) = &new_todo.parent
            && !id::is_valid_id(parent_id)
        {
            return Err(DbError::Validation {
                message: format!("invalid parent id '{}'", parent_id),
            });
        }

        let todo_id = self.allocate_id(&description).await?;
        if new_todo.parent.as_deref() == Some(todo_id.as_str()) {
            return Err(DbError::InvalidParent { id: todo_id });
        }

        let parent_value = match &new_todo.parent {
            Some(parent_id) => format!("todo:{}", parent_id),
            None => "NONE".to_string(),
        };
        let due_value = match &new_todo.due_date {
            Some(due) => datetime_literal(due),
            None => "NONE".to_string(),
        };

        let query = format!(
            "CREATE todo:{} SET description = $description, done = false, parent = {}, due_date = {}",
            todo_id, parent_value, due_value
        );
        debug!("Creating todo {}", todo_id);
        trace!("Query: {}", query);

        self.client
            .query(&query)
            .bind(("description", description))
            .await?
            .check()?;

        self.get(&todo_id).await?.ok_or(DbError::NotFound {
            id: todo_id,
        })
    }

    /// Fetch a todo by id.
    ///
    /// A malformed id cannot name a stored record, so it yields `Ok(None)`
    /// rather than an error.
    pub async fn get(&self, todo_id: &str) -> DbResult<Option<Todo>> {
        if !id::is_valid_id(todo_id) {
            return Ok(None);
        }
        let todo: Option<Todo> = self.client.select(("todo", todo_id)).await?;
        Ok(todo)
    }

    /// Apply a partial update and return the stored record.
    ///
    /// Only the fields set in `update` change; `updated_at` is refreshed on
    /// every call, including an empty update.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the todo does not exist,
    /// `DbError::InvalidParent` if the update would make the todo its own
    /// parent, and `DbError::Validation` for a blank description or a
    /// malformed parent id.
    pub async fn update(&self, todo_id: &str, update: &TodoUpdate) -> DbResult<Todo> {
        if !id::is_valid_id(todo_id) {
            return Err(DbError::NotFound {
                id: todo_id.to_string(),
            });
        }

        let description = match &update.description {
            Some(text) => Some(validate_description(text)?),
            None => None,
        };

        if let Some(Some(parent_id)) = &update.parent {
            if !id::is_valid_id(parent_id) {
                return Err(DbError::Validation {
                    message: format!("invalid parent id '{}'", parent_id),
                });
            }
            if parent_id == todo_id {
                return Err(DbError::InvalidParent {
                    id: todo_id.to_string(),
                });
            }
        }

        let mut assignments: Vec<String> = Vec::new();
        if description.is_some() {
            assignments.push("description = $description".to_string());
        }
        if let Some(done) = update.done {
            assignments.push(format!("done = {}", done));
        }
        match &update.due_date {
            Some(Some(due)) => assignments.push(format!("due_date = {}", datetime_literal(due))),
            Some(None) => assignments.push("due_date = NONE".to_string()),
            None => {}
        }
        match &update.parent {
            Some(Some(parent_id)) => assignments.push(format!("parent = todo:{}", parent_id)),
            Some(None) => assignments.push("parent = NONE".to_string()),
            None => {}
        }
        // Touched unconditionally, even for an empty update.
        assignments.push("updated_at = time::now()".to_string());

        let query = format!("UPDATE todo:{} SET {}", todo_id, assignments.join(", "));
        debug!("Updating todo {}", todo_id);
        trace!("Query: {}", query);

        let mut request = self.client.query(&query);
        if let Some(text) = description {
            request = request.bind(("description", text));
        }
        let mut result = request.await?;
        let updated: Option<Todo> = result.take(0)?;

        updated.ok_or(DbError::NotFound {
            id: todo_id.to_string(),
        })
    }

    /// Delete a todo that has no children.
    ///
    /// The existence check, the children check, and the delete run in one
    /// database transaction, so a child created concurrently cannot slip
    /// past the guard.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the todo does not exist and
    /// `DbError::HasChildren` if any todo still points at it as parent.
    pub async fn delete(&self, todo_id: &str) -> DbResult<()> {
        if !id::is_valid_id(todo_id) {
            return Err(DbError::NotFound {
                id: todo_id.to_string(),
            });
        }

        let query = format!(
            r#"BEGIN TRANSACTION;
            LET $target = (SELECT VALUE id FROM todo WHERE id = todo:{id});
            IF array::len($target) = 0 {{ THROW "todo_not_found" }};
            LET $children = (SELECT VALUE id FROM todo WHERE parent = todo:{id} LIMIT 1);
            IF array::len($children) > 0 {{ THROW "todo_has_children" }};
            DELETE todo:{id};
            COMMIT TRANSACTION;"#,
            id = todo_id
        );
        debug!("Deleting todo {}", todo_id);

        let outcome = match self.client.query(&query).await {
            Ok(response) => response.check().map(|_| ()),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(err) => {
                let message = err.to_string();
                if message.contains("todo_has_children") {
                    Err(DbError::HasChildren {
                        id: todo_id.to_string(),
                    })
                } else if message.contains("todo_not_found") {
                    Err(DbError::NotFound {
                        id: todo_id.to_string(),
                    })
                } else {
                    Err(DbError::Query(Box::new(err)))
                }
            }
        }
    }

    /// Whether any todo has the given todo as its parent
    pub async fn has_children(&self, todo_id: &str) -> DbResult<bool> {
        if !id::is_valid_id(todo_id) {
            return Ok(false);
        }
        let query = format!(
            "SELECT VALUE id FROM todo WHERE parent = todo:{} LIMIT 1",
            todo_id
        );
        let mut result = self.client.query(&query).await?;
        let children: Vec<Thing> = result.take(0)?;
        Ok(!children.is_empty())
    }

    /// Whether a todo with the given id exists
    pub async fn exists(&self, todo_id: &str) -> DbResult<bool> {
        Ok(self.get(todo_id).await?.is_some())
    }

    /// Allocate an unused id derived from the description
    async fn allocate_id(&self, description: &str) -> DbResult<String> {
        let mut generator = IdGenerator::new(description);
        while let Some(candidate) = generator.next_id() {
            if !self.exists(&candidate).await? {
                return Ok(candidate);
            }
            trace!("Id collision on {}, retrying", candidate);
        }
        Err(DbError::IdExhausted)
    }
}

/// Trim the description and reject blank input
fn validate_description(description: &str) -> DbResult<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(DbError::Validation {
            message: "description must not be blank".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
