//! Delete command for removing todos
//!
//! Implements the `taproot delete` command. A todo that still has children
//! cannot be deleted; the children must go first.

use clap::Args;
use taproot_db::{Database, DbResult, TodoRepository};

/// Delete a todo without children
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Todo ID to delete
    #[arg(required = true)]
    pub id: String,
}

impl DeleteCommand {
    /// Execute the delete command.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the todo does not exist and
    /// `DbError::HasChildren` if other todos still point at it as parent.
    pub async fn execute(&self, db: &Database) -> DbResult<String> {
        let repo = TodoRepository::new(db.client());
        repo.delete(&self.id).await?;
        Ok(format!("Deleted todo {}", self.id))
    }
}
