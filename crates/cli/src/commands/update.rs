//! Update command for modifying existing todos
//!
//! Implements the `taproot update` command. Only the fields named on the
//! command line change; `--clear-due` and `--root` explicitly null the
//! corresponding field.

use chrono::{DateTime, Utc};
use clap::Args;
use taproot_db::{Database, DbResult, TodoRepository, TodoUpdate};

use crate::commands::parse_datetime;
use crate::output;

/// Update fields of a todo
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Todo ID to update
    #[arg(required = true)]
    pub id: String,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Mark as done
    #[arg(long, conflicts_with = "pending")]
    pub done: bool,

    /// Mark as not done
    #[arg(long)]
    pub pending: bool,

    /// New due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_datetime, conflicts_with = "clear_due")]
    pub due: Option<DateTime<Utc>>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    /// New parent todo ID
    #[arg(long, conflicts_with = "root")]
    pub parent: Option<String>,

    /// Detach from any parent, making the todo root-level
    #[arg(long)]
    pub root: bool,
}

impl UpdateCommand {
    /// Execute the update command.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the todo does not exist,
    /// `DbError::InvalidParent` if the update would make the todo its own
    /// parent, and `DbError::Validation` for a blank description.
    pub async fn execute(&self, db: &Database) -> DbResult<String> {
        let mut update = TodoUpdate::new();

        if let Some(description) = &self.description {
            update = update.with_description(description);
        }
        if self.done {
            update = update.with_done(true);
        } else if self.pending {
            update = update.with_done(false);
        }
        if let Some(due) = self.due {
            update = update.with_due_date(due);
        } else if self.clear_due {
            update = update.clear_due_date();
        }
        if let Some(parent) = &self.parent {
            update = update.with_parent(parent);
        } else if self.root {
            update = update.make_root();
        }

        let repo = TodoRepository::new(db.client());
        let todo = repo.update(&self.id, &update).await?;

        Ok(output::format_todo_detail(&todo, &[]))
    }
}
