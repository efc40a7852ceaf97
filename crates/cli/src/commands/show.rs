//! Show command for displaying full todo details
//!
//! Implements the `taproot show` command to display a todo together with
//! its direct children.

use clap::Args;
use taproot_db::{Database, DbError, DbResult, TodoFilter, TodoLister, TodoRepository};

use crate::output;

/// Show full details of a todo
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Todo ID to show
    #[arg(required = true)]
    pub id: String,
}

impl ShowCommand {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if no todo has the given id.
    pub async fn execute(&self, db: &Database) -> DbResult<String> {
        let repo = TodoRepository::new(db.client());
        let todo = repo.get(&self.id).await?.ok_or_else(|| DbError::NotFound {
            id: self.id.clone(),
        })?;

        let lister = TodoLister::new(db.client());
        let children = lister
            .list(
                &TodoFilter::new().children_of(&self.id),
                taproot_db::MAX_PAGE_SIZE,
                None,
            )
            .await?;

        Ok(output::format_todo_detail(&todo, &children.items))
    }
}
