//! List command for displaying todos
//!
//! Implements the `taproot list` command with filtering and cursor
//! pagination. When more results remain, the footer shows the token to pass
//! back via `--cursor`.

use chrono::{DateTime, Utc};
use clap::Args;
use taproot_db::{DEFAULT_PAGE_SIZE, Database, DbResult, TodoFilter, TodoLister};

use crate::commands::parse_datetime;
use crate::output;

/// List todos with optional filters
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Search text in the description (case-insensitive)
    #[arg(long)]
    pub query: Option<String>,

    /// Show only done todos
    #[arg(long, conflicts_with = "pending")]
    pub done: bool,

    /// Show only pending todos
    #[arg(long)]
    pub pending: bool,

    /// Show only todos due at or before this date
    #[arg(long, value_parser = parse_datetime)]
    pub due_before: Option<DateTime<Utc>>,

    /// Show only todos due at or after this date
    #[arg(long, value_parser = parse_datetime)]
    pub due_after: Option<DateTime<Utc>>,

    /// Show only todos due on this calendar day (UTC)
    #[arg(long, value_parser = parse_datetime)]
    pub due_on: Option<DateTime<Utc>>,

    /// Show children of a specific todo
    #[arg(long, conflicts_with = "root")]
    pub parent: Option<String>,

    /// Show only root todos (no parent)
    #[arg(long)]
    pub root: bool,

    /// Number of todos per page (clamped to 1-100)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Resume from a cursor returned by a previous page
    #[arg(long)]
    pub cursor: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns `DbError::MalformedCursor` for an unusable `--cursor` value
    /// and `DbError::Validation` for a malformed `--parent` id.
    pub async fn execute(&self, db: &Database) -> DbResult<String> {
        let filter = self.build_filter();

        let lister = TodoLister::new(db.client());
        let page = lister
            .list(&filter, self.page_size, self.cursor.as_deref())
            .await?;

        let mut rendered = output::format_todo_table(&page.items);
        if let Some(next_cursor) = &page.next_cursor {
            rendered.push_str(&format!("\nMore results: --cursor {}", next_cursor));
        }
        Ok(rendered)
    }

    /// Build a TodoFilter from the command options
    fn build_filter(&self) -> TodoFilter {
        let mut filter = TodoFilter::new();

        if let Some(query) = &self.query {
            filter = filter.with_query(query);
        }
        if self.done {
            filter = filter.with_done(true);
        } else if self.pending {
            filter = filter.with_done(false);
        }
        if let Some(bound) = self.due_before {
            filter = filter.due_before(bound);
        }
        if let Some(bound) = self.due_after {
            filter = filter.due_after(bound);
        }
        if let Some(day) = self.due_on {
            filter = filter.due_on(day);
        }
        if let Some(parent_id) = &self.parent {
            filter = filter.children_of(parent_id);
        } else if self.root {
            filter = filter.root_only();
        }

        filter
    }
}
