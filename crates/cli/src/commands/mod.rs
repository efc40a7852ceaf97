//! CLI commands for Taproot
//!
//! Each command lives in its own module and knows how to execute itself
//! against a database connection, returning the text to print.

pub mod add;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use add::AddCommand;
pub use delete::DeleteCommand;
pub use list::ListCommand;
pub use show::ShowCommand;
pub use update::UpdateCommand;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Subcommand;
use taproot_db::{Database, DbResult};

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new todo
    Add(AddCommand),
    /// Show full details of a todo
    Show(ShowCommand),
    /// Update fields of a todo
    Update(UpdateCommand),
    /// Delete a todo without children
    Delete(DeleteCommand),
    /// List todos with filters and pagination
    List(ListCommand),
}

impl Command {
    /// Execute the command against the given database
    pub async fn execute(&self, db: &Database) -> DbResult<String> {
        match self {
            Command::Add(cmd) => cmd.execute(db).await,
            Command::Show(cmd) => cmd.execute(db).await,
            Command::Update(cmd) => cmd.execute(db).await,
            Command::Delete(cmd) => cmd.execute(db).await,
            Command::List(cmd) => cmd.execute(db).await,
        }
    }
}

/// Parse a datetime argument.
///
/// Accepts a full RFC 3339 timestamp or a plain `YYYY-MM-DD` date, which
/// resolves to midnight UTC.
pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(format!(
        "invalid date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp",
        s
    ))
}
