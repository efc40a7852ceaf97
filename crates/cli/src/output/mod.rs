//! Output formatting module for Taproot
//!
//! Provides table formatting and display utilities for CLI output.

use chrono::{DateTime, Utc};
use taproot_db::Todo;

/// Maximum width for the description column before truncation
const MAX_DESCRIPTION_WIDTH: usize = 40;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let prefix: String = s.chars().take(max_width - 3).collect();
        format!("{}...", prefix)
    }
}

/// Render a due date for display
fn format_due(due: &Option<DateTime<Utc>>) -> String {
    match due {
        Some(instant) => instant.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

/// Render a full timestamp for the detail view
fn format_timestamp(instant: &Option<DateTime<Utc>>) -> String {
    match instant {
        Some(value) => value.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "-".to_string(),
    }
}

/// Render the done flag as a checkbox
fn format_done(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

/// Format todos into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// ID            Done  Due         Parent        Description
/// ------------  ----  ----------  ------------  -----------
/// a1b2c3d4e5f6  [ ]   2025-06-01  -             Buy milk
/// ```
pub fn format_todo_table(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }

    let headers = ["ID", "Done", "Due", "Parent", "Description"];

    let id_width = todos
        .iter()
        .map(|t| t.record_id().unwrap_or_default().len())
        .max()
        .unwrap_or(0)
        .max(headers[0].len());

    let done_width = headers[1].len().max(3);

    let due_width = todos
        .iter()
        .map(|t| format_due(&t.due_date).len())
        .max()
        .unwrap_or(0)
        .max(headers[2].len());

    let parent_width = todos
        .iter()
        .map(|t| t.parent_id().map_or(1, |p| p.len()))
        .max()
        .unwrap_or(0)
        .max(headers[3].len());

    let description_width = todos
        .iter()
        .map(|t| t.description.chars().count().min(MAX_DESCRIPTION_WIDTH))
        .max()
        .unwrap_or(0)
        .max(headers[4].len());

    let mut output = String::new();

    output.push_str(&format!(
        "{:<id_w$}  {:<done_w$}  {:<due_w$}  {:<parent_w$}  {:<desc_w$}\n",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        headers[4],
        id_w = id_width,
        done_w = done_width,
        due_w = due_width,
        parent_w = parent_width,
        desc_w = description_width,
    ));

    output.push_str(&format!(
        "{:->id_w$}  {:->done_w$}  {:->due_w$}  {:->parent_w$}  {:->desc_w$}\n",
        "",
        "",
        "",
        "",
        "",
        id_w = id_width,
        done_w = done_width,
        due_w = due_width,
        parent_w = parent_width,
        desc_w = description_width,
    ));

    for todo in todos {
        let id_display = todo.record_id().unwrap_or_default();
        let parent_display = todo.parent_id().unwrap_or_else(|| "-".to_string());
        let description_display = truncate(&todo.description, MAX_DESCRIPTION_WIDTH);

        output.push_str(&format!(
            "{:<id_w$}  {:<done_w$}  {:<due_w$}  {:<parent_w$}  {:<desc_w$}\n",
            id_display,
            format_done(todo.done),
            format_due(&todo.due_date),
            parent_display,
            description_display,
            id_w = id_width,
            done_w = done_width,
            due_w = due_width,
            parent_w = parent_width,
            desc_w = description_width,
        ));
    }

    // Drop the trailing newline so callers control spacing
    output.pop();
    output
}

/// Format the full detail view of a todo, with its direct children.
pub fn format_todo_detail(todo: &Todo, children: &[Todo]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}  {}\n",
        todo.record_id().unwrap_or_default(),
        todo.description
    ));
    output.push_str(&format!(
        "Status:   {}\n",
        if todo.done { "done" } else { "pending" }
    ));
    output.push_str(&format!("Due:      {}\n", format_due(&todo.due_date)));
    output.push_str(&format!(
        "Parent:   {}\n",
        todo.parent_id().unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!(
        "Created:  {}\n",
        format_timestamp(&todo.created_at)
    ));
    output.push_str(&format!(
        "Updated:  {}",
        format_timestamp(&todo.updated_at)
    ));

    if !children.is_empty() {
        output.push_str("\n\nChildren:\n");
        output.push_str(&format_todo_table(children));
    }

    output
}
