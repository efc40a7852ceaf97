//! Keyset listing of todos
//!
//! Executes filtered list queries with deterministic ordering and cursor
//! pagination. Ordering is `created_at` descending with the record id
//! descending as tiebreak; a page boundary is the sort key of the last
//! returned record, carried in an opaque cursor token.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{debug, trace};

use crate::cursor;
use crate::error::{DbError, DbResult};
use crate::id;
use crate::models::Todo;
use crate::repository::filter::{ParentFilter, TodoFilter, datetime_literal};

/// Page size used when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Smallest page size a request can resolve to
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest page size a request can resolve to
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of list results
#[derive(Debug, Clone)]
pub struct ListPage {
    /// Records in canonical order (created_at desc, id desc)
    pub items: Vec<Todo>,
    /// Opaque token for the next page; absent when results are exhausted
    pub next_cursor: Option<String>,
}

/// Repository for listing todos with filters and cursor pagination
pub struct TodoLister<'a> {
    client: &'a Surreal<Db>,
}

impl<'a> TodoLister<'a> {
    /// Create a new TodoLister with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// List todos matching the filter, one page at a time.
    ///
    /// `page_size` is clamped to `[1, 100]`; out-of-range values are
    /// adjusted silently rather than rejected. When `cursor` is present,
    /// only records strictly after that position in the canonical order are
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `DbError::MalformedCursor` if the cursor cannot be decoded,
    /// `DbError::Validation` for a malformed parent filter id, and
    /// `DbError::Query` if the database query fails.
    pub async fn list(
        &self,
        filter: &TodoFilter,
        page_size: u32,
        cursor: Option<&str>,
    ) -> DbResult<ListPage> {
        if let ParentFilter::Of(parent_id) = &filter.parent
            && !id::is_valid_id(parent_id)
        {
            return Err(DbError::Validation {
                message: format!("invalid todo id '{}'", parent_id),
            });
        }

        let take = clamp_page_size(page_size) as usize;

        let mut conditions = filter.conditions();

        // The cursor bound selects records strictly after the remembered
        // position: older created_at, or the same created_at with a smaller
        // id, matching the descending tiebreak direction.
        let bound = match cursor {
            Some(token) => Some(cursor::decode(token)?),
            None => None,
        };
        if let Some((created_at, _)) = &bound {
            let literal = datetime_literal(created_at);
            conditions.push(format!(
                "(created_at < {literal} OR (created_at = {literal} AND record::id(id) < $cursor_id))"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        // Fetch one extra record to detect whether another page exists.
        let query = format!(
            "SELECT * FROM todo{} ORDER BY created_at DESC, id DESC LIMIT {}",
            where_clause,
            take + 1
        );
        debug!("Listing todos with page size {}", take);
        trace!("Query: {}", query);

        let mut request = self.client.query(&query);
        if let Some(text) = &filter.query {
            request = request.bind(("q", text.clone()));
        }
        if let Some((_, cursor_id)) = &bound {
            request = request.bind(("cursor_id", cursor_id.clone()));
        }

        let mut result = request.await?;
        let rows: Vec<Todo> = result.take(0)?;

        let (items, boundary) = split_page(rows, take);
        let next_cursor = boundary
            .as_ref()
            .and_then(Todo::sort_key)
            .map(|(created_at, record_id)| cursor::encode(created_at, &record_id));

        Ok(ListPage { items, next_cursor })
    }
}

/// Clamp a requested page size into the allowed range
pub fn clamp_page_size(requested: u32) -> u32 {
    requested.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

/// Split a limit+1 fetch into the returned page and the boundary record.
///
/// When more rows than `take` came back, the surplus row is dropped and the
/// last row of the *returned* page becomes the boundary whose sort key seeds
/// the next cursor. Otherwise the result set is exhausted.
fn split_page(mut rows: Vec<Todo>, take: usize) -> (Vec<Todo>, Option<Todo>) {
    if rows.len() > take {
        rows.truncate(take);
        let boundary = rows.last().cloned();
        (rows, boundary)
    } else {
        (rows, None)
    }
}
