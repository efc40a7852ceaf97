//! Filter predicate builder for todo listings
//!
//! Translates the optional list-query parameters into a conjunction of
//! SurrealQL conditions. Absence of a parameter contributes no condition;
//! everything provided combines with AND.

use chrono::{DateTime, Days, NaiveTime, SecondsFormat, Utc};

/// Constraint on the parent of listed todos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParentFilter {
    /// No constraint: both root and nested todos are eligible
    #[default]
    Any,
    /// Only root-level todos (no parent)
    Root,
    /// Only children of the given todo id
    Of(String),
}

/// Filter criteria for listing todos
///
/// All dimensions are optional. `query` matches when the description
/// contains the text as a case-insensitive substring; the due bounds are
/// inclusive and never match todos without a due date; `due_on` matches the
/// UTC calendar day of the given instant.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    /// Free-text search over the description
    pub query: Option<String>,
    /// Exact done-state match
    pub done: Option<bool>,
    /// Inclusive upper bound on due_date
    pub due_before: Option<DateTime<Utc>>,
    /// Inclusive lower bound on due_date
    pub due_after: Option<DateTime<Utc>>,
    /// Match todos due on the same UTC calendar day
    pub due_on: Option<DateTime<Utc>>,
    /// Parent constraint
    pub parent: ParentFilter,
}

impl TodoFilter {
    /// Create a new empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Match descriptions containing the text, case-insensitively
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Match only todos with the given done state
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    /// Match only todos due at or before the given instant
    pub fn due_before(mut self, bound: DateTime<Utc>) -> Self {
        self.due_before = Some(bound);
        self
    }

    /// Match only todos due at or after the given instant
    pub fn due_after(mut self, bound: DateTime<Utc>) -> Self {
        self.due_after = Some(bound);
        self
    }

    /// Match only todos due on the same UTC calendar day as the instant
    pub fn due_on(mut self, day: DateTime<Utc>) -> Self {
        self.due_on = Some(day);
        self
    }

    /// Match only root-level todos (no parent)
    pub fn root_only(mut self) -> Self {
        self.parent = ParentFilter::Root;
        self
    }

    /// Match only children of the given todo
    pub fn children_of(mut self, parent_id: impl Into<String>) -> Self {
        self.parent = ParentFilter::Of(parent_id.into());
        self
    }

    /// Build the WHERE-clause conditions for this filter.
    ///
    /// The free-text value is referenced as the bound parameter `$q`; the
    /// caller binds it when executing. A parent id in `ParentFilter::Of`
    /// must already be validated before this is called.
    pub(crate) fn conditions(&self) -> Vec<String> {
        let mut conditions: Vec<String> = Vec::new();

        if self.query.is_some() {
            conditions.push(
                "string::contains(string::lowercase(description), string::lowercase($q))"
                    .to_string(),
            );
        }

        if let Some(done) = self.done {
            conditions.push(format!("done = {}", done));
        }

        // NONE compares as less-than everything in SurrealQL, so each due
        // bound carries an explicit NONE guard.
        if let Some(bound) = &self.due_before {
            conditions.push(format!(
                "(due_date != NONE AND due_date <= {})",
                datetime_literal(bound)
            ));
        }

        if let Some(bound) = &self.due_after {
            conditions.push(format!(
                "(due_date != NONE AND due_date >= {})",
                datetime_literal(bound)
            ));
        }

        if let Some(day) = &self.due_on {
            let (start, end) = day_bounds(day);
            conditions.push(format!(
                "(due_date != NONE AND due_date >= {} AND due_date < {})",
                datetime_literal(&start),
                datetime_literal(&end)
            ));
        }

        match &self.parent {
            ParentFilter::Any => {}
            ParentFilter::Root => conditions.push("parent = NONE".to_string()),
            ParentFilter::Of(id) => conditions.push(format!("parent = todo:{}", id)),
        }

        conditions
    }
}

/// Render a timestamp as a SurrealQL datetime literal
pub(crate) fn datetime_literal(instant: &DateTime<Utc>) -> String {
    format!(
        "d'{}'",
        instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    )
}

/// Half-open `[midnight, next midnight)` UTC range around an instant
fn day_bounds(instant: &DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = instant.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start
        .checked_add_days(Days::new(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}
