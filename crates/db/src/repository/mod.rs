//! Repository modules for database operations
//!
//! Provides repository pattern implementations for todo persistence and
//! listing, encapsulating database queries.

mod filter;
mod list;
mod todo;

pub use filter::{ParentFilter, TodoFilter};
pub use list::{
    DEFAULT_PAGE_SIZE, ListPage, MAX_PAGE_SIZE, MIN_PAGE_SIZE, TodoLister, clamp_page_size,
};
pub use todo::{TodoRepository, TodoUpdate};
