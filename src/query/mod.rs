//! Search, sort and pagination over filtered records

pub mod pagination;
pub mod search;
pub mod sort;

pub use pagination::{Page, PaginationMeta};
pub use search::{SearchQuery, display_text, search};
pub use sort::{SortDirection, SortSpec, compare, sort_records};
