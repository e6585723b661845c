//! # rowsift
//!
//! Filtering, searching, sorting and pagination for in-memory record
//! collections, driven by a user-editable column schema. Built to sit behind
//! an interactive table: the host renders, this crate decides which rows are
//! visible and in what order.
//!
//! ## Features
//!
//! - **Filter Models**: One filter per filterable column, pre-populated with the
//!   distinct values observed
//! - **Typed Filters**: Numeric/date ranges, checkbox lists and single-choice dropdowns
//! - **Staged Editing**: Draft, apply, clear with soft undo, discard on close
//! - **Literal Search**: Whitespace- and case-insensitive substring search across columns
//! - **Type-Aware Sorting**: Dates, numbers, custom comparators and text
//! - **Persisted Page Size**: Through an injected preference store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rowsift::prelude::*;
//! use std::sync::Arc;
//!
//! let schema = ColumnSchema::new(vec![
//!     ColumnSpec::new("lastName", "Last name").filterable(),
//!     ColumnSpec::new("age", "Age").with_style(ColumnStyle::Number).filterable(),
//! ]);
//!
//! let mut view = TableView::new(
//!     schema,
//!     rows,
//!     TableConfig::default(),
//!     Arc::new(InMemoryPreferenceStore::new()),
//! );
//!
//! view.open_filters();
//! view.edit_filter("age", FilterEdit::SetRange { min: Some(20.0), max: Some(40.0) })?;
//! view.apply_filters()?;
//! view.close_filters();
//!
//! view.set_query("smith");
//! view.toggle_sort("age");
//! let page = view.page();
//! ```

pub mod config;
pub mod core;
pub mod filter;
pub mod query;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        column::{CellContent, ColumnSchema, ColumnSpec, ColumnStyle},
        error::{EditError, PreferenceError, TableError},
        store::PreferenceStore,
        value::Record,
    };

    // === Filters ===
    pub use crate::filter::{
        CheckItem, FilterEdit, FilterEntry, FilterModel, FilterSession, FilterVariant,
        RangeFilter, SelectItem, SessionState, apply_filters, build_filter_model, count_active,
    };

    // === Search, sort, pagination ===
    pub use crate::query::{
        Page, PaginationMeta, SearchQuery, SortDirection, SortSpec, compare, search,
        sort_records,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryPreferenceStore, JsonFilePreferenceStore};

    // === Config ===
    pub use crate::config::TableConfig;

    // === View ===
    pub use crate::view::TableView;
}
