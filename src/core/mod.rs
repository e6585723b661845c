//! Core module containing the column schema, value helpers, errors and store traits

pub mod column;
pub mod error;
pub mod store;
pub mod value;

pub use column::{
    CellContent, ColumnSchema, ColumnSpec, ColumnStyle, Comparator, IdentityExtractor,
    SearchExtractor, ValueExtractor,
};
pub use error::{EditError, PreferenceError, TableError};
pub use store::PreferenceStore;
pub use value::Record;
