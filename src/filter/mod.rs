//! Column filters: model, builder, predicate evaluation and the editing session

pub mod builder;
pub mod model;
pub mod predicate;
pub mod session;

pub use builder::build_filter_model;
pub use model::{
    CheckItem, FilterEdit, FilterEntry, FilterModel, FilterVariant, MultiCheckFilter,
    RangeFilter, SelectItem, SingleSelectFilter, count_active,
};
pub use predicate::{apply_filters, record_passes};
pub use session::{FilterSession, SessionState};
