//! Column schema: descriptors that join record fields to filters, search and sorting

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// How a column's values are interpreted and which filter it gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnStyle {
    /// Free-form values, filtered with a checkbox list
    #[default]
    Default,
    Number,
    Date,
    DateTime,
    Time,
    /// Enumerated values, filtered with a single-choice dropdown
    Select,
}

impl ColumnStyle {
    /// Whether values are compared as timestamps
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            ColumnStyle::Date | ColumnStyle::DateTime | ColumnStyle::Time
        )
    }

    /// Whether the column is filtered by a numeric range
    pub fn is_ranged(self) -> bool {
        self == ColumnStyle::Number || self.is_temporal()
    }
}

/// What a value extractor produces for a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum CellContent {
    /// Plain data with a text form
    Value(Value),
    /// Host-rendered content identified by a key; it has no text form
    Opaque(String),
}

impl CellContent {
    pub fn is_null(&self) -> bool {
        matches!(self, CellContent::Value(Value::Null))
    }
}

impl From<Value> for CellContent {
    fn from(value: Value) -> Self {
        CellContent::Value(value)
    }
}

macro_rules! shared_fn {
    ($(#[$meta:meta])* $name:ident, $($sig:tt)+) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(Arc<dyn $($sig)+ + Send + Sync>);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(<fn>)"))
            }
        }

        /// Two handles are equal when they share the same closure
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }
        }
    };
}

shared_fn!(
    /// Maps a raw cell value to what the host displays for it
    ValueExtractor,
    Fn(&Value) -> CellContent
);

shared_fn!(
    /// Maps a raw cell value to the text used by free-text search
    SearchExtractor,
    Fn(&Value) -> String
);

shared_fn!(
    /// Maps a raw cell value to the key used to deduplicate and match filter options
    IdentityExtractor,
    Fn(&Value) -> Option<String>
);

shared_fn!(
    /// Orders two object values of a column
    Comparator,
    Fn(&Value, &Value) -> Ordering
);

impl ValueExtractor {
    pub fn new(f: impl Fn(&Value) -> CellContent + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn extract(&self, value: &Value) -> CellContent {
        (self.0)(value)
    }
}

impl SearchExtractor {
    pub fn new(f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn extract(&self, value: &Value) -> String {
        (self.0)(value)
    }
}

impl IdentityExtractor {
    pub fn new(f: impl Fn(&Value) -> Option<String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn extract(&self, value: &Value) -> Option<String> {
        (self.0)(value)
    }

    /// Identity of a raw value: the extractor's key, or the value itself
    pub fn effective(extractor: Option<&Self>, value: &Value) -> Value {
        extractor
            .and_then(|e| e.extract(value))
            .map(Value::String)
            .unwrap_or_else(|| value.clone())
    }
}

impl Comparator {
    pub fn new(f: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        (self.0)(a, b)
    }
}

/// Descriptor of one column of the table
///
/// # Example
///
/// ```
/// use rowsift::core::column::{ColumnSpec, ColumnStyle};
///
/// let age = ColumnSpec::new("age", "Age")
///     .with_style(ColumnStyle::Number)
///     .filterable();
/// assert!(age.can_filter);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Record field this column reads
    pub name: String,
    pub title: String,
    pub style: ColumnStyle,
    pub can_filter: bool,
    /// Skip the value extractor when deriving labels and display text
    pub render_disabled: bool,
    pub value_extractor: Option<ValueExtractor>,
    pub search_extractor: Option<SearchExtractor>,
    pub identity_extractor: Option<IdentityExtractor>,
    pub comparator: Option<Comparator>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            style: ColumnStyle::Default,
            can_filter: false,
            render_disabled: false,
            value_extractor: None,
            search_extractor: None,
            identity_extractor: None,
            comparator: None,
        }
    }

    pub fn with_style(mut self, style: ColumnStyle) -> Self {
        self.style = style;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.can_filter = true;
        self
    }

    pub fn without_render(mut self) -> Self {
        self.render_disabled = true;
        self
    }

    pub fn with_value_extractor(
        mut self,
        f: impl Fn(&Value) -> CellContent + Send + Sync + 'static,
    ) -> Self {
        self.value_extractor = Some(ValueExtractor::new(f));
        self
    }

    pub fn with_search_extractor(
        mut self,
        f: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.search_extractor = Some(SearchExtractor::new(f));
        self
    }

    pub fn with_identity_extractor(
        mut self,
        f: impl Fn(&Value) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.identity_extractor = Some(IdentityExtractor::new(f));
        self
    }

    pub fn with_comparator(
        mut self,
        f: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Comparator::new(f));
        self
    }

    /// The value extractor, unless rendering is disabled for this column
    pub fn active_value_extractor(&self) -> Option<&ValueExtractor> {
        if self.render_disabled {
            None
        } else {
            self.value_extractor.as_ref()
        }
    }
}

/// Ordered set of column descriptors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSchema {
    columns: Vec<ColumnSpec>,
}

impl ColumnSchema {
    /// Build a schema, keeping the first descriptor for each name
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        let mut unique: Vec<ColumnSpec> = Vec::with_capacity(columns.len());
        for column in columns {
            if unique.iter().any(|c| c.name == column.name) {
                tracing::warn!(column = %column.name, "duplicate column name ignored");
                continue;
            }
            unique.push(column);
        }
        Self { columns: unique }
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter()
    }

    /// Columns with filtering enabled, in schema order
    pub fn filterable(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.can_filter)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<ColumnSpec> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = ColumnSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
