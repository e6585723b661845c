//! Filter model types: one filter entry per filterable column
//!
//! Every entry holds exactly one [`FilterVariant`], chosen from the column
//! style when the entry is created. Edits never change the variant kind;
//! they produce a new entry (and a new model) with the targeted fields
//! replaced.

use crate::core::column::{
    CellContent, ColumnSpec, ColumnStyle, IdentityExtractor, SearchExtractor,
};
use crate::core::error::EditError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inclusive numeric bounds; timestamps in epoch milliseconds for temporal columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// One option of a checkbox list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckItem {
    /// Stringified identity of the option
    pub value: String,
    pub label: CellContent,
    pub checked: bool,
}

impl CheckItem {
    pub fn new(value: impl Into<String>, label: impl Into<CellContent>, checked: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            checked,
        }
    }
}

/// Checkbox list; a record passes when its value matches any checked item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiCheckFilter {
    pub items: Vec<CheckItem>,
}

impl MultiCheckFilter {
    pub fn new(items: Vec<CheckItem>) -> Self {
        Self { items }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item.value == value)
    }

    /// Append an unchecked item unless one with the same value exists
    pub fn push_unique(&mut self, value: String, label: CellContent) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.items.push(CheckItem {
            value,
            label,
            checked: false,
        });
        true
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }
}

/// One option of a dropdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub value: String,
    pub label: CellContent,
}

impl SelectItem {
    pub fn new(value: impl Into<String>, label: impl Into<CellContent>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Dropdown with at most one selected value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleSelectFilter {
    pub items: Vec<SelectItem>,
    /// Selected identity (string or number); `None` means no constraint
    pub selected: Option<Value>,
}

impl SingleSelectFilter {
    pub fn new(items: Vec<SelectItem>, selected: Option<Value>) -> Self {
        Self {
            items,
            selected: normalize_selection(selected),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item.value == value)
    }

    pub fn push_unique(&mut self, value: String, label: CellContent) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.items.push(SelectItem { value, label });
        true
    }

    /// The selection, unless it is empty
    pub fn active_selection(&self) -> Option<&Value> {
        self.selected
            .as_ref()
            .filter(|v| !matches!(v, Value::Null) && v.as_str() != Some(""))
    }
}

fn normalize_selection(selected: Option<Value>) -> Option<Value> {
    selected.filter(|v| !matches!(v, Value::Null) && v.as_str() != Some(""))
}

/// The filter state of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterVariant {
    Range(RangeFilter),
    MultiCheck(MultiCheckFilter),
    SingleSelect(SingleSelectFilter),
}

impl FilterVariant {
    /// An unconstrained variant of the kind a style calls for
    pub fn empty_for(style: ColumnStyle) -> Self {
        match style {
            ColumnStyle::Number | ColumnStyle::Date | ColumnStyle::DateTime | ColumnStyle::Time => {
                FilterVariant::Range(RangeFilter::default())
            }
            ColumnStyle::Select => FilterVariant::SingleSelect(SingleSelectFilter::default()),
            ColumnStyle::Default => FilterVariant::MultiCheck(MultiCheckFilter::default()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterVariant::Range(_) => "range",
            FilterVariant::MultiCheck(_) => "multi_check",
            FilterVariant::SingleSelect(_) => "single_select",
        }
    }

    /// Number of active constraints this variant contributes
    pub fn active_count(&self) -> usize {
        match self {
            FilterVariant::Range(range) => usize::from(range.min.is_some() && range.max.is_some()),
            FilterVariant::MultiCheck(multi) => multi.checked_count(),
            FilterVariant::SingleSelect(select) => usize::from(select.active_selection().is_some()),
        }
    }

    /// Whether this variant lets every record through
    pub fn is_unconstrained(&self) -> bool {
        match self {
            FilterVariant::Range(range) => range.is_unconstrained(),
            FilterVariant::MultiCheck(multi) => multi.checked_count() == 0,
            FilterVariant::SingleSelect(select) => select.active_selection().is_none(),
        }
    }

    /// Same options, no constraint
    pub fn cleared(&self) -> Self {
        match self {
            FilterVariant::Range(_) => FilterVariant::Range(RangeFilter::default()),
            FilterVariant::MultiCheck(multi) => FilterVariant::MultiCheck(MultiCheckFilter {
                items: multi
                    .items
                    .iter()
                    .map(|item| CheckItem {
                        checked: false,
                        ..item.clone()
                    })
                    .collect(),
            }),
            FilterVariant::SingleSelect(select) => {
                FilterVariant::SingleSelect(SingleSelectFilter {
                    items: select.items.clone(),
                    selected: None,
                })
            }
        }
    }
}

/// A change to one column's filter, as issued by the filter UI
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    /// Check or uncheck one checkbox item by value
    Toggle { value: String, checked: bool },
    /// Check or uncheck every checkbox item
    CheckAll(bool),
    SetRange { min: Option<f64>, max: Option<f64> },
    SetMin(Option<f64>),
    SetMax(Option<f64>),
    /// Select a dropdown value; `None` or an empty string clears it
    Select(Option<Value>),
}

impl FilterEdit {
    pub fn name(&self) -> &'static str {
        match self {
            FilterEdit::Toggle { .. } => "toggle",
            FilterEdit::CheckAll(_) => "check_all",
            FilterEdit::SetRange { .. } => "set_range",
            FilterEdit::SetMin(_) => "set_min",
            FilterEdit::SetMax(_) => "set_max",
            FilterEdit::Select(_) => "select",
        }
    }
}

/// Filter definition and state of one column
///
/// Deserializing checks that the variant kind is the one the style calls
/// for; extractors are not serialized and come back empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry")]
pub struct FilterEntry {
    style: ColumnStyle,
    variant: FilterVariant,
    #[serde(skip)]
    search_extractor: Option<SearchExtractor>,
    #[serde(skip)]
    identity_extractor: Option<IdentityExtractor>,
}

#[derive(Deserialize)]
struct StoredEntry {
    style: ColumnStyle,
    variant: FilterVariant,
}

impl TryFrom<StoredEntry> for FilterEntry {
    type Error = String;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let expected = FilterVariant::empty_for(stored.style).kind_name();
        if stored.variant.kind_name() != expected {
            return Err(format!(
                "style '{:?}' requires a {} filter, got {}",
                stored.style,
                expected,
                stored.variant.kind_name()
            ));
        }
        Ok(Self::with_variant(stored.style, stored.variant))
    }
}

impl FilterEntry {
    /// An unconstrained entry for a column, carrying its extractors
    pub fn for_column(column: &ColumnSpec) -> Self {
        Self {
            style: column.style,
            variant: FilterVariant::empty_for(column.style),
            search_extractor: column.search_extractor.clone(),
            identity_extractor: column.identity_extractor.clone(),
        }
    }

    /// A range entry; non-ranged styles fall back to [`ColumnStyle::Number`]
    pub fn range(style: ColumnStyle, min: Option<f64>, max: Option<f64>) -> Self {
        let style = if style.is_ranged() {
            style
        } else {
            ColumnStyle::Number
        };
        Self::with_variant(style, FilterVariant::Range(RangeFilter::new(min, max)))
    }

    pub fn multi_check(items: Vec<CheckItem>) -> Self {
        Self::with_variant(
            ColumnStyle::Default,
            FilterVariant::MultiCheck(MultiCheckFilter::new(items)),
        )
    }

    pub fn single_select(items: Vec<SelectItem>, selected: Option<Value>) -> Self {
        Self::with_variant(
            ColumnStyle::Select,
            FilterVariant::SingleSelect(SingleSelectFilter::new(items, selected)),
        )
    }

    fn with_variant(style: ColumnStyle, variant: FilterVariant) -> Self {
        Self {
            style,
            variant,
            search_extractor: None,
            identity_extractor: None,
        }
    }

    pub fn with_identity_extractor(mut self, extractor: IdentityExtractor) -> Self {
        self.identity_extractor = Some(extractor);
        self
    }

    pub fn style(&self) -> ColumnStyle {
        self.style
    }

    pub fn variant(&self) -> &FilterVariant {
        &self.variant
    }

    pub(crate) fn variant_mut(&mut self) -> &mut FilterVariant {
        &mut self.variant
    }

    pub fn search_extractor(&self) -> Option<&SearchExtractor> {
        self.search_extractor.as_ref()
    }

    pub fn identity_extractor(&self) -> Option<&IdentityExtractor> {
        self.identity_extractor.as_ref()
    }

    /// Same entry with its constraint removed
    pub fn cleared(&self) -> Self {
        Self {
            variant: self.variant.cleared(),
            ..self.clone()
        }
    }

    /// Apply an edit, returning the replacement entry
    ///
    /// Returns the variant kind name when the edit does not fit the variant.
    pub fn edited(&self, edit: &FilterEdit) -> Result<Self, &'static str> {
        let variant = match (&self.variant, edit) {
            (FilterVariant::MultiCheck(multi), FilterEdit::Toggle { value, checked }) => {
                FilterVariant::MultiCheck(MultiCheckFilter {
                    items: multi
                        .items
                        .iter()
                        .map(|item| {
                            if &item.value == value {
                                CheckItem {
                                    checked: *checked,
                                    ..item.clone()
                                }
                            } else {
                                item.clone()
                            }
                        })
                        .collect(),
                })
            }
            (FilterVariant::MultiCheck(multi), FilterEdit::CheckAll(checked)) => {
                FilterVariant::MultiCheck(MultiCheckFilter {
                    items: multi
                        .items
                        .iter()
                        .map(|item| CheckItem {
                            checked: *checked,
                            ..item.clone()
                        })
                        .collect(),
                })
            }
            (FilterVariant::Range(_), FilterEdit::SetRange { min, max }) => {
                FilterVariant::Range(RangeFilter::new(*min, *max))
            }
            (FilterVariant::Range(range), FilterEdit::SetMin(min)) => {
                FilterVariant::Range(RangeFilter::new(*min, range.max))
            }
            (FilterVariant::Range(range), FilterEdit::SetMax(max)) => {
                FilterVariant::Range(RangeFilter::new(range.min, *max))
            }
            (FilterVariant::SingleSelect(select), FilterEdit::Select(selected)) => {
                FilterVariant::SingleSelect(SingleSelectFilter::new(
                    select.items.clone(),
                    selected.clone(),
                ))
            }
            (variant, _) => return Err(variant.kind_name()),
        };

        Ok(Self {
            variant,
            ..self.clone()
        })
    }
}

/// Mapping from column name to its filter entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterModel {
    entries: IndexMap<String, FilterEntry>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, entry: FilterEntry) {
        self.entries.insert(column.into(), entry);
    }

    pub fn with_entry(mut self, column: impl Into<String>, entry: FilterEntry) -> Self {
        self.insert(column, entry);
        self
    }

    pub fn get(&self, column: &str) -> Option<&FilterEntry> {
        self.entries.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterEntry)> {
        self.entries.iter()
    }

    pub fn columns(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of active constraints across all columns
    pub fn count_active(&self) -> usize {
        self.entries.values().map(|e| e.variant.active_count()).sum()
    }

    /// Whether no entry constrains anything
    pub fn is_unconstrained(&self) -> bool {
        self.entries.values().all(|e| e.variant.is_unconstrained())
    }

    /// Copy of the model with every constraint removed and options kept
    pub fn cleared(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(column, entry)| (column.clone(), entry.cleared()))
                .collect(),
        }
    }

    /// Copy of the model with one column's entry replaced by the edited one
    pub fn edited(&self, column: &str, edit: &FilterEdit) -> Result<Self, EditError> {
        let entry = self.entries.get(column).ok_or_else(|| EditError::UnknownColumn {
            column: column.to_string(),
        })?;

        let replacement = entry.edited(edit).map_err(|kind| EditError::KindMismatch {
            column: column.to_string(),
            kind,
            edit: edit.name(),
        })?;

        let mut next = self.clone();
        next.entries.insert(column.to_string(), replacement);
        Ok(next)
    }
}

/// Number of active constraints in a model
///
/// One per range with both bounds set, one per checked item, one per
/// non-empty selection.
pub fn count_active(model: &FilterModel) -> usize {
    model.count_active()
}
