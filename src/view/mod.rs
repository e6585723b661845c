//! View assembly: committed filters, search and sort over a dataset, paginated
//!
//! A [`TableView`] owns one dataset/schema pair together with its filter
//! session. Every change that can affect the visible rows recomputes them
//! immediately, so reads are cheap and never observe a stale page.

use crate::config::TableConfig;
use crate::core::column::ColumnSchema;
use crate::core::error::{EditError, PreferenceError};
use crate::core::store::{PreferenceStore, read_positive};
use crate::core::value::Record;
use crate::filter::{FilterEdit, FilterModel, FilterSession, build_filter_model, record_passes};
use crate::query::pagination::{Page, PaginationMeta, clamp_page, total_pages};
use crate::query::search::SearchQuery;
use crate::query::sort::{SortSpec, compare};
use std::fmt;
use std::sync::Arc;

/// Filtered, searched, sorted and paginated view over a dataset
pub struct TableView {
    config: TableConfig,
    schema: ColumnSchema,
    rows: Vec<Record>,
    session: FilterSession,
    query: String,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
    preferences: Arc<dyn PreferenceStore>,
    /// Indices into `rows`, in display order
    visible: Vec<usize>,
}

impl fmt::Debug for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("columns", &self.schema.len())
            .field("rows", &self.rows.len())
            .field("visible", &self.visible.len())
            .field("query", &self.query)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl TableView {
    /// Create a view, reading the rows-per-page preference once
    pub fn new(
        schema: ColumnSchema,
        rows: Vec<Record>,
        config: TableConfig,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        let page_size = read_positive(preferences.as_ref(), &config.rows_per_page_key)
            .unwrap_or_else(|| config.fallback_page_size());
        let session = FilterSession::new(build_filter_model(&rows, &schema));

        let mut view = Self {
            config,
            schema,
            rows,
            session,
            query: String::new(),
            sort: None,
            page: 1,
            page_size,
            preferences,
            visible: Vec::new(),
        };
        view.refresh();
        view
    }

    /// Notify `listener` with every applied filter model
    pub fn on_filters_applied(
        mut self,
        listener: impl FnMut(&FilterModel) + Send + 'static,
    ) -> Self {
        self.session.set_listener(listener);
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn session(&self) -> &FilterSession {
        &self.session
    }

    /// The committed filter model used for evaluation
    pub fn filters(&self) -> &FilterModel {
        self.session.committed()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    // === Data and schema ===

    /// Replace the dataset; returns `false` when it is unchanged
    ///
    /// A changed dataset rebuilds the filter model and drops committed
    /// filters, so equal data must not trigger a rebuild.
    pub fn set_rows(&mut self, rows: Vec<Record>) -> bool {
        if rows == self.rows {
            tracing::debug!("dataset unchanged, keeping filter model");
            return false;
        }
        self.rows = rows;
        self.rebuild_filters();
        true
    }

    /// Replace the schema; returns `false` when it is unchanged
    pub fn set_schema(&mut self, schema: ColumnSchema) -> bool {
        if schema == self.schema {
            tracing::debug!("schema unchanged, keeping filter model");
            return false;
        }
        self.schema = schema;
        if self
            .sort
            .as_ref()
            .is_some_and(|spec| self.schema.get(&spec.column).is_none())
        {
            self.sort = None;
        }
        self.rebuild_filters();
        true
    }

    fn rebuild_filters(&mut self) {
        self.session.reset(build_filter_model(&self.rows, &self.schema));
        self.refresh();
    }

    // === Search, sort, pagination ===

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.refresh();
    }

    /// Advance the sort of a column: ascending, descending, unsorted
    pub fn toggle_sort(&mut self, column: &str) -> Option<&SortSpec> {
        self.sort = SortSpec::toggle(self.sort.as_ref(), column);
        self.refresh();
        self.sort.as_ref()
    }

    /// Go to a 1-based page, clamped to the available pages
    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.total_pages());
    }

    /// Change rows per page, persisting the choice
    ///
    /// Any positive size is accepted; `TableConfig::page_size_options` only
    /// lists what the host offers in its menu. The view is updated even when
    /// the store fails to save.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PreferenceError> {
        self.page_size = page_size.max(1);
        self.page = 1;
        self.refresh();
        self.preferences
            .set(&self.config.rows_per_page_key, &self.page_size.to_string())
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.visible.len(), self.page_size)
    }

    // === Filter session ===

    pub fn open_filters(&mut self) {
        self.session.open();
    }

    pub fn edit_filter(&mut self, column: &str, edit: FilterEdit) -> Result<(), EditError> {
        self.session.mutate(column, edit)
    }

    pub fn clear_filters(&mut self) -> Result<(), EditError> {
        self.session.clear()
    }

    /// Commit the draft filters and recompute the visible rows
    pub fn apply_filters(&mut self) -> Result<FilterModel, EditError> {
        let committed = self.session.apply()?;
        self.refresh();
        Ok(committed)
    }

    pub fn close_filters(&mut self) {
        self.session.close();
    }

    /// Number of active committed constraints
    pub fn active_filter_count(&self) -> usize {
        self.session.committed().count_active()
    }

    // === Output ===

    /// Number of rows passing filters and search
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// All rows passing filters and search, in display order
    pub fn visible_rows(&self) -> Vec<&Record> {
        self.visible.iter().map(|&i| &self.rows[i]).collect()
    }

    /// The rows of the current page
    pub fn page(&self) -> Page<&Record> {
        let pagination = PaginationMeta::new(self.page, self.page_size, self.visible.len());
        let data = self.visible[pagination.range()]
            .iter()
            .map(|&i| &self.rows[i])
            .collect();
        Page { data, pagination }
    }

    /// Recompute visible rows and pull the page back into range
    fn refresh(&mut self) {
        let filters = self.session.committed();
        let query = SearchQuery::new(&self.query);

        let mut visible: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| record_passes(row, filters))
            .filter(|(_, row)| query.matches(row, &self.schema, &self.config))
            .map(|(i, _)| i)
            .collect();

        if let Some(spec) = &self.sort {
            let cmp = compare(&spec.column, spec.direction, &self.schema);
            visible.sort_by(|&a, &b| cmp(&self.rows[a], &self.rows[b]));
        }

        self.visible = visible;
        self.page = clamp_page(self.page, self.total_pages());

        tracing::debug!(
            visible = self.visible.len(),
            total = self.rows.len(),
            page = self.page,
            "table view refreshed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::column::{ColumnSpec, ColumnStyle};
    use crate::storage::InMemoryPreferenceStore;
    use serde_json::{Value, json};

    fn rows(values: Vec<Value>) -> Vec<Record> {
        values.into_iter().filter_map(|v| v.as_object().cloned()).collect()
    }

    fn schema() -> ColumnSchema {
        ColumnSchema::new(vec![
            ColumnSpec::new("name", "Name").filterable(),
            ColumnSpec::new("age", "Age").with_style(ColumnStyle::Number).filterable(),
        ])
    }

    fn people(n: usize) -> Vec<Record> {
        rows((0..n).map(|i| json!({"name": format!("p{i}"), "age": i})).collect())
    }

    fn view(rows: Vec<Record>) -> TableView {
        TableView::new(
            schema(),
            rows,
            TableConfig::default(),
            Arc::new(InMemoryPreferenceStore::new()),
        )
    }

    #[test]
    fn test_page_shrinks_with_search() {
        let mut view = view(people(30));
        view.set_page(3);
        assert_eq!(view.current_page(), 3);

        view.set_query("p1");
        // p1, p10..p19
        assert_eq!(view.visible_count(), 11);
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn test_unchanged_rows_keep_committed_filters() {
        let data = people(5);
        let mut view = view(data.clone());
        view.open_filters();
        view.edit_filter("age", FilterEdit::SetRange { min: Some(1.0), max: Some(2.0) })
            .unwrap();
        view.apply_filters().unwrap();
        assert_eq!(view.visible_count(), 2);

        assert!(!view.set_rows(data));
        assert_eq!(view.visible_count(), 2);

        assert!(view.set_rows(people(6)));
        assert_eq!(view.active_filter_count(), 0);
        assert_eq!(view.visible_count(), 6);
    }

    #[test]
    fn test_schema_change_drops_stale_sort() {
        let mut view = view(people(3));
        view.set_sort(Some(SortSpec::descending("age")));
        assert!(view.set_schema(ColumnSchema::new(vec![ColumnSpec::new("name", "Name")])));
        assert!(view.sort().is_none());
        assert!(view.filters().is_empty());
    }
}
