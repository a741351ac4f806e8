//! The data grid state.

use std::cmp::Ordering;

use log::debug;

use crate::column::{Column, HeaderContext, Record};
use crate::filter::{ColumnFilters, FilterValue, SearchKey, matches_any_field};
use crate::pagination::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, PageInfo, PagerView, PagerVisibility,
};
use crate::sort::{SortDirection, SortingState};
use crate::view::{GridBody, GridView, HeaderCell, RowView};

/// A change the grid asks its owner to perform.
///
/// The owner holds the paging state; it is expected to fetch the requested
/// page and hand the result back with [`DataGrid::set_rows`] and
/// [`DataGrid::set_page_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// Show this 1-based page.
    PageChange(u32),
    /// Use this page size.
    PageSizeChange(u32),
}

/// Errors returned by grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The requested page size is not one of the configured options.
    #[error("page size {size} is not one of {options:?}")]
    UnsupportedPageSize { size: u32, options: Vec<u32> },

    /// No column has this id.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

/// A sortable, filterable table over one page of rows.
///
/// Sorting and filtering only ever see the loaded page. Paging is driven by
/// the owner: the grid renders the owner's [`PageInfo`] and reports page
/// navigation as [`GridEvent`]s.
#[derive(Debug)]
pub struct DataGrid<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    search_key: Option<SearchKey>,
    search_placeholder: String,
    search_text: String,
    global_filter: String,
    sorting: SortingState,
    filters: ColumnFilters,
    page: PageInfo,
    page_size: u32,
    page_size_options: Vec<u32>,
    pager_visibility: PagerVisibility,
}

impl<R: Record> DataGrid<R> {
    /// Creates an empty grid with the given columns.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            search_key: None,
            search_placeholder: String::new(),
            search_text: String::new(),
            global_filter: String::new(),
            sorting: SortingState::new(),
            filters: ColumnFilters::new(),
            page: PageInfo::default(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            pager_visibility: PagerVisibility::default(),
        }
    }

    /// Sets what the search box filters on.
    pub fn with_search_key(mut self, key: SearchKey) -> Self {
        self.search_key = Some(key);
        self
    }

    /// Sets the search box hint.
    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    /// Replaces the selectable page sizes.
    ///
    /// An empty list falls back to the defaults.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<u32>>) -> Self {
        let mut options = options.into();
        if options.is_empty() {
            options = DEFAULT_PAGE_SIZE_OPTIONS.to_vec();
        }
        options.sort_unstable();
        options.dedup();
        self.page_size_options = options;
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets when the pager block is shown.
    pub fn with_pager_visibility(mut self, visibility: PagerVisibility) -> Self {
        self.pager_visibility = visibility;
        self
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replaces the loaded page of rows.
    ///
    /// Sort and filter state is kept.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    /// The loaded rows, in the order they were supplied.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.id() == column_id)
    }

    // -------------------------------------------------------------------------
    // Paging (owned by the caller)
    // -------------------------------------------------------------------------

    /// Records the backend's pagination facts for the loaded page.
    pub fn set_page_info(&mut self, info: PageInfo) {
        self.page = info;
    }

    pub fn page_info(&self) -> PageInfo {
        self.page
    }

    /// Records the page size the owner fetched with.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), GridError> {
        self.check_page_size(page_size)?;
        self.page_size = page_size;
        Ok(())
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[u32] {
        &self.page_size_options
    }

    /// Requests `page`, clamped into the valid range.
    pub fn go_to_page(&self, page: u32) -> Vec<GridEvent> {
        let page = self.page.clamp_page(page);
        debug!("grid: page change requested: {}", page);
        vec![GridEvent::PageChange(page)]
    }

    /// Requests the previous page. Nothing happens on the first page.
    pub fn previous_page(&self) -> Vec<GridEvent> {
        if !self.page.has_previous() {
            return Vec::new();
        }
        self.go_to_page(self.page.current_page - 1)
    }

    /// Requests the next page. Nothing happens on the last page.
    pub fn next_page(&self) -> Vec<GridEvent> {
        if !self.page.has_next() {
            return Vec::new();
        }
        self.go_to_page(self.page.current_page + 1)
    }

    /// Requests a new page size, followed by a jump back to page 1.
    ///
    /// Picking the current size again requests nothing.
    pub fn change_page_size(&self, page_size: u32) -> Result<Vec<GridEvent>, GridError> {
        self.check_page_size(page_size)?;
        if page_size == self.page_size {
            return Ok(Vec::new());
        }
        debug!("grid: page size change requested: {}", page_size);
        Ok(vec![
            GridEvent::PageSizeChange(page_size),
            GridEvent::PageChange(1),
        ])
    }

    fn check_page_size(&self, page_size: u32) -> Result<(), GridError> {
        if self.page_size_options.contains(&page_size) {
            Ok(())
        } else {
            Err(GridError::UnsupportedPageSize {
                size: page_size,
                options: self.page_size_options.clone(),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Advances the sort cycle of a column, dropping any other sort.
    ///
    /// Returns `None` without changing anything if the column does not exist
    /// or is not sortable; otherwise the column's new direction.
    pub fn toggle_sort(&mut self, column_id: &str) -> Option<Option<SortDirection>> {
        if !self.is_sortable(column_id) {
            return None;
        }
        Some(self.sorting.toggle(column_id))
    }

    /// Advances the sort cycle of a column, keeping other sorted columns.
    pub fn toggle_sort_multi(&mut self, column_id: &str) -> Option<Option<SortDirection>> {
        if !self.is_sortable(column_id) {
            return None;
        }
        Some(self.sorting.toggle_multi(column_id))
    }

    pub fn clear_sort(&mut self) {
        self.sorting.clear();
    }

    pub fn sorting(&self) -> &SortingState {
        &self.sorting
    }

    fn is_sortable(&self, column_id: &str) -> bool {
        self.column(column_id).is_some_and(|c| c.is_sortable())
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Applies the search box text.
    ///
    /// With a single-column search key the text becomes that column's text
    /// filter; with a field list it becomes the lower-cased global filter.
    /// Without a search key the text is only remembered.
    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
        match &self.search_key {
            Some(SearchKey::Column(column_id)) => {
                self.filters
                    .set(column_id.clone(), FilterValue::Text(text.to_string()));
            }
            Some(SearchKey::Fields(_)) => {
                self.global_filter = text.to_lowercase();
            }
            None => {}
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search_key(&self) -> Option<&SearchKey> {
        self.search_key.as_ref()
    }

    /// The lower-cased global filter needle.
    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    /// Sets a column's filter. No-op values clear it.
    pub fn set_column_filter(&mut self, column_id: &str, value: FilterValue) -> Result<(), GridError> {
        self.require_column(column_id)?;
        self.filters.set(column_id, value);
        Ok(())
    }

    pub fn clear_column_filter(&mut self, column_id: &str) {
        self.filters.remove(column_id);
    }

    /// Toggles one facet option on a column. Returns whether it is now selected.
    pub fn toggle_facet(&mut self, column_id: &str, option: &str) -> Result<bool, GridError> {
        self.require_column(column_id)?;
        Ok(self.filters.toggle_facet(column_id, option))
    }

    pub fn column_filters(&self) -> &ColumnFilters {
        &self.filters
    }

    /// Clears search, column filters and sorting.
    pub fn reset(&mut self) {
        self.search_text.clear();
        self.global_filter.clear();
        self.filters.clear();
        self.sorting.clear();
    }

    fn require_column(&self, column_id: &str) -> Result<(), GridError> {
        match self.column(column_id) {
            Some(_) => Ok(()),
            None => Err(GridError::UnknownColumn(column_id.to_string())),
        }
    }

    // -------------------------------------------------------------------------
    // Row model
    // -------------------------------------------------------------------------

    /// Indices of loaded rows that pass every filter, in sorted order.
    pub fn visible_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.rows.len())
            .filter(|&i| self.passes_filters(&self.rows[i]))
            .collect();

        if !self.sorting.is_empty() {
            // Stable: ties keep the supplied order.
            indices.sort_by(|&a, &b| self.compare_rows(&self.rows[a], &self.rows[b]));
        }

        indices
    }

    /// Loaded rows that pass every filter, in sorted order.
    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    fn passes_filters(&self, row: &R) -> bool {
        let columns_pass = self.filters.iter().all(|(column_id, filter)| {
            match self.column(column_id) {
                Some(column) => column.matches(row, filter),
                None => true,
            }
        });
        if !columns_pass {
            return false;
        }

        match &self.search_key {
            Some(SearchKey::Fields(fields)) => matches_any_field(row, fields, &self.global_filter),
            _ => true,
        }
    }

    fn compare_rows(&self, a: &R, b: &R) -> Ordering {
        for sort in self.sorting.entries() {
            let Some(column) = self.column(&sort.column_id) else {
                continue;
            };
            let (va, vb) = (column.value(a), column.value(b));
            let ordering = match (va.is_empty(), vb.is_empty()) {
                (true, true) => Ordering::Equal,
                // Empty values stay at the bottom in both directions.
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => sort.direction.apply(va.compare(&vb)),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Builds the render model for the current state.
    pub fn view(&self) -> GridView {
        let headers = self
            .columns
            .iter()
            .map(|column| {
                let sort = self.sorting.direction_of(column.id());
                let selected_facets = self.filters.selected_facets(column.id());
                let cx = HeaderContext {
                    title: column.title(),
                    sortable: column.is_sortable(),
                    sort,
                    selected_facets,
                };
                HeaderCell {
                    column_id: column.id().to_string(),
                    label: column.render_header(&cx),
                    sortable: column.is_sortable(),
                    sort,
                    faceted: column.facet_options().is_some(),
                    selected_facets,
                }
            })
            .collect();

        let visible = self.visible_indices();
        let body = if visible.is_empty() {
            GridBody::NoResults {
                colspan: self.columns.len(),
            }
        } else {
            GridBody::Rows(
                visible
                    .into_iter()
                    .map(|index| RowView {
                        index,
                        cells: self
                            .columns
                            .iter()
                            .map(|c| c.render_cell(&self.rows[index]))
                            .collect(),
                    })
                    .collect(),
            )
        };

        let show_pager = match self.pager_visibility {
            PagerVisibility::HideWhenPageEmpty => !self.rows.is_empty(),
            PagerVisibility::Always => true,
        };
        let pager =
            show_pager.then(|| PagerView::new(self.page, self.page_size, &self.page_size_options));

        GridView {
            headers,
            body,
            pager,
            search_placeholder: self.search_placeholder.clone(),
            search_text: self.search_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    #[derive(Debug, Clone)]
    struct Package {
        name: &'static str,
        price: Option<i64>,
        status: &'static str,
    }

    impl Record for Package {
        fn field(&self, key: &str) -> CellValue {
            match key {
                "name" => self.name.into(),
                "price" => self.price.into(),
                "status" => self.status.into(),
                _ => CellValue::Empty,
            }
        }
    }

    fn packages() -> Vec<Package> {
        vec![
            Package {
                name: "Silver",
                price: Some(50),
                status: "active",
            },
            Package {
                name: "Free",
                price: None,
                status: "active",
            },
            Package {
                name: "Gold",
                price: Some(120),
                status: "archived",
            },
        ]
    }

    fn grid() -> DataGrid<Package> {
        let mut grid = DataGrid::new(vec![
            Column::new("name", "Name"),
            Column::new("price", "Price"),
            Column::new("status", "Status")
                .facets(["active", "archived"])
                .sortable(false),
        ]);
        grid.set_rows(packages());
        grid
    }

    fn names(grid: &DataGrid<Package>) -> Vec<&'static str> {
        grid.visible_rows().iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let mut grid = grid();
        grid.toggle_sort("name");
        assert_eq!(names(&grid), vec!["Free", "Gold", "Silver"]);
        grid.toggle_sort("name");
        assert_eq!(names(&grid), vec!["Silver", "Gold", "Free"]);
    }

    #[test]
    fn test_empty_values_sort_last_both_ways() {
        let mut grid = grid();
        grid.toggle_sort("price");
        assert_eq!(names(&grid), vec!["Silver", "Gold", "Free"]);
        grid.toggle_sort("price");
        assert_eq!(names(&grid), vec!["Gold", "Silver", "Free"]);
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let mut grid = grid();
        assert_eq!(grid.toggle_sort("status"), None);
        assert_eq!(grid.toggle_sort("missing"), None);
        assert!(grid.sorting().is_empty());
    }

    #[test]
    fn test_sort_does_not_reorder_supplied_rows() {
        let mut grid = grid();
        grid.toggle_sort("name");
        let supplied: Vec<&str> = grid.rows().iter().map(|p| p.name).collect();
        assert_eq!(supplied, vec!["Silver", "Free", "Gold"]);
    }

    #[test]
    fn test_facet_filter() {
        let mut grid = grid();
        assert_eq!(grid.toggle_facet("status", "archived"), Ok(true));
        assert_eq!(names(&grid), vec!["Gold"]);
        grid.toggle_facet("status", "active").unwrap();
        assert_eq!(names(&grid), vec!["Silver", "Free", "Gold"]);
        assert_eq!(grid.view().headers[2].selected_facets, 2);
    }

    #[test]
    fn test_unknown_column_filter_is_rejected() {
        let mut grid = grid();
        assert_eq!(
            grid.set_column_filter("nope", FilterValue::Text("x".into())),
            Err(GridError::UnknownColumn("nope".into()))
        );
    }

    #[test]
    fn test_search_without_key_does_not_filter() {
        let mut grid = grid();
        grid.set_search("gold");
        assert_eq!(grid.search_text(), "gold");
        assert_eq!(grid.visible_rows().len(), 3);
    }

    #[test]
    fn test_filters_survive_new_rows() {
        let mut grid = grid().with_search_key(SearchKey::column("name"));
        grid.set_search("sil");
        grid.set_rows(packages());
        assert_eq!(names(&grid), vec!["Silver"]);
    }

    #[test]
    fn test_previous_and_next_at_bounds() {
        let mut grid = grid();
        grid.set_page_info(PageInfo::new(1, 3, 30));
        assert!(grid.previous_page().is_empty());
        assert_eq!(grid.next_page(), vec![GridEvent::PageChange(2)]);

        grid.set_page_info(PageInfo::new(3, 3, 30));
        assert!(grid.next_page().is_empty());
        assert_eq!(grid.previous_page(), vec![GridEvent::PageChange(2)]);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut grid = grid();
        grid.set_page_info(PageInfo::new(2, 4, 40));
        assert_eq!(grid.go_to_page(0), vec![GridEvent::PageChange(1)]);
        assert_eq!(grid.go_to_page(99), vec![GridEvent::PageChange(4)]);
    }

    #[test]
    fn test_page_size_validation() {
        let grid = grid();
        assert_eq!(
            grid.change_page_size(7),
            Err(GridError::UnsupportedPageSize {
                size: 7,
                options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            })
        );
        assert_eq!(grid.change_page_size(10), Ok(vec![]));
    }

    #[test]
    fn test_custom_page_size_options() {
        let mut grid = grid().with_page_size_options(vec![25, 25, 5]).with_page_size(5);
        assert_eq!(grid.page_size_options(), &[5, 25]);
        assert!(grid.set_page_size(10).is_err());
        assert!(grid.set_page_size(25).is_ok());
        assert_eq!(grid.page_size(), 25);
    }

    #[test]
    fn test_pager_always_visible() {
        let mut grid = grid().with_pager_visibility(PagerVisibility::Always);
        grid.set_rows(Vec::new());
        grid.set_page_info(PageInfo::new(2, 3, 42));
        assert!(grid.view().pager.is_some());
    }

    #[test]
    fn test_view_renders_cells_and_headers() {
        let mut grid = grid();
        grid.toggle_sort("price");
        let view = grid.view();
        assert_eq!(view.headers[1].label, "Price ▲");
        assert!(view.headers[2].faceted);
        match view.body {
            GridBody::Rows(rows) => {
                assert_eq!(rows[0].cells, vec!["Silver", "50", "active"]);
                assert_eq!(rows[2].cells, vec!["Free", "", "active"]);
                assert_eq!(rows[2].index, 1);
            }
            GridBody::NoResults { .. } => panic!("expected rows"),
        }
    }

    #[test]
    fn test_reset() {
        let mut grid = grid().with_search_key(SearchKey::fields(["name"]));
        grid.set_search("gold");
        grid.toggle_sort("name");
        grid.reset();
        assert_eq!(grid.visible_rows().len(), 3);
        assert!(grid.sorting().is_empty());
        assert_eq!(grid.search_text(), "");
    }
}
