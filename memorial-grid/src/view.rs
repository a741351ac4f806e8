//! Render model produced by [`DataGrid::view`](crate::DataGrid::view).

use crate::pagination::PagerView;
use crate::sort::SortDirection;

/// Text of the row shown when no rows remain after filtering.
pub const NO_RESULTS: &str = "No results.";

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column_id: String,
    /// Rendered header label.
    pub label: String,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
    /// Whether the column offers a faceted filter.
    pub faceted: bool,
    pub selected_facets: usize,
}

/// One rendered body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Index of the row in the loaded page.
    pub index: usize,
    pub cells: Vec<String>,
}

/// Table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridBody {
    Rows(Vec<RowView>),
    /// A single full-width "No results." row.
    NoResults { colspan: usize },
}

/// Everything needed to draw the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub headers: Vec<HeaderCell>,
    pub body: GridBody,
    /// `None` when the pager block is hidden.
    pub pager: Option<PagerView>,
    pub search_placeholder: String,
    pub search_text: String,
}

impl GridView {
    /// Number of rows in the table body, counting the "No results." row.
    pub fn body_row_count(&self) -> usize {
        match &self.body {
            GridBody::Rows(rows) => rows.len(),
            GridBody::NoResults { .. } => 1,
        }
    }

    /// Returns `true` if the body is the "No results." row.
    pub fn is_empty(&self) -> bool {
        matches!(self.body, GridBody::NoResults { .. })
    }
}
