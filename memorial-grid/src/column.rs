//! Column definitions.

use std::fmt;
use std::sync::Arc;

use crate::filter::FilterValue;
use crate::sort::SortDirection;
use crate::value::CellValue;

/// A row the grid can display.
///
/// The grid treats rows as opaque and only asks them for named fields.
///
/// # Example
///
/// ```
/// use memorial_grid::{CellValue, Record};
///
/// struct Country {
///     name: String,
///     code: String,
/// }
///
/// impl Record for Country {
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "name" => CellValue::from(&self.name),
///             "code" => CellValue::from(&self.code),
///             _ => CellValue::Empty,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value stored under `key`, or [`CellValue::Empty`] when the
    /// row has no such field.
    fn field(&self, key: &str) -> CellValue;
}

/// How a column derives its value from a row.
pub enum Accessor<R> {
    /// Look the value up with [`Record::field`].
    Key(String),
    /// Compute the value from the whole row.
    Computed(Arc<dyn Fn(&R) -> CellValue + Send + Sync>),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Key(key) => Self::Key(key.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// What a header renderer gets to work with.
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    /// Column title.
    pub title: &'a str,
    /// Whether the column can be sorted.
    pub sortable: bool,
    /// Current sort direction of the column.
    pub sort: Option<SortDirection>,
    /// Number of selected facet options on the column.
    pub selected_facets: usize,
}

/// Renders a header label.
pub type HeaderRenderer = Arc<dyn Fn(&HeaderContext<'_>) -> String + Send + Sync>;

/// Renders a cell from the row and the column's derived value.
pub type CellRenderer<R> = Arc<dyn Fn(&R, &CellValue) -> String + Send + Sync>;

/// Custom filter predicate over the column's derived value.
pub type FilterFn = Arc<dyn Fn(&CellValue, &FilterValue) -> bool + Send + Sync>;

/// A table column definition.
///
/// Columns are immutable configuration owned by the caller. Build them with
/// [`Column::new`] (key lookup) or [`Column::computed`] and the builder
/// methods.
pub struct Column<R> {
    id: String,
    title: String,
    accessor: Accessor<R>,
    sortable: bool,
    facets: Option<Vec<String>>,
    header: Option<HeaderRenderer>,
    cell: Option<CellRenderer<R>>,
    filter: Option<FilterFn>,
}

impl<R> Column<R> {
    /// Creates a sortable column reading the row field named `id`.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Key(id.clone()),
            id,
            title: title.into(),
            sortable: true,
            facets: None,
            header: None,
            cell: None,
            filter: None,
        }
    }

    /// Creates a sortable column whose value is computed from the row.
    pub fn computed<F>(id: impl Into<String>, title: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Self {
            accessor: Accessor::Computed(Arc::new(accessor)),
            ..Self::new(id, title)
        }
    }

    /// Reads a differently named row field instead of the column id.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.accessor = Accessor::Key(key.into());
        self
    }

    /// Sets whether this column can be sorted.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Declares the known values for a faceted filter on this column.
    pub fn facets<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Sets a custom header renderer.
    pub fn header<F>(mut self, render: F) -> Self
    where
        F: Fn(&HeaderContext<'_>) -> String + Send + Sync + 'static,
    {
        self.header = Some(Arc::new(render));
        self
    }

    /// Sets a custom cell renderer.
    pub fn cell<F>(mut self, render: F) -> Self
    where
        F: Fn(&R, &CellValue) -> String + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(render));
        self
    }

    /// Sets a custom filter predicate, replacing the default matching.
    pub fn filter_fn<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CellValue, &FilterValue) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(predicate));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn accessor(&self) -> &Accessor<R> {
        &self.accessor
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Known facet options, if this column has a faceted filter.
    pub fn facet_options(&self) -> Option<&[String]> {
        self.facets.as_deref()
    }

    /// Renders the header label.
    ///
    /// The default label is the title followed by the sort indicator and the
    /// number of selected facets.
    pub fn render_header(&self, cx: &HeaderContext<'_>) -> String {
        if let Some(render) = &self.header {
            return render(cx);
        }

        let mut label = cx.title.to_string();
        if let Some(direction) = cx.sort {
            label.push(' ');
            label.push_str(direction.indicator());
        }
        if cx.selected_facets > 0 {
            label.push_str(&format!(" [{}]", cx.selected_facets));
        }
        label
    }
}

impl<R: Record> Column<R> {
    /// Derives this column's value from a row.
    pub fn value(&self, row: &R) -> CellValue {
        match &self.accessor {
            Accessor::Key(key) => row.field(key),
            Accessor::Computed(f) => f(row),
        }
    }

    /// Renders the cell for a row. Missing values render as an empty string.
    pub fn render_cell(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.cell {
            Some(render) => render(row, &value),
            None => value.to_string(),
        }
    }

    /// Returns `true` if the row passes `filter` on this column.
    pub fn matches(&self, row: &R, filter: &FilterValue) -> bool {
        let value = self.value(row);
        if let Some(predicate) = &self.filter {
            return predicate(&value, filter);
        }
        match filter {
            FilterValue::Text(text) => value.contains_lowercase(&text.to_lowercase()),
            FilterValue::Facets(selected) => {
                if selected.is_empty() {
                    return true;
                }
                let value = value.to_string();
                selected.iter().any(|option| *option == value)
            }
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            facets: self.facets.clone(),
            header: self.header.clone(),
            cell: self.cell.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("facets", &self.facets)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tribute {
        title: String,
        views: i64,
        status: String,
    }

    impl Record for Tribute {
        fn field(&self, key: &str) -> CellValue {
            match key {
                "title" => CellValue::from(&self.title),
                "views" => CellValue::from(self.views),
                "status" => CellValue::from(&self.status),
                _ => CellValue::Empty,
            }
        }
    }

    fn tribute() -> Tribute {
        Tribute {
            title: "In Loving Memory".to_string(),
            views: 120,
            status: "published".to_string(),
        }
    }

    #[test]
    fn test_key_accessor() {
        let column: Column<Tribute> = Column::new("title", "Title");
        assert_eq!(column.value(&tribute()), CellValue::text("In Loving Memory"));
        assert_eq!(column.render_cell(&tribute()), "In Loving Memory");
    }

    #[test]
    fn test_missing_key_renders_empty() {
        let column: Column<Tribute> = Column::new("unknown", "Unknown");
        assert_eq!(column.render_cell(&tribute()), "");
    }

    #[test]
    fn test_renamed_key() {
        let column: Column<Tribute> = Column::new("state", "State").key("status");
        assert_eq!(column.render_cell(&tribute()), "published");
    }

    #[test]
    fn test_computed_accessor_and_cell_renderer() {
        let column = Column::computed("popular", "Popular", |t: &Tribute| {
            CellValue::from(t.views > 100)
        })
        .cell(|_, value| match value {
            CellValue::Bool(true) => "yes".to_string(),
            _ => "no".to_string(),
        });
        assert_eq!(column.value(&tribute()), CellValue::Bool(true));
        assert_eq!(column.render_cell(&tribute()), "yes");
    }

    #[test]
    fn test_default_header() {
        let column: Column<Tribute> = Column::new("title", "Title");
        let cx = HeaderContext {
            title: column.title(),
            sortable: true,
            sort: Some(SortDirection::Descending),
            selected_facets: 2,
        };
        assert_eq!(column.render_header(&cx), "Title ▼ [2]");
    }

    #[test]
    fn test_custom_header() {
        let column: Column<Tribute> =
            Column::new("title", "Title").header(|cx| cx.title.to_uppercase());
        let cx = HeaderContext {
            title: column.title(),
            sortable: true,
            sort: None,
            selected_facets: 0,
        };
        assert_eq!(column.render_header(&cx), "TITLE");
    }

    #[test]
    fn test_facet_matching() {
        let column: Column<Tribute> =
            Column::new("status", "Status").facets(["published", "draft"]);
        let row = tribute();
        assert!(column.matches(&row, &FilterValue::Facets(vec!["published".into()])));
        assert!(!column.matches(&row, &FilterValue::Facets(vec!["draft".into()])));
        assert!(column.matches(&row, &FilterValue::Facets(vec![])));
        assert_eq!(column.facet_options().map(|f| f.len()), Some(2));
    }

    #[test]
    fn test_text_matching_is_case_insensitive() {
        let column: Column<Tribute> = Column::new("title", "Title");
        assert!(column.matches(&tribute(), &FilterValue::Text("LOVING".into())));
        assert!(!column.matches(&tribute(), &FilterValue::Text("hate".into())));
    }

    #[test]
    fn test_custom_filter_fn() {
        let column: Column<Tribute> =
            Column::new("views", "Views").filter_fn(|value, filter| match (value, filter) {
                (CellValue::Integer(n), FilterValue::Text(min)) => {
                    min.parse::<i64>().map(|min| *n >= min).unwrap_or(true)
                }
                _ => true,
            });
        assert!(column.matches(&tribute(), &FilterValue::Text("100".into())));
        assert!(!column.matches(&tribute(), &FilterValue::Text("500".into())));
    }
}
