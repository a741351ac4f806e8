//! Column filters and search configuration.

use std::collections::HashMap;

use crate::column::Record;

/// Filter value attached to one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Case-insensitive substring match on the column's value.
    Text(String),
    /// Inclusion in a set of facet options. An empty set filters nothing.
    Facets(Vec<String>),
}

impl FilterValue {
    /// Returns `true` if this filter lets every row through.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Facets(selected) => selected.is_empty(),
        }
    }
}

/// Per-column filter state. A column without an entry is not filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    entries: HashMap<String, FilterValue>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column_id: &str) -> Option<&FilterValue> {
        self.entries.get(column_id)
    }

    /// Sets the filter for a column. No-op values remove the entry.
    pub fn set(&mut self, column_id: impl Into<String>, value: FilterValue) {
        let column_id = column_id.into();
        if value.is_noop() {
            self.entries.remove(&column_id);
        } else {
            self.entries.insert(column_id, value);
        }
    }

    pub fn remove(&mut self, column_id: &str) -> Option<FilterValue> {
        self.entries.remove(column_id)
    }

    /// Adds `option` to the column's facet selection, or removes it if
    /// already selected. Returns `true` if the option is now selected.
    ///
    /// A text filter on the column is replaced by the facet selection.
    pub fn toggle_facet(&mut self, column_id: &str, option: &str) -> bool {
        let mut selected = match self.entries.remove(column_id) {
            Some(FilterValue::Facets(selected)) => selected,
            _ => Vec::new(),
        };

        let now_selected = match selected.iter().position(|s| s == option) {
            Some(pos) => {
                selected.remove(pos);
                false
            }
            None => {
                selected.push(option.to_string());
                true
            }
        };

        self.set(column_id, FilterValue::Facets(selected));
        now_selected
    }

    /// Number of facet options selected on a column.
    pub fn selected_facets(&self, column_id: &str) -> usize {
        match self.entries.get(column_id) {
            Some(FilterValue::Facets(selected)) => selected.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// What the search box filters on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKey {
    /// Drive this column's own text filter.
    Column(String),
    /// Global search over these record fields.
    Fields(Vec<String>),
}

impl SearchKey {
    pub fn column(id: impl Into<String>) -> Self {
        Self::Column(id.into())
    }

    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(fields.into_iter().map(Into::into).collect())
    }
}

/// Returns `true` if any of `fields`, stringified and lower-cased, contains
/// `needle`. `needle` must already be lower-cased.
pub fn matches_any_field<R: Record>(row: &R, fields: &[String], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| row.field(field).contains_lowercase(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    struct Person {
        name: &'static str,
        city: &'static str,
    }

    impl Record for Person {
        fn field(&self, key: &str) -> CellValue {
            match key {
                "name" => self.name.into(),
                "city" => self.city.into(),
                _ => CellValue::Empty,
            }
        }
    }

    #[test]
    fn test_noop_values_remove_entry() {
        let mut filters = ColumnFilters::new();
        filters.set("name", FilterValue::Text("ann".into()));
        assert!(filters.get("name").is_some());
        filters.set("name", FilterValue::Text(String::new()));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_toggle_facet() {
        let mut filters = ColumnFilters::new();
        assert!(filters.toggle_facet("status", "active"));
        assert!(filters.toggle_facet("status", "blocked"));
        assert_eq!(filters.selected_facets("status"), 2);

        assert!(!filters.toggle_facet("status", "active"));
        assert_eq!(
            filters.get("status"),
            Some(&FilterValue::Facets(vec!["blocked".to_string()]))
        );

        assert!(!filters.toggle_facet("status", "blocked"));
        assert!(filters.get("status").is_none());
    }

    #[test]
    fn test_toggle_facet_replaces_text_filter() {
        let mut filters = ColumnFilters::new();
        filters.set("status", FilterValue::Text("act".into()));
        filters.toggle_facet("status", "active");
        assert_eq!(
            filters.get("status"),
            Some(&FilterValue::Facets(vec!["active".to_string()]))
        );
    }

    #[test]
    fn test_matches_any_field() {
        let row = Person {
            name: "Ada",
            city: "London",
        };
        let fields = vec!["name".to_string(), "city".to_string()];
        assert!(matches_any_field(&row, &fields, "lon"));
        assert!(matches_any_field(&row, &fields, "ada"));
        assert!(matches_any_field(&row, &fields, ""));
        assert!(!matches_any_field(&row, &fields, "paris"));
        assert!(!matches_any_field(&row, &["missing".to_string()], "ada"));
    }
}
