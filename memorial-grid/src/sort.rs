//! Sort state: an ordered list of column sorts.

use std::cmp::Ordering;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Applies this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    /// Header indicator for this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    /// Next step of the three-state cycle: unsorted → asc → desc → unsorted.
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Ascending),
            Some(Self::Ascending) => Some(Self::Descending),
            Some(Self::Descending) => None,
        }
    }
}

/// One entry of the sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    /// Column being sorted.
    pub column_id: String,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Ordered list of column sorts. Empty means the original row order.
///
/// Earlier entries take precedence; later entries only break ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortingState {
    entries: Vec<ColumnSort>,
}

impl SortingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sort entries in precedence order.
    pub fn entries(&self) -> &[ColumnSort] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the direction a column is currently sorted in, if any.
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|s| s.column_id == column_id)
            .map(|s| s.direction)
    }

    /// Advances the cycle for `column_id` and drops every other column.
    ///
    /// Returns the column's new direction.
    pub fn toggle(&mut self, column_id: &str) -> Option<SortDirection> {
        let next = SortDirection::cycle(self.direction_of(column_id));
        self.entries.clear();
        if let Some(direction) = next {
            self.entries.push(ColumnSort {
                column_id: column_id.to_string(),
                direction,
            });
        }
        next
    }

    /// Advances the cycle for `column_id`, keeping the other entries.
    ///
    /// A newly sorted column is appended as the lowest-precedence entry.
    pub fn toggle_multi(&mut self, column_id: &str) -> Option<SortDirection> {
        let next = SortDirection::cycle(self.direction_of(column_id));
        match (self.entries.iter().position(|s| s.column_id == column_id), next) {
            (Some(pos), Some(direction)) => self.entries[pos].direction = direction,
            (Some(pos), None) => {
                self.entries.remove(pos);
            }
            (None, Some(direction)) => self.entries.push(ColumnSort {
                column_id: column_id.to_string(),
                direction,
            }),
            (None, None) => {}
        }
        next
    }

    /// Removes all sorting.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycles_three_states() {
        let mut sorting = SortingState::new();
        assert_eq!(sorting.toggle("name"), Some(SortDirection::Ascending));
        assert_eq!(sorting.toggle("name"), Some(SortDirection::Descending));
        assert_eq!(sorting.toggle("name"), None);
        assert!(sorting.is_empty());
    }

    #[test]
    fn test_toggle_replaces_other_columns() {
        let mut sorting = SortingState::new();
        sorting.toggle("name");
        sorting.toggle("date");
        assert_eq!(sorting.entries().len(), 1);
        assert_eq!(sorting.direction_of("name"), None);
        assert_eq!(sorting.direction_of("date"), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_toggle_multi_keeps_order() {
        let mut sorting = SortingState::new();
        sorting.toggle_multi("country");
        sorting.toggle_multi("name");
        sorting.toggle_multi("country");

        let ids: Vec<&str> = sorting.entries().iter().map(|s| s.column_id.as_str()).collect();
        assert_eq!(ids, vec!["country", "name"]);
        assert_eq!(sorting.direction_of("country"), Some(SortDirection::Descending));

        sorting.toggle_multi("country");
        assert_eq!(sorting.entries().len(), 1);
        assert_eq!(sorting.entries()[0].column_id, "name");
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
    }
}
