//! Caller-owned pagination facts and the pager render model.

/// Page sizes offered when none are configured.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 5] = [5, 10, 20, 50, 100];

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination facts reported by the backend for the loaded page.
///
/// The grid renders these verbatim and never recomputes them from the number
/// of loaded rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based page currently displayed.
    pub current_page: u32,
    /// Total number of pages. Zero when the collection is empty.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_items: u64,
}

impl PageInfo {
    pub fn new(current_page: u32, total_pages: u32, total_items: u64) -> Self {
        Self {
            current_page,
            total_pages,
            total_items,
        }
    }

    /// Clamps a page number into `[1, max(total_pages, 1)]`.
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }

    /// Whether a Previous control is enabled.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a Next control is enabled.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// When the pager block is shown.
///
/// The admin console historically hid the pager whenever the loaded page was
/// empty, even if other pages hold data. That stays the default; `Always`
/// switches it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagerVisibility {
    #[default]
    HideWhenPageEmpty,
    Always,
}

/// The bounded set of page buttons around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Page numbers to show, ascending.
    pub pages: Vec<u32>,
    /// Whether an ellipsis follows the last shown page.
    pub ellipsis: bool,
}

/// Computes the page-button window for `current_page` of `total_pages`.
///
/// The window is the slice `[max(0, current-3), min(total, current+2))` of the
/// full button list `1..=total`: two pages either side of the current one,
/// fewer at the edges. The ellipsis is shown when there are more than five
/// pages and the window stops before the last one.
pub fn page_window(current_page: u32, total_pages: u32) -> PageWindow {
    let start = current_page.saturating_sub(3);
    let end = total_pages.min(current_page.saturating_add(2));

    let pages = if start < end {
        (start + 1..=end).collect()
    } else {
        Vec::new()
    };

    PageWindow {
        pages,
        ellipsis: total_pages > 5 && end < total_pages,
    }
}

/// One page-number button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: u32,
    /// Whether this is the current page.
    pub active: bool,
}

/// Render model for the pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    /// Page-number buttons in the window.
    pub buttons: Vec<PageButton>,
    /// Whether an ellipsis follows the buttons.
    pub ellipsis: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub page_size: u32,
    pub page_size_options: Vec<u32>,
}

impl PagerView {
    pub(crate) fn new(info: PageInfo, page_size: u32, page_size_options: &[u32]) -> Self {
        let window = page_window(info.current_page, info.total_pages);
        Self {
            buttons: window
                .pages
                .iter()
                .map(|&page| PageButton {
                    page,
                    active: page == info.current_page,
                })
                .collect(),
            ellipsis: window.ellipsis,
            previous_enabled: info.has_previous(),
            next_enabled: info.has_next(),
            current_page: info.current_page,
            total_pages: info.total_pages,
            total_items: info.total_items,
            page_size,
            page_size_options: page_size_options.to_vec(),
        }
    }

    /// Page numbers of the visible buttons.
    pub fn pages(&self) -> Vec<u32> {
        self.buttons.iter().map(|b| b.page).collect()
    }

    /// Short status line, e.g. `Page 2 of 5 · 47 items`.
    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} · {} items",
            self.current_page,
            self.total_pages.max(1),
            self.total_items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_in_the_middle() {
        let window = page_window(7, 20);
        assert_eq!(window.pages, vec![5, 6, 7, 8, 9]);
        assert!(window.ellipsis);
    }

    #[test]
    fn test_window_at_the_start() {
        let window = page_window(1, 20);
        assert_eq!(window.pages, vec![1, 2, 3]);
        assert!(window.ellipsis);

        let window = page_window(2, 20);
        assert_eq!(window.pages, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_window_at_the_end() {
        let window = page_window(20, 20);
        assert_eq!(window.pages, vec![18, 19, 20]);
        assert!(!window.ellipsis);

        let window = page_window(18, 20);
        assert_eq!(window.pages, vec![16, 17, 18, 19, 20]);
        assert!(!window.ellipsis);
    }

    #[test]
    fn test_window_few_pages_has_no_ellipsis() {
        let window = page_window(1, 5);
        assert_eq!(window.pages, vec![1, 2, 3]);
        assert!(!window.ellipsis);

        let window = page_window(1, 1);
        assert_eq!(window.pages, vec![1]);
        assert!(!window.ellipsis);
    }

    #[test]
    fn test_window_empty_collection() {
        let window = page_window(1, 0);
        assert!(window.pages.is_empty());
        assert!(!window.ellipsis);
    }

    #[test]
    fn test_clamp_page() {
        let info = PageInfo::new(3, 4, 40);
        assert_eq!(info.clamp_page(0), 1);
        assert_eq!(info.clamp_page(9), 4);
        assert_eq!(PageInfo::default().clamp_page(5), 1);
    }

    #[test]
    fn test_pager_view_marks_active_button() {
        let view = PagerView::new(PageInfo::new(2, 3, 25), 10, &DEFAULT_PAGE_SIZE_OPTIONS);
        assert_eq!(view.pages(), vec![1, 2, 3]);
        assert!(view.buttons[1].active);
        assert!(!view.buttons[0].active);
        assert!(view.previous_enabled);
        assert!(view.next_enabled);
        assert_eq!(view.summary(), "Page 2 of 3 · 25 items");
    }
}
