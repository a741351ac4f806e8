//! Frame building.
//!
//! Everything on screen is built here as styled lines; [`crate::terminal`]
//! only writes them out. Keeping this free of I/O lets the layout be tested.

use memorial_grid::GridBody;
use memorial_grid::GridView;
use memorial_grid::HeaderCell;
use memorial_grid::NO_RESULTS;
use memorial_grid::PagerView;

use crate::login::LoginField;
use crate::login::LoginForm;
use crate::screens::ScreenView;
use crate::text::display_width;
use crate::text::fit_to_width;
use crate::text::truncate_to_width;
use crate::toast::ToastLevel;
use crate::toast::ToastQueue;

const COLUMN_GAP: &str = "  ";
const MAX_COLUMN_WIDTH: usize = 32;
const MIN_COLUMN_WIDTH: usize = 3;

/// How a span is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    Strong,
    Accent,
    /// Highlighted row or tab.
    Selected,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Muted)
    }
}

pub type Line = Vec<Span>;

/// Concatenated text of a line.
pub fn line_text(line: &Line) -> String {
    line.iter().map(|span| span.text.as_str()).collect()
}

// =============================================================================
// Browse frame
// =============================================================================

/// Builds the frame for a list screen.
pub fn browse_frame(
    titles: &[&str],
    active: usize,
    screen: &ScreenView,
    toasts: &ToastQueue,
    width: usize,
) -> Vec<Line> {
    let mut lines = vec![tabs_line(titles, active), Vec::new(), search_line(screen)];
    lines.extend(table_lines(&screen.grid, screen.cursor, screen.focused_column, width));
    lines.push(Vec::new());

    if let Some(pager) = &screen.grid.pager {
        lines.push(pager_line(pager));
    }
    if let Some(prompt) = &screen.confirm {
        lines.push(vec![Span::new(prompt.clone(), Tone::Error)]);
    }
    lines.extend(toast_lines(toasts));
    lines.push(help_line(screen));
    lines
}

fn tabs_line(titles: &[&str], active: usize) -> Line {
    let mut line = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        if i > 0 {
            line.push(Span::muted(" │ "));
        }
        let tone = if i == active { Tone::Selected } else { Tone::Plain };
        line.push(Span::new(format!(" {} ", title), tone));
    }
    line
}

fn search_line(screen: &ScreenView) -> Line {
    let grid = &screen.grid;
    let mut line = vec![Span::new("Search: ", Tone::Strong)];
    if grid.search_text.is_empty() && !screen.editing_search {
        line.push(Span::muted(grid.search_placeholder.clone()));
    } else {
        line.push(Span::plain(grid.search_text.clone()));
    }
    if screen.editing_search {
        line.push(Span::new("▏", Tone::Accent));
    }
    if screen.loading {
        line.push(Span::muted("   Loading…"));
    }
    line
}

/// Header label with a marker on faceted columns that have no selection.
fn header_label(cell: &HeaderCell) -> String {
    if cell.faceted && cell.selected_facets == 0 {
        format!("{} ▾", cell.label)
    } else {
        cell.label.clone()
    }
}

/// Column widths fitted to the content, capped per column.
pub fn column_widths(grid: &GridView) -> Vec<usize> {
    let mut widths: Vec<usize> = grid
        .headers
        .iter()
        .map(|h| display_width(&header_label(h)))
        .collect();
    if let GridBody::Rows(rows) = &grid.body {
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(display_width(cell));
            }
        }
    }
    widths
        .into_iter()
        .map(|w| w.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH))
        .collect()
}

fn table_lines(grid: &GridView, cursor: Option<usize>, focused: usize, width: usize) -> Vec<Line> {
    let widths = column_widths(grid);
    let table_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    let table_width = table_width.min(width);

    let mut header = Vec::new();
    for (i, (cell, w)) in grid.headers.iter().zip(&widths).enumerate() {
        if i > 0 {
            header.push(Span::plain(COLUMN_GAP));
        }
        let tone = if i == focused { Tone::Selected } else { Tone::Strong };
        header.push(Span::new(fit_to_width(&header_label(cell), *w), tone));
    }

    let mut lines = vec![clip(header, width), vec![Span::muted("─".repeat(table_width))]];
    match &grid.body {
        GridBody::Rows(rows) => {
            for (i, row) in rows.iter().enumerate() {
                let tone = if cursor == Some(i) { Tone::Selected } else { Tone::Plain };
                let text = row
                    .cells
                    .iter()
                    .zip(&widths)
                    .map(|(cell, w)| fit_to_width(cell, *w))
                    .collect::<Vec<_>>()
                    .join(COLUMN_GAP);
                lines.push(vec![Span::new(truncate_to_width(&text, width), tone)]);
            }
        }
        GridBody::NoResults { .. } => {
            lines.push(vec![Span::muted(fit_to_width(NO_RESULTS, table_width))]);
        }
    }
    lines
}

/// Pager: previous, page buttons (current in brackets), ellipsis, next,
/// then the totals and page size.
pub fn pager_line(pager: &PagerView) -> Line {
    let nav_tone = |enabled: bool| if enabled { Tone::Accent } else { Tone::Muted };

    let mut line = vec![Span::new("‹ Prev", nav_tone(pager.previous_enabled))];
    for button in &pager.buttons {
        line.push(Span::plain(" "));
        if button.active {
            line.push(Span::new(format!("[{}]", button.page), Tone::Selected));
        } else {
            line.push(Span::plain(format!(" {} ", button.page)));
        }
    }
    if pager.ellipsis {
        line.push(Span::muted(" …"));
    }
    line.push(Span::plain(" "));
    line.push(Span::new("Next ›", nav_tone(pager.next_enabled)));
    line.push(Span::muted(format!(
        "    {}    {} per page",
        pager.summary(),
        pager.page_size
    )));
    line
}

fn help_line(screen: &ScreenView) -> Line {
    let help = if screen.confirm.is_some() {
        "y confirm  n cancel"
    } else if screen.editing_search {
        "type to filter  Enter keep  Esc clear"
    } else {
        "←→ column  ↑↓ row  s sort  f filter  / search  c clear  n/p page  1-9 jump  +/- size  x delete  r reload  Tab screen  L logout  q quit"
    };
    vec![Span::muted(help)]
}

fn toast_lines(toasts: &ToastQueue) -> Vec<Line> {
    toasts
        .iter()
        .map(|toast| {
            let tone = match toast.level {
                ToastLevel::Info => Tone::Accent,
                ToastLevel::Success => Tone::Success,
                ToastLevel::Error => Tone::Error,
            };
            vec![Span::new(format!("● {}", toast.message), tone)]
        })
        .collect()
}

/// Drops spans past `width`, truncating the one that crosses it.
fn clip(line: Line, width: usize) -> Line {
    let mut used = 0;
    let mut clipped = Vec::new();
    for span in line {
        let w = display_width(&span.text);
        if used + w <= width {
            used += w;
            clipped.push(span);
        } else {
            let rest = width.saturating_sub(used);
            if rest > 0 {
                clipped.push(Span::new(truncate_to_width(&span.text, rest), span.tone));
            }
            break;
        }
    }
    clipped
}

// =============================================================================
// Login frame
// =============================================================================

pub fn login_frame(form: &LoginForm, api_root: &str, toasts: &ToastQueue) -> Vec<Line> {
    let field = |label: &str, value: String, focused: bool| {
        let marker = if focused { "›" } else { " " };
        let mut line = vec![
            Span::new(marker, Tone::Accent),
            Span::new(format!(" {:<10}", label), Tone::Strong),
            Span::plain(value),
        ];
        if focused && !form.submitting {
            line.push(Span::new("▏", Tone::Accent));
        }
        line
    };

    let mut lines = vec![
        vec![Span::new("Memorial admin", Tone::Strong)],
        vec![Span::muted(format!("Sign in to {}", api_root))],
        Vec::new(),
        field("Email", form.email.clone(), form.focus == LoginField::Email),
        field("Password", form.masked_password(), form.focus == LoginField::Password),
        Vec::new(),
    ];
    if form.submitting {
        lines.push(vec![Span::muted("Signing in…")]);
    } else if let Some(error) = &form.error {
        lines.push(vec![Span::new(error.clone(), Tone::Error)]);
    }
    lines.extend(toast_lines(toasts));
    lines.push(vec![Span::muted("Tab switch field  Enter sign in  Esc clear  Ctrl-C quit")]);
    lines
}

#[cfg(test)]
mod tests {
    use memorial_grid::CellValue;
    use memorial_grid::Column;
    use memorial_grid::DataGrid;
    use memorial_grid::PageInfo;
    use memorial_grid::Record;
    use memorial_grid::SearchKey;

    use super::*;
    use crate::input::TextEdit;
    use crate::toast::Toast;

    struct Row(&'static str, &'static str);

    impl Record for Row {
        fn field(&self, key: &str) -> CellValue {
            match key {
                "name" => CellValue::from(self.0),
                "country" => CellValue::from(self.1),
                _ => CellValue::Empty,
            }
        }
    }

    fn grid() -> DataGrid<Row> {
        let mut grid = DataGrid::new(vec![
            Column::new("name", "Name"),
            Column::new("country", "Country").facets(["Croatia", "Ireland"]),
        ])
        .with_search_key(SearchKey::column("name"))
        .with_search_placeholder("Filter names...");
        grid.set_rows(vec![Row("Ana Marić", "Croatia"), Row("John Smith", "Ireland")]);
        grid
    }

    fn screen(grid: &DataGrid<Row>) -> ScreenView {
        ScreenView {
            title: "People",
            grid: grid.view(),
            cursor: Some(1),
            focused_column: 0,
            loading: false,
            editing_search: false,
            confirm: None,
        }
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(line_text).collect()
    }

    #[test]
    fn test_browse_frame_layout() {
        let mut grid = grid();
        grid.set_page_info(PageInfo::new(7, 20, 200));
        let lines = browse_frame(&["People", "Places"], 0, &screen(&grid), &ToastQueue::default(), 120);
        let text = texts(&lines);

        assert_eq!(text[0], " People  │  Places ");
        assert_eq!(lines[0][0].tone, Tone::Selected);
        assert_eq!(text[2], "Search: Filter names...");
        assert_eq!(text[3], "Name        Country ▾");
        assert_eq!(text[5], "Ana Marić   Croatia  ");
        assert_eq!(lines[6][0].tone, Tone::Selected);

        let pager = text.iter().find(|l| l.starts_with("‹ Prev")).unwrap();
        assert!(pager.contains(" 5   6  [7]  8   9  … Next ›"));
        assert!(pager.contains("Page 7 of 20 · 200 items"));
        assert!(pager.contains("10 per page"));
    }

    #[test]
    fn test_no_results_row_and_hidden_pager() {
        let mut grid = grid();
        grid.set_search("nobody");
        let mut view = screen(&grid);
        view.cursor = None;
        let text = texts(&browse_frame(&["People"], 0, &view, &ToastQueue::default(), 80));

        assert!(text.iter().any(|l| l.starts_with(NO_RESULTS)));
        // No page info was reported, so the pager shows page 1 of 1.
        assert!(text.iter().any(|l| l.contains("Page 1 of 1")));

        let empty = DataGrid::<Row>::new(vec![Column::new("name", "Name")]);
        let view = ScreenView {
            grid: empty.view(),
            cursor: None,
            ..screen(&grid)
        };
        let text = texts(&browse_frame(&["People"], 0, &view, &ToastQueue::default(), 80));
        assert!(!text.iter().any(|l| l.starts_with("‹ Prev")));
    }

    #[test]
    fn test_disabled_navigation_is_muted() {
        let pager = grid().view().pager.unwrap();
        let line = pager_line(&pager);
        assert_eq!(line[0].tone, Tone::Muted);
        assert_eq!(line.iter().find(|s| s.text == "Next ›").unwrap().tone, Tone::Muted);
    }

    #[test]
    fn test_wide_tables_are_clipped() {
        let grid = grid();
        let lines = browse_frame(&["People"], 0, &screen(&grid), &ToastQueue::default(), 8);
        for line in &lines[3..6] {
            assert!(display_width(&line_text(line)) <= 8, "{:?}", line_text(line));
        }
    }

    #[test]
    fn test_prompt_toasts_and_search_cursor() {
        let grid = grid();
        let mut view = screen(&grid);
        view.confirm = Some("Delete person Ana? (y/n)".into());
        view.editing_search = true;
        let mut toasts = ToastQueue::default();
        toasts.push(Toast::error("Loading people failed"));

        let lines = browse_frame(&["People"], 0, &view, &toasts, 80);
        let text = texts(&lines);
        assert!(text[2].ends_with("▏"));
        assert!(text.contains(&"Delete person Ana? (y/n)".to_string()));
        assert!(text.contains(&"● Loading people failed".to_string()));
        assert_eq!(text.last().unwrap(), "y confirm  n cancel");
    }

    #[test]
    fn test_login_frame() {
        let mut form = LoginForm::new();
        for c in "me@x.org".chars() {
            form.edit(TextEdit::Insert(c));
        }
        form.edit(TextEdit::Next);
        form.edit(TextEdit::Insert('p'));

        let text = texts(&login_frame(&form, "http://localhost:5000/api/v1/", &ToastQueue::default()));
        assert_eq!(text[1], "Sign in to http://localhost:5000/api/v1/");
        assert_eq!(text[3], "  Email     me@x.org");
        assert_eq!(text[4], "› Password  •▏");
    }
}
