//! List screens.
//!
//! Every entity gets the same screen: a [`DataGrid`] over one fetched page,
//! with the page number and page size owned here and fetches run on the
//! tokio runtime. Per-entity files only describe how an API record becomes a
//! grid row and which columns to show.

mod admins;
mod advertisements;
mod countries;
mod faqs;
mod packages;
mod tributes;
mod users;

pub use admins::Admins;
pub use advertisements::Advertisements;
pub use countries::Countries;
pub use faqs::Faqs;
pub use packages::Packages;
pub use tributes::Tributes;
pub use users::Users;

use chrono::DateTime;
use chrono::Utc;
use crossterm::event::KeyEvent;
use memorial_grid::Column;
use memorial_grid::DataGrid;
use memorial_grid::FilterValue;
use memorial_grid::GridEvent;
use memorial_grid::GridView;
use memorial_grid::PageInfo;
use memorial_grid::Record;
use memorial_grid::SearchKey;
use memorial_lib::AdminClient;
use memorial_lib::api::ListQuery;
use memorial_lib::api::Page;
use memorial_lib::error::Error;
use memorial_lib::model::Resource;
use tokio::sync::mpsc;

use crate::app::AppEvent;
use crate::input;
use crate::input::BrowseAction;
use crate::input::Confirm;
use crate::input::TextEdit;
use crate::toast::Toast;

// =============================================================================
// Per-entity description
// =============================================================================

/// Describes one entity's list screen.
pub trait Listing: Send + 'static {
    type Entity: Resource;
    /// Flat row shown in the grid.
    type Row: Record + Send + Sync + 'static;

    const TITLE: &'static str;
    /// Singular noun used in prompts and messages.
    const NOUN: &'static str;

    /// Maps an API record to a row, picking translations for `lang`.
    fn row(entity: &Self::Entity, lang: &str) -> Self::Row;

    fn row_id(row: &Self::Row) -> &str;

    /// Short description of a row for the delete prompt.
    fn row_label(row: &Self::Row) -> String;

    fn columns() -> Vec<Column<Self::Row>>;

    fn search_key() -> SearchKey;

    fn search_placeholder() -> &'static str;
}

// =============================================================================
// Screen plumbing
// =============================================================================

/// What a screen reports back to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Toast(Toast),
    /// The session is missing or expired.
    LoginRequired,
    /// The user picked a new page size.
    PageSizeChanged(u32),
}

/// Work a screen asks for after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { request_id: u64, query: ListQuery },
    Delete { id: String },
    Notice(Notice),
}

impl Effect {
    fn toast(toast: Toast) -> Self {
        Self::Notice(Notice::Toast(toast))
    }
}

/// Result of a background request, sent back to the screen that made it.
#[derive(Debug)]
pub enum Outcome<R> {
    Loaded {
        request_id: u64,
        result: Result<Page<R>, Error>,
    },
    Deleted {
        id: String,
        result: Result<(), Error>,
    },
}

/// Shared handles screens spawn requests with.
#[derive(Clone)]
pub struct ScreenContext {
    pub client: AdminClient,
    pub events: mpsc::UnboundedSender<AppEvent>,
}

/// Everything needed to draw a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub title: &'static str,
    pub grid: GridView,
    /// Highlighted body row, if the body has rows.
    pub cursor: Option<usize>,
    pub focused_column: usize,
    pub loading: bool,
    pub editing_search: bool,
    /// Delete prompt awaiting `y`/`n`.
    pub confirm: Option<String>,
}

/// A screen the console can route to.
pub trait Screen: Send {
    fn title(&self) -> &'static str;

    fn view(&self) -> ScreenView;

    /// Returns `true` while the screen needs every key (search input or a
    /// pending prompt).
    fn captures_input(&self) -> bool;

    /// Returns `true` once a first fetch has been requested.
    fn is_started(&self) -> bool;

    fn handle_key(&mut self, key: &KeyEvent, cx: &ScreenContext) -> Vec<Notice>;

    /// Refetches the current page.
    fn reload(&mut self, cx: &ScreenContext) -> Vec<Notice>;

    /// Applies finished background requests.
    fn poll(&mut self, cx: &ScreenContext) -> Vec<Notice>;

    /// Drops in-flight requests and prompts. The next activation fetches
    /// again.
    fn suspend(&mut self);
}

/// Formats a timestamp as `YYYY-MM-DD`, which also sorts as text.
fn format_date(date: Option<DateTime<Utc>>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Builds the seven entity screens in tab order.
pub fn all_screens(language: &str, page_size: u32) -> Vec<Box<dyn Screen>> {
    vec![
        Box::new(ListScreen::<Tributes>::new(language, page_size)),
        Box::new(ListScreen::<Users>::new(language, page_size)),
        Box::new(ListScreen::<Admins>::new(language, page_size)),
        Box::new(ListScreen::<Packages>::new(language, page_size)),
        Box::new(ListScreen::<Advertisements>::new(language, page_size)),
        Box::new(ListScreen::<Countries>::new(language, page_size)),
        Box::new(ListScreen::<Faqs>::new(language, page_size)),
    ]
}

// =============================================================================
// Generic list screen
// =============================================================================

#[derive(Debug, Clone)]
struct PendingDelete {
    id: String,
    label: String,
}

/// A paginated list of one entity.
pub struct ListScreen<L: Listing> {
    grid: DataGrid<L::Row>,
    language: String,
    current_page: u32,
    loading: bool,
    started: bool,
    cursor: usize,
    focused_column: usize,
    editing_search: bool,
    pending_delete: Option<PendingDelete>,
    next_request_id: u64,
    latest_request_id: Option<u64>,
    outcomes_tx: mpsc::UnboundedSender<Outcome<L::Row>>,
    outcomes_rx: mpsc::UnboundedReceiver<Outcome<L::Row>>,
}

impl<L: Listing> ListScreen<L> {
    pub fn new(language: &str, page_size: u32) -> Self {
        let mut grid = DataGrid::new(L::columns())
            .with_search_key(L::search_key())
            .with_search_placeholder(L::search_placeholder());
        if let Err(e) = grid.set_page_size(page_size) {
            log::warn!("{}: keeping default page size: {}", L::TITLE, e);
        }

        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            grid,
            language: language.to_string(),
            current_page: 1,
            loading: false,
            started: false,
            cursor: 0,
            focused_column: 0,
            editing_search: false,
            pending_delete: None,
            next_request_id: 0,
            latest_request_id: None,
            outcomes_tx,
            outcomes_rx,
        }
    }

    pub fn grid(&self) -> &DataGrid<L::Row> {
        &self.grid
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Requests `page` with the current page size. The current page only
    /// moves once the response arrives.
    pub fn fetch(&mut self, page: u32) -> Effect {
        self.next_request_id += 1;
        self.latest_request_id = Some(self.next_request_id);
        self.loading = true;
        self.started = true;
        Effect::Fetch {
            request_id: self.next_request_id,
            query: ListQuery::new(page, self.grid.page_size()),
        }
    }

    /// Routes a key to the active mode.
    pub fn key(&mut self, key: &KeyEvent) -> Vec<Effect> {
        if self.pending_delete.is_some() {
            return input::confirm(key)
                .map(|answer| self.answer_delete(answer))
                .unwrap_or_default();
        }
        if self.editing_search {
            if let Some(edit) = input::text_edit(key) {
                self.edit_search(edit);
            }
            return Vec::new();
        }
        input::browse_action(key)
            .map(|action| self.update(action))
            .unwrap_or_default()
    }

    pub fn update(&mut self, action: BrowseAction) -> Vec<Effect> {
        match action {
            BrowseAction::FocusLeft => {
                self.focused_column = self.focused_column.saturating_sub(1);
                Vec::new()
            }
            BrowseAction::FocusRight => {
                let last = self.grid.columns().len().saturating_sub(1);
                self.focused_column = (self.focused_column + 1).min(last);
                Vec::new()
            }
            BrowseAction::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                Vec::new()
            }
            BrowseAction::CursorDown => {
                let last = self.grid.visible_indices().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
                Vec::new()
            }
            BrowseAction::ToggleSort => {
                let Some(id) = self.focused_column_id() else {
                    return Vec::new();
                };
                if self.grid.toggle_sort(&id).is_none() {
                    return vec![Effect::toast(Toast::info(format!(
                        "{} cannot be sorted",
                        self.focused_column_title()
                    )))];
                }
                self.cursor = 0;
                Vec::new()
            }
            BrowseAction::CycleFacet => self.cycle_facet(),
            BrowseAction::ClearFilters => {
                self.grid.reset();
                self.cursor = 0;
                Vec::new()
            }
            BrowseAction::StartSearch => {
                self.editing_search = true;
                Vec::new()
            }
            BrowseAction::NextPage => {
                let events = self.grid.next_page();
                self.apply_grid_events(events)
            }
            BrowseAction::PreviousPage => {
                let events = self.grid.previous_page();
                self.apply_grid_events(events)
            }
            BrowseAction::JumpToButton(n) => {
                let Some(pager) = self.grid.view().pager else {
                    return Vec::new();
                };
                let Some(button) = pager.buttons.get(n.saturating_sub(1)) else {
                    return Vec::new();
                };
                if button.active {
                    return Vec::new();
                }
                let events = self.grid.go_to_page(button.page);
                self.apply_grid_events(events)
            }
            BrowseAction::PageSizeUp => self.step_page_size(true),
            BrowseAction::PageSizeDown => self.step_page_size(false),
            BrowseAction::Delete => {
                if let Some(row) = self.selected_row() {
                    self.pending_delete = Some(PendingDelete {
                        id: L::row_id(row).to_string(),
                        label: L::row_label(row),
                    });
                }
                Vec::new()
            }
            BrowseAction::Reload => vec![self.fetch(self.current_page)],
        }
    }

    /// Edits the search input. Searching filters the loaded page only.
    pub fn edit_search(&mut self, edit: TextEdit) {
        let mut text = self.grid.search_text().to_string();
        match edit {
            TextEdit::Insert(c) => text.push(c),
            TextEdit::Backspace => {
                text.pop();
            }
            TextEdit::Submit | TextEdit::Next => {
                self.editing_search = false;
                return;
            }
            TextEdit::Cancel => {
                text.clear();
                self.editing_search = false;
            }
        }
        self.grid.set_search(&text);
        self.cursor = 0;
    }

    pub fn answer_delete(&mut self, answer: Confirm) -> Vec<Effect> {
        let Some(pending) = self.pending_delete.take() else {
            return Vec::new();
        };
        match answer {
            Confirm::Yes => vec![Effect::Delete { id: pending.id }],
            Confirm::No => Vec::new(),
        }
    }

    /// Applies a finished request.
    ///
    /// Responses to anything but the latest fetch are dropped. Failures keep
    /// the rows already on screen.
    pub fn apply_outcome(&mut self, outcome: Outcome<L::Row>) -> Vec<Effect> {
        match outcome {
            Outcome::Loaded { request_id, result } => {
                if self.latest_request_id != Some(request_id) {
                    log::debug!("{}: dropping stale response {}", L::TITLE, request_id);
                    return Vec::new();
                }
                self.loading = false;
                match result {
                    Ok(page) => {
                        let p = page.pagination;
                        self.current_page = p.current_page.max(1);
                        self.grid.set_rows(page.items);
                        self.grid
                            .set_page_info(PageInfo::new(p.current_page, p.total_pages, p.total_items));
                        let last = self.grid.visible_indices().len().saturating_sub(1);
                        self.cursor = self.cursor.min(last);
                        Vec::new()
                    }
                    Err(e) => vec![self.failure("Loading", e)],
                }
            }
            Outcome::Deleted { id, result } => match result {
                Ok(()) => vec![
                    Effect::toast(Toast::success(format!("Deleted {}", L::NOUN))),
                    self.fetch(self.current_page),
                ],
                Err(e) => {
                    log::warn!("{}: delete {} failed", L::TITLE, id);
                    vec![self.failure("Delete", e)]
                }
            },
        }
    }

    fn failure(&self, what: &str, err: Error) -> Effect {
        if err.requires_login() {
            log::info!("{}: {}", L::TITLE, err);
            return Effect::Notice(Notice::LoginRequired);
        }
        log::error!("{}: {} failed: {}", L::TITLE, what, err);
        Effect::toast(Toast::error(format!("{} {} failed: {}", what, L::TITLE.to_lowercase(), err)))
    }

    fn apply_grid_events(&mut self, events: Vec<GridEvent>) -> Vec<Effect> {
        let mut effects = Vec::new();
        for event in events {
            match event {
                GridEvent::PageSizeChange(size) => match self.grid.set_page_size(size) {
                    Ok(()) => effects.push(Effect::Notice(Notice::PageSizeChanged(size))),
                    Err(e) => effects.push(Effect::toast(Toast::error(e.to_string()))),
                },
                GridEvent::PageChange(page) => {
                    self.cursor = 0;
                    effects.push(self.fetch(page));
                }
            }
        }
        effects
    }

    fn step_page_size(&mut self, up: bool) -> Vec<Effect> {
        let current = self.grid.page_size();
        let options = self.grid.page_size_options();
        let next = if up {
            options.iter().copied().find(|&size| size > current)
        } else {
            options.iter().rev().copied().find(|&size| size < current)
        };
        let Some(next) = next else {
            return Vec::new();
        };
        match self.grid.change_page_size(next) {
            Ok(events) => self.apply_grid_events(events),
            Err(e) => vec![Effect::toast(Toast::error(e.to_string()))],
        }
    }

    /// Cycles the focused column's facet filter: none, each option in turn,
    /// then none again.
    fn cycle_facet(&mut self) -> Vec<Effect> {
        let Some(column) = self.grid.columns().get(self.focused_column) else {
            return Vec::new();
        };
        let Some(options) = column.facet_options() else {
            return vec![Effect::toast(Toast::info(format!(
                "{} has no filter options",
                column.title()
            )))];
        };
        let id = column.id().to_string();
        let options = options.to_vec();

        let current = match self.grid.column_filters().get(&id) {
            Some(FilterValue::Facets(selected)) => selected.first().cloned(),
            _ => None,
        };
        let next = match current {
            None => options.first().cloned(),
            Some(current) => options
                .iter()
                .position(|option| *option == current)
                .and_then(|i| options.get(i + 1))
                .cloned(),
        };

        self.grid.clear_column_filter(&id);
        if let Some(option) = next {
            if let Err(e) = self.grid.toggle_facet(&id, &option) {
                return vec![Effect::toast(Toast::error(e.to_string()))];
            }
        }
        self.cursor = 0;
        Vec::new()
    }

    fn focused_column_id(&self) -> Option<String> {
        self.grid
            .columns()
            .get(self.focused_column)
            .map(|c| c.id().to_string())
    }

    fn focused_column_title(&self) -> String {
        self.grid
            .columns()
            .get(self.focused_column)
            .map(|c| c.title().to_string())
            .unwrap_or_default()
    }

    fn selected_row(&self) -> Option<&L::Row> {
        self.grid.visible_rows().get(self.cursor).copied()
    }

    /// Runs effects: requests go to the runtime, notices go to the caller.
    fn run(&mut self, effects: Vec<Effect>, cx: &ScreenContext) -> Vec<Notice> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::Fetch { request_id, query } => self.spawn_fetch(request_id, query, cx),
                Effect::Delete { id } => self.spawn_delete(id, cx),
                Effect::Notice(notice) => notices.push(notice),
            }
        }
        notices
    }

    fn spawn_fetch(&self, request_id: u64, query: ListQuery, cx: &ScreenContext) {
        log::debug!(
            "{}: fetching page {} ({} per page), request {}",
            L::TITLE,
            query.page,
            query.limit,
            request_id
        );
        let client = cx.client.clone();
        let events = cx.events.clone();
        let outcomes = self.outcomes_tx.clone();
        let language = self.language.clone();
        tokio::spawn(async move {
            let result = client
                .list::<L::Entity>(query)
                .await
                .map(|page| page.map(|entity| L::row(&entity, &language)));
            let _ = outcomes.send(Outcome::Loaded { request_id, result });
            let _ = events.send(AppEvent::Wake);
        });
    }

    fn spawn_delete(&self, id: String, cx: &ScreenContext) {
        log::info!("{}: deleting {}", L::TITLE, id);
        let client = cx.client.clone();
        let events = cx.events.clone();
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = client.delete::<L::Entity>(&id).await;
            let _ = outcomes.send(Outcome::Deleted { id, result });
            let _ = events.send(AppEvent::Wake);
        });
    }
}

impl<L: Listing> Screen for ListScreen<L> {
    fn title(&self) -> &'static str {
        L::TITLE
    }

    fn view(&self) -> ScreenView {
        let grid = self.grid.view();
        let cursor = (!grid.is_empty()).then_some(self.cursor);
        ScreenView {
            title: L::TITLE,
            grid,
            cursor,
            focused_column: self.focused_column,
            loading: self.loading,
            editing_search: self.editing_search,
            confirm: self
                .pending_delete
                .as_ref()
                .map(|p| format!("Delete {} {}? (y/n)", L::NOUN, p.label)),
        }
    }

    fn captures_input(&self) -> bool {
        self.editing_search || self.pending_delete.is_some()
    }

    fn is_started(&self) -> bool {
        self.started
    }

    fn handle_key(&mut self, key: &KeyEvent, cx: &ScreenContext) -> Vec<Notice> {
        let effects = self.key(key);
        self.run(effects, cx)
    }

    fn reload(&mut self, cx: &ScreenContext) -> Vec<Notice> {
        let effect = self.fetch(self.current_page);
        self.run(vec![effect], cx)
    }

    fn poll(&mut self, cx: &ScreenContext) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            let effects = self.apply_outcome(outcome);
            notices.extend(self.run(effects, cx));
        }
        notices
    }

    fn suspend(&mut self) {
        self.started = false;
        self.loading = false;
        self.latest_request_id = None;
        self.pending_delete = None;
        self.editing_search = false;
    }
}
