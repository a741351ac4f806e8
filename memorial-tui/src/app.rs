//! Console state and event loop.

use std::time::Duration;
use std::time::Instant;

use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyEvent;
use futures::StreamExt;
use memorial_lib::AdminClient;
use memorial_lib::auth::AccessToken;
use memorial_lib::error::Error;
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::input;
use crate::input::GlobalAction;
use crate::login::LoginForm;
use crate::render;
use crate::screens;
use crate::screens::Notice;
use crate::screens::Screen;
use crate::screens::ScreenContext;
use crate::settings::ConsoleSettings;
use crate::settings::GRID_PAGE_SIZE;
use crate::settings::SettingsProvider;
use crate::terminal::TerminalGuard;
use crate::toast::Toast;
use crate::toast::ToastQueue;

/// How often toasts are checked for expiry.
const TICK: Duration = Duration::from_millis(250);

/// Messages from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A screen has results waiting.
    Wake,
    LoginFinished(Result<AccessToken, Error>),
}

#[derive(Debug)]
enum Mode {
    Login(LoginForm),
    Browse,
}

pub struct App {
    cx: ScreenContext,
    settings: SettingsProvider,
    screens: Vec<Box<dyn Screen>>,
    active: usize,
    mode: Mode,
    toasts: ToastQueue,
    should_quit: bool,
}

impl App {
    /// Creates the console. Starts on the login form unless a usable token
    /// is stored.
    pub async fn new(
        client: AdminClient,
        settings: SettingsProvider,
        console: &ConsoleSettings,
    ) -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (events, app_events) = mpsc::unbounded_channel();
        let mode = if client.session().is_signed_in().await {
            Mode::Browse
        } else {
            Mode::Login(LoginForm::new())
        };

        let app = Self {
            cx: ScreenContext { client, events },
            settings,
            screens: screens::all_screens(&console.language, console.page_size),
            active: 0,
            mode,
            toasts: ToastQueue::default(),
            should_quit: false,
        };
        (app, app_events)
    }

    pub fn is_browsing(&self) -> bool {
        matches!(self.mode, Mode::Browse)
    }

    pub fn active_screen(&self) -> &dyn Screen {
        self.screens[self.active].as_ref()
    }

    /// Runs until the user quits or the terminal closes.
    pub async fn run(
        mut self,
        mut app_events: mpsc::UnboundedReceiver<AppEvent>,
        terminal: &mut TerminalGuard,
    ) -> Result<(), AppError> {
        let mut terminal_events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);

        if self.is_browsing() {
            self.activate();
        }

        while !self.should_quit {
            self.draw(terminal)?;

            tokio::select! {
                event = terminal_events.next() => match event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(event) = app_events.recv() => self.handle_event(event),
                _ = tick.tick() => {
                    self.toasts.expire(Instant::now());
                }
            }
        }

        log::info!("Console closed");
        Ok(())
    }

    fn draw(&self, terminal: &mut TerminalGuard) -> Result<(), AppError> {
        let lines = match &self.mode {
            Mode::Login(form) => render::login_frame(form, self.cx.client.base_url().as_str(), &self.toasts),
            Mode::Browse => {
                let titles: Vec<&str> = self.screens.iter().map(|s| s.title()).collect();
                render::browse_frame(
                    &titles,
                    self.active,
                    &self.active_screen().view(),
                    &self.toasts,
                    terminal.width(),
                )
            }
        };
        terminal.draw(&lines)?;
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if !input::is_press(&key) {
            return;
        }
        if input::is_interrupt(&key) {
            self.should_quit = true;
            return;
        }

        if let Mode::Login(form) = &mut self.mode {
            let Some(edit) = input::text_edit(&key) else {
                return;
            };
            if let Some(credentials) = form.edit(edit) {
                log::info!("Signing in as {}", credentials.email);
                let client = self.cx.client.clone();
                let events = self.cx.events.clone();
                tokio::spawn(async move {
                    let result = client.login(&credentials.email, &credentials.password).await;
                    let _ = events.send(AppEvent::LoginFinished(result));
                });
            }
            return;
        }

        if !self.screens[self.active].captures_input() {
            if let Some(action) = input::global_action(&key) {
                self.global(action);
                return;
            }
        }

        let notices = self.screens[self.active].handle_key(&key, &self.cx);
        self.apply(notices);
    }

    fn global(&mut self, action: GlobalAction) {
        match action {
            GlobalAction::Quit => self.should_quit = true,
            GlobalAction::NextScreen => {
                self.active = (self.active + 1) % self.screens.len();
                self.activate();
            }
            GlobalAction::PreviousScreen => {
                self.active = (self.active + self.screens.len() - 1) % self.screens.len();
                self.activate();
            }
            GlobalAction::Logout => {
                log::info!("Signing out");
                let client = self.cx.client.clone();
                tokio::spawn(async move {
                    if let Err(e) = client.logout().await {
                        log::error!("Failed to clear session: {}", e);
                    }
                });
                self.show_login(LoginForm::new());
                self.toasts.push(Toast::info("Signed out"));
            }
        }
    }

    /// Opens the login form. Screens fetch again once signed in.
    fn show_login(&mut self, form: LoginForm) {
        for screen in &mut self.screens {
            screen.suspend();
        }
        self.mode = Mode::Login(form);
    }

    /// Starts the first fetch of the active screen.
    fn activate(&mut self) {
        let screen = &mut self.screens[self.active];
        if !screen.is_started() {
            let notices = screen.reload(&self.cx);
            self.apply(notices);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Wake => {
                // Results may belong to a screen that is not shown.
                for i in 0..self.screens.len() {
                    let notices = self.screens[i].poll(&self.cx);
                    self.apply(notices);
                }
            }
            AppEvent::LoginFinished(Ok(_)) => {
                log::info!("Signed in");
                self.mode = Mode::Browse;
                self.toasts.push(Toast::success("Signed in"));
                self.activate();
            }
            AppEvent::LoginFinished(Err(e)) => {
                log::warn!("Sign-in failed: {}", e);
                if let Mode::Login(form) = &mut self.mode {
                    form.fail(&e);
                }
            }
        }
    }

    fn apply(&mut self, notices: Vec<Notice>) {
        for notice in notices {
            match notice {
                Notice::Toast(toast) => self.toasts.push(toast),
                Notice::LoginRequired => {
                    if self.is_browsing() {
                        log::info!("Session ended, returning to sign-in");
                        self.show_login(LoginForm::with_error("Your session has ended. Please sign in again."));
                    }
                }
                Notice::PageSizeChanged(size) => {
                    let settings = self.settings.clone();
                    tokio::spawn(async move {
                        if let Err(e) = settings.set(GRID_PAGE_SIZE, &size).await {
                            log::error!("Failed to save page size: {}", e);
                        }
                    });
                }
            }
        }
    }
}
