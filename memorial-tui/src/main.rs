mod app;
mod error;
mod input;
mod login;
mod paths;
mod render;
mod screens;
mod settings;
mod terminal;
mod text;
mod toast;
mod tokens;

use std::fs::{self, File};

use memorial_lib::AdminClient;
use memorial_lib::auth::Session;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::error::AppError;
use crate::settings::{API_URL_ENV, ConsoleSettings, SettingsProvider, SqliteBackend};
use crate::terminal::TerminalGuard;
use crate::tokens::SqliteTokenStore;

#[tokio::main]
async fn main() {
    paths::rotate_logs();
    init_logging();

    if let Err(e) = run().await {
        log::error!("Console failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs to `latest.log` in the cache directory. Logging is skipped when the
/// file cannot be created.
fn init_logging() {
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

async fn run() -> Result<(), AppError> {
    let data_dir = paths::data_dir().ok_or(AppError::NoProjectDir("data"))?;
    fs::create_dir_all(&data_dir)?;

    let settings_db = paths::settings_db().ok_or(AppError::NoProjectDir("data"))?;
    let settings = SettingsProvider::new(SqliteBackend::new(settings_db).await?);
    let console = ConsoleSettings::load(&settings, std::env::var(API_URL_ENV).ok()).await?;

    let tokens_db = paths::tokens_db().ok_or(AppError::NoProjectDir("data"))?;
    let session = Session::new(SqliteTokenStore::new(tokens_db).await?);

    let client = AdminClient::builder()
        .url(console.api_base_url.clone())
        .session(session)
        .build()?;
    log::info!(
        "Starting console against {} (page size {}, language {})",
        client.base_url(),
        console.page_size,
        console.language
    );

    let (app, app_events) = App::new(client, settings, &console).await;
    let mut terminal = TerminalGuard::new()?;
    app.run(app_events, &mut terminal).await
}
