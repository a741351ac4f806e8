//! Console error type.

use thiserror::Error;

use crate::settings::SettingsError;
use crate::tokens::TokenStoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("token store: {0}")]
    TokenStore(#[from] TokenStoreError),

    #[error(transparent)]
    Client(#[from] memorial_lib::error::Error),

    #[error("could not determine the {0} directory")]
    NoProjectDir(&'static str),
}
