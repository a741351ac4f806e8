//! Authentication

mod login;
mod session;
mod token;

pub use login::Credentials;
pub use session::MemoryTokenStore;
pub use session::Session;
pub use session::TokenStore;
pub use token::AccessToken;
