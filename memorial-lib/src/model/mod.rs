//! Entities exposed by the admin API

mod admin;
mod advertisement;
mod country;
mod faq;
mod localized;
mod package;
mod resource;
mod tribute;
mod user;

pub use admin::*;
pub use advertisement::*;
pub use country::*;
pub use faq::*;
pub use localized::*;
pub use package::*;
pub use resource::*;
pub use tribute::*;
pub use user::*;

pub(crate) fn default_true() -> bool {
    true
}
