//! REST API operations

mod crud;
mod page;
mod request;

pub use page::*;

pub(crate) use request::read_json;
