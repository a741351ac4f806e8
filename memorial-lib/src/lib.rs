//! Memorial admin API client library
//!
//! An async client for the obituary and memorial back office REST API. Every
//! call is authorized with the bearer token held by an injected [`auth::Session`].
//!
//! # Example
//!
//! ```ignore
//! use memorial_lib::AdminClient;
//! use memorial_lib::api::ListQuery;
//! use memorial_lib::auth::Session;
//! use memorial_lib::model::Faq;
//!
//! let session = Session::in_memory();
//! let client = AdminClient::builder()
//!     .url("https://api.example.com/api/v1")
//!     .session(session)
//!     .build()?;
//!
//! client.login("admin@example.com", "secret").await?;
//! let page = client.list::<Faq>(ListQuery::new(1, 10)).await?;
//! ```

pub mod api;
pub mod auth;
pub mod error;
pub mod model;

mod client;

pub use client::*;
