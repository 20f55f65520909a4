//! # usermgmt
//!
//! Administration of user records: a REST backend, an HTTP client for it,
//! and an interactive console that lists, creates, edits and deletes users.
//!
//! ## Screen model
//!
//! The console is driven by a single controller in one of four modes:
//! `view` (paged list with a selected row), `new`, `edit` and `delete`.
//! The form is shown in every mode except `view`; in `delete` it is
//! read-only and the submit button deletes the user.
//!
//! ## Validation
//!
//! Names must be 2 to 50 characters and emails must match a simple
//! `local@domain.tld` pattern. Fields are checked while typing and again
//! on submit; the server repeats the checks and owns email uniqueness.
//!
//! ## Storage
//!
//! The server persists to PostgreSQL when a DSN is given, otherwise it
//! keeps users in memory for the lifetime of the process.

pub mod api;
pub mod cli;
pub mod client;
pub mod console;
pub mod users;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
