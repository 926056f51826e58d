//! Core library surface for the Personal Library TUI application.
//!
//! The store (`library`) and its data types (`models`, `error`) have no
//! terminal dependencies and can be driven directly; `ui` is the ratatui
//! front-end that owns one [`Library`] for the length of a session.
pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod ui;

pub use error::LibraryError;
pub use library::Library;
pub use models::{
    Book, BookField, BookId, LibraryStats, NewBook, SearchField, MAX_YEAR, MIN_YEAR,
};

/// The interactive application entry point and session state.
pub use ui::{run_app, App};
