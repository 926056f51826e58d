//! Ratatui front-end. The `App` owns the session's [`crate::Library`] and only
//! talks to it through the store's methods; everything in here is about
//! turning key presses into those calls and rendering the results.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
