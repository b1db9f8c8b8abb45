//! gallery-tui library
//!
//! Exports the application shell, views and widgets for testing.

pub mod app;
pub mod error;
pub mod runner;
pub mod services;
pub mod terminal;
pub mod ui;
pub mod views;

// Re-export commonly used types
pub use app::{keymap::map_key, reduce, Action, AppState};
pub use error::{Result, TuiError};
