//! Application module
//!
//! Contains the shell around the mounted page:
//! - Actions: what can happen
//! - State: what is true right now (help, banners, status, current path)
//! - Reducer: pure function (State, Action) -> State
//! - Keymap: which action a key press means
//!
//! Page content lives in the core library's stores and is rendered by the
//! views; this state only covers the chrome around it.

pub mod actions;
pub mod event;
pub mod keymap;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::reduce;
pub use state::{AppState, Banner, StatusBarState, UiConfig};
