//! Error types for gallery-tui
//!
//! Wraps core library errors and terminal/IO errors so the event loop can
//! propagate both with `?`.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Core library error
    #[error("Gallery error: {0}")]
    Gallery(#[from] libgallery::GalleryError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Application state error
    #[error("Application error: {0}")]
    Application(String),
}

impl TuiError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Gallery(e) => e.exit_code(),
            TuiError::Terminal(_) | TuiError::Application(_) => 1,
        }
    }
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
