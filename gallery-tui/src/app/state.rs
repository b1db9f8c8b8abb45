//! Application state
//!
//! Immutable state structure; all transitions happen through the reducer
//! (see `reducer.rs`).

use std::time::{Duration, Instant};

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Path of the mounted page, for header highlighting
    pub current_path: String,

    /// Transient messages, oldest first
    pub banners: Vec<Banner>,

    /// How long a banner stays up
    pub banner_ttl: Duration,

    pub status: StatusBarState,

    pub config: UiConfig,
}

/// Message shown over the page until it expires or is dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Use unicode symbols (false = ASCII fallback)
    pub unicode_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled =
            std::env::var("NO_COLOR").is_err() && std::env::var("GALLERY_TUI_NO_COLOR").is_err();

        let unicode_enabled = colors_enabled;

        let tick_rate_ms = std::env::var("GALLERY_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            unicode_enabled,
            tick_rate_ms,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            help_visible: false,
            current_path: "/".to_string(),
            banners: Vec::new(),
            banner_ttl: Duration::from_secs(3),
            status: StatusBarState::default(),
            config: UiConfig::default(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_banner_ttl(banner_ttl: Duration) -> Self {
        Self {
            banner_ttl,
            ..Self::default()
        }
    }

    /// Newest banner still visible at `now`
    pub fn visible_banner(&self, now: Instant) -> Option<&Banner> {
        self.banners.iter().rev().find(|banner| banner.expires_at > now)
    }
}
