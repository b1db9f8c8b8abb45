//! Actions for the reducer pattern
//!
//! Actions describe what should happen. The reducer applies the part that
//! concerns the shell state; the event loop performs the side effects
//! (routing, forwarding keys to the mounted page).

use std::time::Instant;

use crossterm::event::KeyEvent;
use libgallery::LinkClick;

#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Raw keyboard input, resolved through the keymap
    Key(KeyEvent),

    /// Periodic tick; expires banners
    Tick(Instant),

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Activate a link; in-app links navigate, others are reported
    FollowLink(LinkClick),

    /// History back
    Back,

    /// History forward
    Forward,

    /// The router mounted a page at this path
    Routed(String),

    /// Key meant for the mounted page
    Page(KeyEvent),

    /// Quit the application
    Quit,

    ShowHelp,
    HideHelp,

    // === Banners ===
    /// Show a transient message from `at`
    ShowBanner { message: String, at: Instant },

    /// Drop every banner
    DismissBanner,

    // === Status Bar ===
    SetStatus(String),
    ClearStatus,
}
