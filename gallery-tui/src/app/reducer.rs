//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State` with no side effects. Routing and page input
//! are performed by the event loop after the reducer has run.

use super::actions::Action;
use super::keymap::map_key;
use super::state::{AppState, Banner, StatusBarState};

/// Banners kept at once; older ones are dropped first
pub const MAX_BANNERS: usize = 3;

/// Pure reducer function
///
/// # Purity Guarantees
///
/// - No network requests
/// - No file I/O
/// - No mutations (returns new state)
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => {
            let action = map_key(&state, key);
            reduce(state, action)
        }

        Action::Tick(now) => {
            if state.banners.iter().all(|banner| banner.expires_at > now) {
                return state;
            }
            AppState {
                banners: state
                    .banners
                    .into_iter()
                    .filter(|banner| banner.expires_at > now)
                    .collect(),
                ..state
            }
        }

        Action::Resize(_, _) => state,

        // === Navigation (performed by the event loop) ===
        Action::FollowLink(_) | Action::Back | Action::Forward | Action::Page(_) => state,

        Action::Routed(path) => AppState {
            current_path: path,
            status: StatusBarState::default(),
            ..state
        },

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Banners ===
        Action::ShowBanner { message, at } => {
            let mut banners = state.banners;
            banners.push(Banner {
                message,
                expires_at: at + state.banner_ttl,
            });
            if banners.len() > MAX_BANNERS {
                let excess = banners.len() - MAX_BANNERS;
                banners.drain(..excess);
            }
            AppState { banners, ..state }
        }

        Action::DismissBanner => AppState {
            banners: Vec::new(),
            ..state
        },

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState::default(),
            ..state
        },
    }
}
