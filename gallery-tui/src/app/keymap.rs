//! Keybindings
//!
//! Global keys are resolved here; everything else goes to the mounted page.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libgallery::LinkClick;

use super::actions::Action;
use super::state::AppState;

/// Header links, in display order: (label, path, shortcut)
pub const NAV_LINKS: [(&str, &str, char); 2] = [("Gallery", "/", '1'), ("Favorites", "/favorites", '2')];

/// Map a key press to the action it means in `state`
pub fn map_key(state: &AppState, key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Action::Quit,
        (KeyCode::F(1), _) => {
            return if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
        }
        _ => {}
    }

    if state.help_visible {
        return Action::HideHelp;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) if !state.banners.is_empty() => Action::DismissBanner,
        (KeyCode::Char(c), KeyModifiers::NONE) => match nav_link(c) {
            Some(path) => Action::FollowLink(LinkClick::primary(path)),
            None => Action::Page(key),
        },
        (KeyCode::Left, _) | (KeyCode::Backspace, _) => Action::Back,
        (KeyCode::Right, _) => Action::Forward,
        _ => Action::Page(key),
    }
}

fn nav_link(shortcut: char) -> Option<&'static str> {
    NAV_LINKS
        .iter()
        .find(|(_, _, key)| *key == shortcut)
        .map(|(_, path, _)| *path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_link_lookup() {
        assert_eq!(nav_link('1'), Some("/"));
        assert_eq!(nav_link('2'), Some("/favorites"));
        assert_eq!(nav_link('3'), None);
    }
}
