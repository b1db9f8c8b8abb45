//! Test keybinding mappings to actions
//!
//! Verifies that keyboard input is mapped to the right actions and that the
//! reducer applies the shell-level ones.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gallery_tui::app::{reduce, Action, AppState};
use gallery_tui::map_key;

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn test_q_quits_application() {
    let state = AppState::new();
    let key = key_event(KeyCode::Char('q'), KeyModifiers::NONE);

    let new_state = reduce(state, Action::Key(key));

    assert!(new_state.should_quit);
}

#[test]
fn test_ctrl_c_quits_application() {
    let state = AppState::new();
    let key = key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);

    assert!(reduce(state, Action::Key(key)).should_quit);
}

#[test]
fn test_f1_toggles_help() {
    let state = AppState::new();
    assert!(!state.help_visible);

    let key = key_event(KeyCode::F(1), KeyModifiers::NONE);
    let state = reduce(state, Action::Key(key));
    assert!(state.help_visible);

    let state = reduce(state, Action::Key(key));
    assert!(!state.help_visible);
}

#[test]
fn test_any_key_closes_help() {
    let state = reduce(AppState::new(), Action::ShowHelp);
    let key = key_event(KeyCode::Char('j'), KeyModifiers::NONE);

    assert!(matches!(map_key(&state, key), Action::HideHelp));
}

#[test]
fn test_number_keys_follow_header_links() {
    let state = AppState::new();

    match map_key(&state, key_event(KeyCode::Char('2'), KeyModifiers::NONE)) {
        Action::FollowLink(click) => assert_eq!(click.href, "/favorites"),
        other => panic!("Expected FollowLink, got {:?}", other),
    }
    match map_key(&state, key_event(KeyCode::Char('1'), KeyModifiers::NONE)) {
        Action::FollowLink(click) => assert_eq!(click.href, "/"),
        other => panic!("Expected FollowLink, got {:?}", other),
    }
}

#[test]
fn test_arrows_move_through_history() {
    let state = AppState::new();

    assert!(matches!(
        map_key(&state, key_event(KeyCode::Left, KeyModifiers::NONE)),
        Action::Back
    ));
    assert!(matches!(
        map_key(&state, key_event(KeyCode::Right, KeyModifiers::NONE)),
        Action::Forward
    ));
}

#[test]
fn test_page_keys_are_forwarded() {
    let state = AppState::new();

    for code in [KeyCode::Enter, KeyCode::Down, KeyCode::Char('f'), KeyCode::Esc] {
        assert!(matches!(
            map_key(&state, key_event(code, KeyModifiers::NONE)),
            Action::Page(_)
        ));
    }
}

#[test]
fn test_esc_dismisses_banners_first() {
    let state = reduce(
        AppState::new(),
        Action::ShowBanner {
            message: "Failed to load images. Please try again.".to_string(),
            at: Instant::now(),
        },
    );
    let key = key_event(KeyCode::Esc, KeyModifiers::NONE);

    let state = reduce(state, Action::Key(key));
    assert!(state.banners.is_empty());
}

#[test]
fn test_routed_updates_path_and_clears_status() {
    let state = reduce(AppState::new(), Action::SetStatus("Retrying...".to_string()));
    let state = reduce(state, Action::Routed("/favorites".to_string()));

    assert_eq!(state.current_path, "/favorites");
    assert!(state.status.message.is_none());
}
