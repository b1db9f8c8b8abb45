//! End-to-end navigation through the real router, views and renderer
//!
//! Uses a mock item source and ratatui's `TestBackend`. Views spawn their
//! fetches, so every test runs inside a `LocalSet`.

use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gallery_tui::app::{Action, AppState};
use gallery_tui::runner::perform;
use gallery_tui::services::{build_router, Services};
use gallery_tui::ui;
use gallery_tui::views::Page;
use libgallery::api::mock::{sample_image, MockSource};
use libgallery::storage::MemoryStorage;
use libgallery::{Config, LinkClick, Router};
use ratatui::{backend::TestBackend, Terminal};
use tokio::task::LocalSet;

fn services() -> Services {
    let source = MockSource::with_pages(vec![vec![sample_image("1"), sample_image("2")]])
        .item(sample_image("2"));
    Services::with_parts(
        &Config::default_config(),
        Rc::new(MemoryStorage::new()),
        Rc::new(source),
    )
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn page_key(code: KeyCode) -> Action {
    Action::Page(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Render one frame and return the screen as text
fn screen(router: &mut Router<dyn Page>, state: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal
        .draw(|frame| {
            let page = router.current_view_mut().map(|page| page as &mut dyn Page);
            ui::render(frame, state, page, Instant::now());
        })
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test]
async fn test_browse_open_and_favorite() {
    LocalSet::new()
        .run_until(async {
            let services = services();
            let mut router = build_router(&services.context, &services.origin).unwrap();
            let mut state = AppState::new();

            router.start("/").await;
            settle().await;
            let text = screen(&mut router, &state);
            assert!(text.contains("Author 1"));
            assert!(text.contains("Author 2"));

            state = perform(&mut router, state, page_key(KeyCode::Enter), Instant::now()).await;
            settle().await;
            assert_eq!(state.current_path, "/image/1");
            assert!(screen(&mut router, &state).contains("Original:"));

            state = perform(&mut router, state, page_key(KeyCode::Char('f')), Instant::now()).await;
            assert!(services.context.gallery.state().is_favorite("1"));

            state = perform(
                &mut router,
                state,
                Action::FollowLink(LinkClick::primary("/favorites")),
                Instant::now(),
            )
            .await;
            settle().await;
            assert_eq!(state.current_path, "/favorites");
            let text = screen(&mut router, &state);
            assert!(text.contains("Author 1"));
            assert!(!text.contains("Author 2"));

            state = perform(&mut router, state, Action::Back, Instant::now()).await;
            assert_eq!(state.current_path, "/image/1");
        })
        .await;
}

#[tokio::test]
async fn test_external_link_shows_banner() {
    LocalSet::new()
        .run_until(async {
            let services = services();
            let mut router = build_router(&services.context, &services.origin).unwrap();
            let mut state = AppState::new();

            router.start("/image/2").await;
            settle().await;

            let now = Instant::now();
            state = perform(&mut router, state, page_key(KeyCode::Char('o')), now).await;

            assert_eq!(router.current_path(), "/image/2");
            let banner = state.visible_banner(now).unwrap();
            assert!(banner.message.contains("https://picsum.photos/id/2/300/200"));
        })
        .await;
}

#[tokio::test]
async fn test_unknown_path_renders_not_found() {
    LocalSet::new()
        .run_until(async {
            let services = services();
            let mut router = build_router(&services.context, &services.origin).unwrap();
            let state = AppState::new();

            router.start("/nowhere").await;
            assert!(screen(&mut router, &state).contains("404"));

            let state = perform(&mut router, state, page_key(KeyCode::Enter), Instant::now()).await;
            assert_eq!(state.current_path, "/");
        })
        .await;
}

#[tokio::test]
async fn test_back_at_first_entry_sets_status() {
    LocalSet::new()
        .run_until(async {
            let services = services();
            let mut router = build_router(&services.context, &services.origin).unwrap();

            router.start("/").await;
            let state = perform(&mut router, AppState::new(), Action::Back, Instant::now()).await;

            assert_eq!(state.status.message.as_deref(), Some("No earlier page"));
        })
        .await;
}
