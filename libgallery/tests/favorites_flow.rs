//! Integration tests for favorites reconciliation across pages

use std::rc::Rc;

use libgallery::api::mock::{sample_image, MockSource};
use libgallery::pages::{FavoritesController, FavoritesOutcome, HomeController, LoadOutcome, PageContext};
use libgallery::storage::{FileStorage, KeyValueStorage};
use libgallery::{Gallery, Store, Viewport};
use tempfile::TempDir;

fn setup(dir: &TempDir, source: MockSource) -> PageContext {
    let storage = Rc::new(FileStorage::new(dir.path()));
    PageContext {
        gallery: Rc::new(Gallery::new(storage, "gallery-favorites")),
        source: Rc::new(source),
        viewport: Rc::new(Store::new(Viewport::default())),
        page_size: 10,
        scroll_threshold: 3,
    }
}

#[tokio::test]
async fn test_favorites_from_previous_session_are_fetched_by_id() {
    let dir = TempDir::new().unwrap();
    FileStorage::new(dir.path())
        .set("gallery-favorites", r#"["1","9"]"#)
        .unwrap();

    let source = MockSource::with_pages(vec![vec![sample_image("1"), sample_image("2")]])
        .item(sample_image("9"));
    let context = setup(&dir, source);

    let home = HomeController::new(&context);
    assert_eq!(home.load_images().await, LoadOutcome::Loaded(2));
    home.teardown();

    let favorites = FavoritesController::new(&context);
    assert_eq!(
        favorites.load_favorites().await,
        FavoritesOutcome::Loaded { shown: 2, failed: 0 }
    );

    let ids: Vec<String> = favorites.images().into_iter().map(|image| image.id).collect();
    assert_eq!(ids, vec!["1".to_string(), "9".to_string()]);
    assert!(favorites.images().iter().all(|image| image.is_favorite));
    assert_eq!(context.gallery.state().current_page, 2);
}

#[tokio::test]
async fn test_unfavorite_from_favorites_page_persists() {
    let dir = TempDir::new().unwrap();
    let context = setup(&dir, MockSource::new().item(sample_image("5")));
    context.gallery.toggle_favorite("5");

    let favorites = FavoritesController::new(&context);
    favorites.load_favorites().await;
    assert_eq!(favorites.images().len(), 1);

    favorites.toggle_favorite("5");
    assert!(favorites.images().is_empty());
    assert_eq!(
        FileStorage::new(dir.path()).get("gallery-favorites").unwrap().as_deref(),
        Some("[]")
    );
}

#[tokio::test]
async fn test_unreachable_favorites_report_unavailable() {
    let dir = TempDir::new().unwrap();
    let context = setup(&dir, MockSource::new().fail_id("3"));
    context.gallery.toggle_favorite("3");

    let favorites = FavoritesController::new(&context);
    assert_eq!(
        favorites.load_favorites().await,
        FavoritesOutcome::Unavailable { failed: 1 }
    );
    assert!(context.gallery.state().error.is_some());
    assert!(!context.gallery.state().loading);
}
