//! Favorites written by one session are restored by the next
//!
//! Services are built the way `main` builds them, with file storage in a
//! temporary data directory.

use gallery_tui::services::Services;
use libgallery::Config;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::default_config();
    config.storage.path = dir.path().join("data").to_string_lossy().into_owned();
    config
}

#[test]
fn test_favorites_survive_restart() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let services = Services::new(&config).unwrap();
    services.context.gallery.toggle_favorite("7");
    services.context.gallery.toggle_favorite("3");
    services.context.gallery.toggle_favorite("3");
    drop(services);

    let restarted = Services::new(&config).unwrap();
    let state = restarted.context.gallery.state();
    assert!(state.is_favorite("7"));
    assert!(!state.is_favorite("3"));
}

#[test]
fn test_fresh_data_dir_has_no_favorites() {
    let dir = TempDir::new().unwrap();

    let services = Services::new(&config_in(&dir)).unwrap();

    assert!(services.context.gallery.state().favorites.is_empty());
    assert!(!dir.path().join("data").exists());
}
