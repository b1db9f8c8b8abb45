//! Gallery state slice
//!
//! Contains the gallery's state architecture:
//! - State: what is loaded and favorited right now
//! - Actions: what can happen
//! - Reducer: pure function (State, Action) -> State
//! - [`Gallery`]: the store for this slice plus favorites persistence
//!
//! `Gallery` is built once during bootstrap and shared by `Rc` with every
//! page that needs it.

pub mod actions;
pub mod state;

pub use actions::{reduce, GalleryAction};
pub use state::GalleryState;

use std::rc::Rc;

use crate::storage::{load_favorites, save_favorites, KeyValueStorage};
use crate::store::{Store, Subscription};
use crate::types::GalleryImage;

pub struct Gallery {
    store: Store<GalleryState>,
    storage: Rc<dyn KeyValueStorage>,
    favorites_key: String,
}

impl Gallery {
    /// Build the gallery, restoring favorites from `storage`
    pub fn new(storage: Rc<dyn KeyValueStorage>, favorites_key: &str) -> Self {
        let favorites = load_favorites(storage.as_ref(), favorites_key);
        Self {
            store: Store::new(GalleryState::with_favorites(favorites)),
            storage,
            favorites_key: favorites_key.to_string(),
        }
    }

    pub fn state(&self) -> Rc<GalleryState> {
        self.store.get_state()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&GalleryState) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn store(&self) -> &Store<GalleryState> {
        &self.store
    }

    /// Apply an action through the store
    ///
    /// Favorites are written to storage before listeners are notified.
    /// A failed write is logged; the in-memory state still changes.
    pub fn dispatch(&self, action: GalleryAction) {
        let persist = action.touches_favorites();
        self.store.set_state(|state| {
            let next = reduce(state, action);
            if persist {
                if let Err(e) = save_favorites(self.storage.as_ref(), &self.favorites_key, &next.favorites) {
                    tracing::error!("Failed to persist favorites: {}", e);
                }
            }
            next
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.dispatch(GalleryAction::SetLoading(loading));
    }

    pub fn set_error(&self, error: Option<String>) {
        self.dispatch(GalleryAction::SetError(error));
    }

    pub fn set_selected_image(&self, image_id: Option<String>) {
        self.dispatch(GalleryAction::SetSelectedImage(image_id));
    }

    pub fn add_images(&self, images: Vec<GalleryImage>) {
        self.dispatch(GalleryAction::AddImages(images));
    }

    pub fn merge_images(&self, images: Vec<GalleryImage>) {
        self.dispatch(GalleryAction::MergeImages(images));
    }

    pub fn toggle_favorite(&self, image_id: &str) {
        tracing::debug!(image_id, "Toggling favorite");
        self.dispatch(GalleryAction::ToggleFavorite(image_id.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_restores_favorites_from_storage() {
        let storage = Rc::new(MemoryStorage::with_value("favs", r#"["3","7"]"#));
        let gallery = Gallery::new(storage, "favs");

        assert!(gallery.state().is_favorite("3"));
        assert!(gallery.state().is_favorite("7"));
    }

    #[test]
    fn test_toggle_persists_before_listeners_run() {
        let storage = Rc::new(MemoryStorage::new());
        let gallery = Gallery::new(storage.clone(), "favs");

        let observed = Rc::new(std::cell::RefCell::new(None));
        let observed_in_listener = Rc::clone(&observed);
        let storage_in_listener = Rc::clone(&storage);
        let _subscription = gallery.subscribe(move |_| {
            *observed_in_listener.borrow_mut() = storage_in_listener.raw("favs");
        });

        gallery.toggle_favorite("5");

        assert_eq!(observed.borrow().as_deref(), Some(r#"["5"]"#));
    }

    #[test]
    fn test_failed_write_still_updates_state() {
        let gallery = Gallery::new(Rc::new(MemoryStorage::read_only()), "favs");
        gallery.toggle_favorite("1");

        assert!(gallery.state().is_favorite("1"));
    }
}
