//! Favorites page
//!
//! Shows favorites that are already loaded right away, then fetches the rest
//! by id. Which favorites are listed always comes from the gallery state, so
//! an unfavorited card disappears on the next frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::home::fetch_favorites;
use super::{Liveness, PageContext, Revision};
use crate::api::ItemSource;
use crate::gallery::Gallery;
use crate::store::Subscription;
use crate::types::GalleryImage;

/// Terminal state of one favorites load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesOutcome {
    /// A load was already in flight
    Skipped,
    /// There are no favorites at all
    Empty,
    /// `shown` favorites are available; `failed` ids could not be fetched
    Loaded { shown: usize, failed: usize },
    /// Favorites exist but none could be loaded
    Unavailable { failed: usize },
}

pub struct FavoritesController {
    gallery: Rc<Gallery>,
    source: Rc<dyn ItemSource>,
    loading: Cell<bool>,
    outcome: Cell<Option<FavoritesOutcome>>,
    liveness: Liveness,
    revision: Revision,
    subscription: RefCell<Option<Subscription>>,
}

impl FavoritesController {
    pub fn new(context: &PageContext) -> Rc<Self> {
        let controller = Rc::new(Self {
            gallery: Rc::clone(&context.gallery),
            source: Rc::clone(&context.source),
            loading: Cell::new(false),
            outcome: Cell::new(None),
            liveness: Liveness::new(),
            revision: Revision::default(),
            subscription: RefCell::new(None),
        });

        let revision = controller.revision.clone();
        let subscription = controller.gallery.subscribe(move |_| revision.bump());
        *controller.subscription.borrow_mut() = Some(subscription);
        controller
    }

    pub fn start(self: &Rc<Self>) {
        let controller = Rc::clone(self);
        tokio::task::spawn_local(async move {
            controller.load_favorites().await;
        });
    }

    /// Fetch every favorite that is not loaded yet and merge the hits
    pub async fn load_favorites(&self) -> FavoritesOutcome {
        if self.loading.get() {
            return FavoritesOutcome::Skipped;
        }
        self.loading.set(true);
        self.gallery.set_loading(true);

        let outcome = self.fetch_missing().await;

        self.loading.set(false);
        self.gallery.set_loading(false);
        if self.liveness.is_live() {
            self.outcome.set(Some(outcome));
            self.revision.bump();
        }
        outcome
    }

    async fn fetch_missing(&self) -> FavoritesOutcome {
        let state = self.gallery.state();
        if state.favorites.is_empty() {
            return FavoritesOutcome::Empty;
        }

        let already_loaded = state.favorite_images().len();
        let missing = state.missing_favorites();
        if missing.is_empty() {
            return FavoritesOutcome::Loaded {
                shown: already_loaded,
                failed: 0,
            };
        }

        let fetched: Vec<GalleryImage> = fetch_favorites(self.source.as_ref(), &missing)
            .await
            .into_iter()
            .flatten()
            .collect();
        let failed = missing.len() - fetched.len();
        let shown = already_loaded + fetched.len();

        if self.liveness.is_live() {
            if !fetched.is_empty() {
                self.gallery.merge_images(fetched);
            }
            if failed > 0 && already_loaded == 0 {
                self.gallery
                    .set_error(Some("Some favorites could not be loaded.".to_string()));
            }
        }

        if shown == 0 {
            FavoritesOutcome::Unavailable { failed }
        } else {
            FavoritesOutcome::Loaded { shown, failed }
        }
    }

    /// Favorites to list, in load order
    pub fn images(&self) -> Vec<GalleryImage> {
        self.gallery
            .state()
            .favorite_images()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Outcome of the last finished load, `None` while the first is running
    pub fn outcome(&self) -> Option<FavoritesOutcome> {
        self.outcome.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn toggle_favorite(&self, image_id: &str) {
        self.gallery.toggle_favorite(image_id);
    }

    pub fn teardown(&self) {
        self.liveness.cancel();
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    }
}
