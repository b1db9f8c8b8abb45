//! Home page: the infinite feed
//!
//! Loads pages in order starting from the gallery's `current_page`, stops
//! for good once a page comes back empty, and pulls in favorites that are
//! not part of any loaded page so their cards show up in the feed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::join_all;

use super::{Liveness, PageContext, Revision};
use crate::api::ItemSource;
use crate::error::ApiError;
use crate::gallery::Gallery;
use crate::router::Viewport;
use crate::store::{Store, Subscription};
use crate::types::GalleryImage;

/// What one call to [`HomeController::load_images`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Another load was in flight, the feed is exhausted, or the view is gone
    Skipped,
    /// A page with this many items was dispatched
    Loaded(usize),
    /// The page was empty; no further loads will run
    Exhausted,
    /// The page arrived after teardown and was dropped
    Discarded,
    Failed(ApiError),
}

pub struct HomeController {
    gallery: Rc<Gallery>,
    source: Rc<dyn ItemSource>,
    page_size: u32,
    scroll_threshold: u32,
    loading: Cell<bool>,
    has_more: Cell<bool>,
    liveness: Liveness,
    revision: Revision,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl HomeController {
    /// Build the controller and subscribe it to the gallery
    pub fn new(context: &PageContext) -> Rc<Self> {
        let controller = Rc::new(Self {
            gallery: Rc::clone(&context.gallery),
            source: Rc::clone(&context.source),
            page_size: context.page_size,
            scroll_threshold: context.scroll_threshold,
            loading: Cell::new(false),
            has_more: Cell::new(true),
            liveness: Liveness::new(),
            revision: Revision::default(),
            subscriptions: RefCell::new(Vec::new()),
        });

        let revision = controller.revision.clone();
        let subscription = controller.gallery.subscribe(move |_| revision.bump());
        controller.subscriptions.borrow_mut().push(subscription);
        controller
    }

    /// Kick off the favorites check and, on a fresh gallery, the first page
    ///
    /// A gallery that already holds loaded pages is shown as is; further
    /// pages come from the scroll trigger.
    pub fn start(self: &Rc<Self>, viewport: &Store<Viewport>) {
        self.watch_scroll(viewport);

        let controller = Rc::clone(self);
        tokio::task::spawn_local(async move {
            controller.check_favorite_images().await;
        });

        if self.gallery.state().current_page > 1 {
            tracing::debug!("Feed already loaded, waiting for scroll");
            return;
        }

        let controller = Rc::clone(self);
        tokio::task::spawn_local(async move {
            controller.load_images().await;
        });
    }

    /// Load the next page when the viewport nears the bottom
    pub fn watch_scroll(self: &Rc<Self>, viewport: &Store<Viewport>) {
        let weak = Rc::downgrade(self);
        let subscription = viewport.subscribe(move |viewport: &Viewport| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            if controller.handle_scroll(viewport) {
                tokio::task::spawn_local(async move {
                    controller.load_images().await;
                });
            }
        });
        self.subscriptions.borrow_mut().push(subscription);
    }

    /// Whether a scroll to `viewport` should load the next page
    pub fn handle_scroll(&self, viewport: &Viewport) -> bool {
        self.liveness.is_live()
            && !self.loading.get()
            && self.has_more.get()
            && viewport.near_bottom(self.scroll_threshold)
    }

    /// Fetch and dispatch the next page
    ///
    /// A second call while one is outstanding is a no-op. `loading` is
    /// cleared on every path, including after teardown.
    pub async fn load_images(&self) -> LoadOutcome {
        if self.loading.get() || !self.has_more.get() || !self.liveness.is_live() {
            return LoadOutcome::Skipped;
        }

        self.loading.set(true);
        self.gallery.set_loading(true);

        let page = self.gallery.state().current_page;
        tracing::debug!(page, source = self.source.name(), "Loading page");

        let outcome = match self.source.fetch_page(page, self.page_size).await {
            Ok(images) if images.is_empty() => {
                tracing::info!(page, "Feed exhausted");
                self.has_more.set(false);
                LoadOutcome::Exhausted
            }
            Ok(images) if self.liveness.is_live() => {
                let count = images.len();
                self.gallery.add_images(images);
                LoadOutcome::Loaded(count)
            }
            Ok(_) => LoadOutcome::Discarded,
            Err(e) => {
                tracing::error!(page, "Failed to load images: {}", e);
                if self.liveness.is_live() {
                    self.gallery
                        .set_error(Some("Failed to load images. Please try again.".to_string()));
                }
                LoadOutcome::Failed(e)
            }
        };

        self.loading.set(false);
        self.gallery.set_loading(false);
        outcome
    }

    /// Fetch favorites missing from the feed and merge them in
    ///
    /// Ids that fail to load are skipped. Returns how many were merged.
    pub async fn check_favorite_images(&self) -> usize {
        let missing = self.gallery.state().missing_favorites();
        if missing.is_empty() {
            return 0;
        }

        self.gallery.set_loading(true);
        let found = fetch_favorites(self.source.as_ref(), &missing).await;
        let found: Vec<GalleryImage> = found.into_iter().flatten().collect();
        let count = found.len();

        if count > 0 && self.liveness.is_live() {
            self.gallery.merge_images(found);
        }
        self.gallery.set_loading(false);
        count
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn has_more(&self) -> bool {
        self.has_more.get()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn gallery(&self) -> &Rc<Gallery> {
        &self.gallery
    }

    /// Drop subscriptions and discard any fetch still in flight
    pub fn teardown(&self) {
        self.liveness.cancel();
        for subscription in self.subscriptions.borrow_mut().drain(..) {
            subscription.unsubscribe();
        }
    }
}

/// Fetch `ids` in parallel, tagging hits as favorites; misses become `None`
pub(crate) async fn fetch_favorites(source: &dyn ItemSource, ids: &[String]) -> Vec<Option<GalleryImage>> {
    let requests = ids.iter().map(|id| async move {
        match source.fetch_by_id(id).await {
            Ok(image) => Some(GalleryImage {
                is_favorite: true,
                ..image
            }),
            Err(e) => {
                tracing::warn!(id = %id, "Failed to load favorite: {}", e);
                None
            }
        }
    });
    join_all(requests).await
}
