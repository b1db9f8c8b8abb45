//! Service wiring for the TUI
//!
//! Builds the shared gallery, item source and viewport from configuration
//! and registers the page routes. Errors the pages report through the
//! gallery state are forwarded over a crossbeam channel so the event loop
//! can show them as banners.
//!
//! # Example
//!
//! ```no_run
//! use gallery_tui::services::{build_router, Services};
//! use libgallery::Config;
//!
//! # async fn example() -> gallery_tui::error::Result<()> {
//! let services = Services::new(&Config::load()?)?;
//! let mut router = build_router(&services.context, &services.origin)?;
//! router.start("/").await;
//! # Ok(())
//! # }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use libgallery::api::{source_from_config, ItemSource};
use libgallery::pages::PageContext;
use libgallery::storage::{FileStorage, KeyValueStorage};
use libgallery::{Config, Gallery, RouteContext, Router, Store, Subscription, Viewport};

use crate::error::Result;
use crate::views::{DetailView, FavoritesView, HomeView, NotFoundView, Page};

/// Everything the event loop needs besides the router
pub struct Services {
    pub context: PageContext,
    pub origin: String,
    pub start_path: String,
    errors: Receiver<String>,
    _error_feed: Subscription,
}

impl Services {
    /// Build services from configuration, with file storage and a remote source
    pub fn new(config: &Config) -> Result<Self> {
        let storage: Rc<dyn KeyValueStorage> = Rc::new(FileStorage::new(config.storage_dir()));
        let source = source_from_config(config)?;
        Ok(Self::with_parts(config, storage, source))
    }

    /// Build services around an explicit storage and source
    pub fn with_parts(
        config: &Config,
        storage: Rc<dyn KeyValueStorage>,
        source: Rc<dyn ItemSource>,
    ) -> Self {
        let gallery = Rc::new(Gallery::new(storage, &config.storage.favorites_key));
        let viewport = Rc::new(Store::new(Viewport::default()));
        let context = PageContext::new(Rc::clone(&gallery), source, viewport, config);

        let (sender, errors) = unbounded();
        let error_feed = forward_errors(&gallery, sender);

        Self {
            context,
            origin: config.ui.origin.clone(),
            start_path: config.ui.start_path.clone(),
            errors,
            _error_feed: error_feed,
        }
    }

    /// Error messages reported since the last call, oldest first
    ///
    /// Each drained message is cleared from the gallery state.
    pub fn drain_errors(&self) -> Vec<String> {
        let messages: Vec<String> = self.errors.try_iter().collect();
        if !messages.is_empty() {
            self.context.gallery.set_error(None);
        }
        messages
    }
}

/// Send each newly set error message to `sender`
fn forward_errors(gallery: &Gallery, sender: Sender<String>) -> Subscription {
    let last: RefCell<Option<String>> = RefCell::new(None);
    gallery.subscribe(move |state| {
        let mut last = last.borrow_mut();
        if state.error == *last {
            return;
        }
        *last = state.error.clone();
        if let Some(message) = &state.error {
            if sender.send(message.clone()).is_err() {
                tracing::warn!("Error feed closed, dropping: {}", message);
            }
        }
    })
}

/// Register the gallery's pages
///
/// | Path          | View          |
/// |---------------|---------------|
/// | `/`           | Home feed     |
/// | `/image/:id`  | Image details |
/// | `/favorites`  | Favorites     |
pub fn build_router(context: &PageContext, origin: &str) -> Result<Router<dyn Page>> {
    let mut router: Router<dyn Page> = Router::new(
        origin,
        Rc::clone(&context.viewport),
        |route: RouteContext| -> Box<dyn Page> { Box::new(NotFoundView::new(&route)) },
    )?;

    let home_context = context.clone();
    router.add_route(
        "/",
        move |_route: RouteContext| {
            let view: Box<dyn Page> = Box::new(HomeView::mount(&home_context));
            async move { Ok(view) }
        },
        true,
    );

    let detail_context = context.clone();
    router.add_route(
        "/image/:id",
        move |route: RouteContext| {
            let image_id = route.param("id").map(str::to_string);
            let view: Box<dyn Page> = Box::new(DetailView::mount(&detail_context, image_id));
            async move { Ok(view) }
        },
        false,
    );

    let favorites_context = context.clone();
    router.add_route(
        "/favorites",
        move |_route: RouteContext| {
            let view: Box<dyn Page> = Box::new(FavoritesView::mount(&favorites_context));
            async move { Ok(view) }
        },
        true,
    );

    Ok(router)
}
