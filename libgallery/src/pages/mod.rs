//! Page controllers
//!
//! The UI-free half of each page: what it fetches, what it dispatches and
//! what it releases on teardown. Front ends wrap a controller in a view that
//! renders the gallery state.
//!
//! Controllers run on the single-threaded runtime. Background work is started
//! with `tokio::task::spawn_local`, so `start` must be called inside a
//! `tokio::task::LocalSet`.

pub mod detail;
pub mod favorites;
pub mod home;

pub use detail::{DetailController, DetailStatus};
pub use favorites::{FavoritesController, FavoritesOutcome};
pub use home::{HomeController, LoadOutcome};

use std::cell::Cell;
use std::rc::Rc;

use crate::api::ItemSource;
use crate::config::Config;
use crate::gallery::Gallery;
use crate::router::Viewport;
use crate::store::Store;

/// Cancellation token owned by one mounted view
///
/// Clones share the flag. Once cancelled, results of fetches started by the
/// view are dropped instead of dispatched.
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.get()
    }

    pub fn cancel(&self) {
        self.0.set(false);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a page needs from the application, cloned into route factories
#[derive(Clone)]
pub struct PageContext {
    pub gallery: Rc<Gallery>,
    pub source: Rc<dyn ItemSource>,
    pub viewport: Rc<Store<Viewport>>,
    pub page_size: u32,
    pub scroll_threshold: u32,
}

impl PageContext {
    pub fn new(
        gallery: Rc<Gallery>,
        source: Rc<dyn ItemSource>,
        viewport: Rc<Store<Viewport>>,
        config: &Config,
    ) -> Self {
        Self {
            gallery,
            source,
            viewport,
            page_size: config.api.page_size,
            scroll_threshold: u32::from(config.ui.scroll_threshold),
        }
    }
}

/// Counts store notifications so views can tell when to rebuild cached rows
#[derive(Debug, Clone, Default)]
pub struct Revision(Rc<Cell<u64>>);

impl Revision {
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    pub(crate) fn bump(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_clones_share_flag() {
        let liveness = Liveness::new();
        let clone = liveness.clone();
        assert!(clone.is_live());

        liveness.cancel();
        assert!(!clone.is_live());
    }

    #[test]
    fn test_revision_bumps() {
        let revision = Revision::default();
        revision.bump();
        revision.bump();
        assert_eq!(revision.get(), 2);
    }
}
