//! Detail page for a single image

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{Liveness, PageContext, Revision};
use crate::api::ItemSource;
use crate::gallery::{Gallery, GalleryState};
use crate::store::Subscription;
use crate::types::GalleryImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    Loading,
    Ready(GalleryImage),
    /// Message to show in place of the image
    Failed(String),
}

pub struct DetailController {
    gallery: Rc<Gallery>,
    source: Rc<dyn ItemSource>,
    image_id: Option<String>,
    status: RefCell<DetailStatus>,
    liveness: Liveness,
    revision: Revision,
    subscription: RefCell<Option<Subscription>>,
}

impl DetailController {
    /// Build the controller for `image_id` and mark it selected
    pub fn new(context: &PageContext, image_id: Option<String>) -> Rc<Self> {
        let controller = Rc::new(Self {
            gallery: Rc::clone(&context.gallery),
            source: Rc::clone(&context.source),
            image_id,
            status: RefCell::new(DetailStatus::Loading),
            liveness: Liveness::new(),
            revision: Revision::default(),
            subscription: RefCell::new(None),
        });

        let weak: Weak<Self> = Rc::downgrade(&controller);
        let subscription = controller.gallery.subscribe(move |state| {
            if let Some(controller) = weak.upgrade() {
                controller.sync_favorite(state);
                controller.revision.bump();
            }
        });
        *controller.subscription.borrow_mut() = Some(subscription);

        if let Some(id) = &controller.image_id {
            controller.gallery.set_selected_image(Some(id.clone()));
        }
        controller
    }

    /// Load the image in the background
    pub fn start(self: &Rc<Self>) {
        let controller = Rc::clone(self);
        tokio::task::spawn_local(async move {
            controller.load_image().await;
        });
    }

    /// Resolve the image from loaded state, or fetch it
    pub async fn load_image(&self) -> DetailStatus {
        let Some(id) = self.image_id.clone() else {
            return self.settle(DetailStatus::Failed("Image id not found.".to_string()));
        };

        let state = self.gallery.state();
        if let Some(image) = state.image(&id) {
            return self.settle(DetailStatus::Ready(image.clone()));
        }

        self.gallery.set_loading(true);
        let status = match self.source.fetch_by_id(&id).await {
            Ok(image) => {
                let is_favorite = self.gallery.state().is_favorite(&id);
                DetailStatus::Ready(GalleryImage { is_favorite, ..image })
            }
            Err(e) => {
                tracing::error!(id = %id, "Failed to load image: {}", e);
                DetailStatus::Failed("Failed to load the image.".to_string())
            }
        };
        self.gallery.set_loading(false);

        if !self.liveness.is_live() {
            return status;
        }
        self.settle(status)
    }

    fn settle(&self, status: DetailStatus) -> DetailStatus {
        *self.status.borrow_mut() = status.clone();
        self.revision.bump();
        status
    }

    /// Keep the shown image's flag in line with the favorites set
    fn sync_favorite(&self, state: &GalleryState) {
        if let DetailStatus::Ready(image) = &mut *self.status.borrow_mut() {
            image.is_favorite = state.is_favorite(&image.id);
        }
    }

    pub fn toggle_favorite(&self) {
        if let Some(id) = &self.image_id {
            self.gallery.toggle_favorite(id);
        }
    }

    pub fn image_id(&self) -> Option<&str> {
        self.image_id.as_deref()
    }

    pub fn status(&self) -> DetailStatus {
        self.status.borrow().clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Unsubscribe, drop late results and clear the selection
    pub fn teardown(&self) {
        self.liveness.cancel();
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
        self.gallery.set_selected_image(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{sample_image, MockSource};
    use crate::router::Viewport;
    use crate::storage::MemoryStorage;
    use crate::store::Store;

    fn context(source: MockSource, favorites: &str) -> PageContext {
        PageContext {
            gallery: Rc::new(Gallery::new(
                Rc::new(MemoryStorage::with_value("favs", favorites)),
                "favs",
            )),
            source: Rc::new(source),
            viewport: Rc::new(Store::new(Viewport::default())),
            page_size: 10,
            scroll_threshold: 3,
        }
    }

    #[tokio::test]
    async fn test_fetches_and_decorates_unloaded_image() {
        let context = context(MockSource::new().item(sample_image("12")), r#"["12"]"#);
        let detail = DetailController::new(&context, Some("12".to_string()));
        assert_eq!(context.gallery.state().selected_image_id.as_deref(), Some("12"));

        match detail.load_image().await {
            DetailStatus::Ready(image) => assert!(image.is_favorite),
            other => panic!("Expected ready, got {:?}", other),
        }
        assert!(!context.gallery.state().loading);
    }

    #[tokio::test]
    async fn test_prefers_loaded_state() {
        let context = context(MockSource::new(), "[]");
        context.gallery.add_images(vec![sample_image("3")]);
        let detail = DetailController::new(&context, Some("3".to_string()));

        assert!(matches!(detail.load_image().await, DetailStatus::Ready(_)));
    }

    #[tokio::test]
    async fn test_missing_id_and_fetch_failure() {
        let context = context(MockSource::new().fail_id("4"), "[]");

        let no_id = DetailController::new(&context, None);
        assert!(matches!(no_id.load_image().await, DetailStatus::Failed(_)));

        let failing = DetailController::new(&context, Some("4".to_string()));
        assert!(matches!(failing.load_image().await, DetailStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_toggle_updates_shown_image_and_teardown_clears_selection() {
        let context = context(MockSource::new().item(sample_image("8")), "[]");
        let detail = DetailController::new(&context, Some("8".to_string()));
        detail.load_image().await;

        detail.toggle_favorite();
        match detail.status() {
            DetailStatus::Ready(image) => assert!(image.is_favorite),
            other => panic!("Expected ready, got {:?}", other),
        }

        detail.teardown();
        assert_eq!(context.gallery.state().selected_image_id, None);
        assert_eq!(context.gallery.store().listener_count(), 0);
    }
}
