//! Infinite Gallery - browse a paginated image service and keep favorites
//!
//! This library holds the UI-free core of the gallery client: an observable
//! store, the gallery state and its actions, item sources, a client-side
//! router and the logic behind each page. Front ends render on top of it.

pub mod api;
pub mod config;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod pages;
pub mod router;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use api::ItemSource;
pub use config::Config;
pub use error::{ApiError, GalleryError, Result};
pub use gallery::{Gallery, GalleryAction, GalleryState};
pub use router::{LinkClick, Mountable, RouteContext, Router, Viewport};
pub use store::{Store, Subscription};
pub use types::GalleryImage;
