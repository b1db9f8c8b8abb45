//! Core data types shared across the gallery

use serde::{Deserialize, Serialize};

/// An item displayed in the gallery
///
/// Identity is `id`, assigned by the remote service and unique within a
/// loaded set. `is_favorite` mirrors membership in the favorites set and is
/// only ever changed through gallery actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub author: String,
    pub width: u32,
    pub height: u32,
    /// Page describing the item on the remote service
    pub url: String,
    /// Full-size media
    pub download_url: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GalleryImage {
    /// In-app path of the detail page for this image
    pub fn detail_path(&self) -> String {
        detail_path(&self.id)
    }

    /// Width over height, `None` for degenerate dimensions
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }
}

/// In-app path of the detail page for an image id
pub fn detail_path(id: &str) -> String {
    format!("/image/{}", id)
}
