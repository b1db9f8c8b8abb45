//! Gallery state
//!
//! One immutable snapshot of everything the pages share. Transitions happen
//! only through the reducer (see `actions.rs`).

use std::collections::BTreeSet;

use crate::types::GalleryImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    /// Loaded images, unique by id, in append order
    pub images: Vec<GalleryImage>,

    /// A fetch is in progress somewhere
    pub loading: bool,

    /// Last error worth showing to the user
    pub error: Option<String>,

    /// Next page to fetch (1-based)
    pub current_page: u32,

    /// Favorite ids; the single source of truth for favorite status
    pub favorites: BTreeSet<String>,

    /// Image shown by the detail page
    pub selected_image_id: Option<String>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            loading: false,
            error: None,
            current_page: 1,
            favorites: BTreeSet::new(),
            selected_image_id: None,
        }
    }
}

impl GalleryState {
    /// Initial state with favorites restored from storage
    pub fn with_favorites(favorites: BTreeSet<String>) -> Self {
        Self {
            favorites,
            ..Self::default()
        }
    }

    pub fn image(&self, id: &str) -> Option<&GalleryImage> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.image(id).is_some()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Loaded images that are favorites, in load order
    pub fn favorite_images(&self) -> Vec<&GalleryImage> {
        self.images
            .iter()
            .filter(|image| self.favorites.contains(&image.id))
            .collect()
    }

    /// Favorite ids with no loaded image yet, in id order
    pub fn missing_favorites(&self) -> Vec<String> {
        self.favorites
            .iter()
            .filter(|id| !self.contains(id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str) -> GalleryImage {
        GalleryImage {
            id: id.to_string(),
            author: format!("Author {}", id),
            width: 300,
            height: 200,
            url: String::new(),
            download_url: String::new(),
            is_favorite: false,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_default_state() {
        let state = GalleryState::default();
        assert!(state.images.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.selected_image_id, None);
    }

    #[test]
    fn test_missing_favorites() {
        let favorites = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();
        let mut state = GalleryState::with_favorites(favorites);
        state.images = vec![image("2"), image("9")];

        assert_eq!(state.missing_favorites(), vec!["1".to_string(), "3".to_string()]);
        let loaded: Vec<&str> = state.favorite_images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(loaded, vec!["2"]);
    }
}
