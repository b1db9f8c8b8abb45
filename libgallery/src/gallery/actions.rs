//! Gallery actions and the pure reducer
//!
//! Following the reducer pattern, actions are plain values and
//! [`reduce`] is a pure function `(&State, Action) -> State`. Persistence of
//! favorites happens outside the reducer, in [`super::Gallery::dispatch`].

use std::collections::{BTreeSet, HashMap, HashSet};

use super::state::GalleryState;
use crate::types::GalleryImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    /// Overwrite `loading`
    SetLoading(bool),

    /// Overwrite `error`
    SetError(Option<String>),

    /// Overwrite `selected_image_id`
    SetSelectedImage(Option<String>),

    /// Append a fetched page and advance `current_page`
    AddImages(Vec<GalleryImage>),

    /// Append images fetched outside pagination (e.g. favorites by id)
    MergeImages(Vec<GalleryImage>),

    /// Flip one id in and out of the favorites set
    ToggleFavorite(String),
}

impl GalleryAction {
    /// Whether applying this action changes the persisted favorites
    pub fn touches_favorites(&self) -> bool {
        matches!(self, GalleryAction::ToggleFavorite(_))
    }
}

/// Pure reducer function
///
/// # Purity Guarantees
///
/// - No network requests
/// - No storage writes
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: &GalleryState, action: GalleryAction) -> GalleryState {
    match action {
        GalleryAction::SetLoading(loading) => GalleryState {
            loading,
            ..state.clone()
        },

        GalleryAction::SetError(error) => GalleryState {
            error,
            ..state.clone()
        },

        GalleryAction::SetSelectedImage(selected_image_id) => GalleryState {
            selected_image_id,
            ..state.clone()
        },

        GalleryAction::AddImages(new_images) => GalleryState {
            images: append_unique(&state.images, &state.favorites, new_images),
            current_page: state.current_page + 1,
            ..state.clone()
        },

        GalleryAction::MergeImages(new_images) => GalleryState {
            images: append_unique(&state.images, &state.favorites, new_images),
            ..state.clone()
        },

        GalleryAction::ToggleFavorite(image_id) => {
            let mut favorites = state.favorites.clone();
            let now_favorite = if favorites.contains(&image_id) {
                favorites.remove(&image_id);
                false
            } else {
                favorites.insert(image_id.clone());
                true
            };

            let images = state
                .images
                .iter()
                .map(|image| {
                    if image.id == image_id {
                        GalleryImage {
                            is_favorite: now_favorite,
                            ..image.clone()
                        }
                    } else {
                        image.clone()
                    }
                })
                .collect();

            GalleryState {
                favorites,
                images,
                ..state.clone()
            }
        }
    }
}

/// Append images whose ids are not loaded yet, decorated with favorite status
///
/// Within one batch, a repeated id keeps the position of its first
/// occurrence and the data of its last (last write wins).
fn append_unique(
    existing: &[GalleryImage],
    favorites: &BTreeSet<String>,
    incoming: Vec<GalleryImage>,
) -> Vec<GalleryImage> {
    let known: HashSet<&str> = existing.iter().map(|image| image.id.as_str()).collect();
    let mut images = existing.to_vec();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for image in incoming {
        if known.contains(image.id.as_str()) {
            continue;
        }

        let image = GalleryImage {
            is_favorite: favorites.contains(&image.id),
            ..image
        };

        match positions.get(&image.id) {
            Some(&position) => images[position] = image,
            None => {
                positions.insert(image.id.clone(), images.len());
                images.push(image);
            }
        }
    }

    images
}
