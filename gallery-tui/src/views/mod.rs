//! Page views
//!
//! Each view wraps a page controller from `libgallery::pages`, draws the
//! gallery state and turns page-level keys into commands. The router owns
//! the mounted view as a `Box<dyn Page>`.

pub mod detail;
pub mod favorites;
pub mod home;
pub mod not_found;

pub use detail::DetailView;
pub use favorites::FavoritesView;
pub use home::HomeView;
pub use not_found::NotFoundView;

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use libgallery::api::ItemSource;
use libgallery::{GalleryImage, LinkClick, Mountable, Store, Viewport};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::ui::card::{ImageCard, CARD_HEIGHT, CARD_MEDIA_HEIGHT, CARD_MEDIA_WIDTH};
use crate::ui::Theme;

/// What a page asks the event loop to do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    None,
    /// Activate a link through the router
    Follow(LinkClick),
    /// Show a message in the status bar
    Status(String),
}

pub trait Page: Mountable {
    /// Short name for the status bar
    fn title(&self) -> String;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn handle_key(&mut self, key: KeyEvent) -> PageCommand;
}

/// Rows below the last card reserved for the footer line
const FOOTER_HEIGHT: u32 = 1;

/// Selectable column of image cards scrolled through the shared viewport
///
/// Scrolling is kept card-aligned: `scroll_top` is always a multiple of
/// [`CARD_HEIGHT`].
pub struct CardList {
    viewport: Rc<Store<Viewport>>,
    /// Source asked for card-sized media links, if any
    media: Option<Rc<dyn ItemSource>>,
    selected: usize,
}

impl CardList {
    pub fn new(viewport: Rc<Store<Viewport>>) -> Self {
        Self {
            viewport,
            media: None,
            selected: 0,
        }
    }

    pub fn with_media(mut self, source: Rc<dyn ItemSource>) -> Self {
        self.media = Some(source);
        self
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Cards that fit in the current viewport, at least one
    fn visible_cards(&self) -> usize {
        let client = self.viewport.get_state().client_height / u32::from(CARD_HEIGHT);
        (client as usize).max(1)
    }

    /// Publish the area and content size, only when they changed
    pub fn sync(&mut self, area: Rect, count: usize) {
        if count > 0 && self.selected >= count {
            self.selected = count - 1;
        }

        let client_height = u32::from(area.height);
        let scroll_height = count as u32 * u32::from(CARD_HEIGHT) + FOOTER_HEIGHT;
        let current = self.viewport.get_state();
        if current.client_height != client_height || current.scroll_height != scroll_height {
            self.viewport
                .set_state(|viewport| viewport.resized(client_height, scroll_height));
        }
    }

    /// Select `index` (clamped) and scroll just enough to show it
    pub fn select(&mut self, index: usize, count: usize) {
        if count == 0 {
            self.selected = 0;
            return;
        }
        self.selected = index.min(count - 1);

        let card = u32::from(CARD_HEIGHT);
        let visible = self.visible_cards();
        let first = (self.viewport.get_state().scroll_top / card) as usize;
        let first = if self.selected < first {
            self.selected
        } else if self.selected >= first + visible {
            self.selected + 1 - visible
        } else {
            first
        };

        let scroll_top = first as u32 * card;
        if self.viewport.get_state().scroll_top != scroll_top {
            self.viewport.set_state(|viewport| Viewport {
                scroll_top,
                ..*viewport
            });
        }
    }

    /// Handle a movement key; `false` when the key is not a movement
    pub fn handle_movement(&mut self, key: &KeyEvent, count: usize) -> bool {
        let page = self.visible_cards();
        let target = match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.selected.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.selected.saturating_sub(1),
            KeyCode::PageDown => self.selected.saturating_add(page),
            KeyCode::PageUp => self.selected.saturating_sub(page),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => count.saturating_sub(1),
            _ => return false,
        };
        self.select(target, count);
        true
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        images: &[GalleryImage],
        footer: Line<'_>,
        theme: &Theme,
    ) {
        let first = (self.viewport.get_state().scroll_top / u32::from(CARD_HEIGHT)) as usize;
        let bottom = area.y + area.height;
        let mut y = area.y;

        for (index, image) in images.iter().enumerate().skip(first) {
            if y + CARD_HEIGHT > bottom {
                break;
            }
            let card_area = Rect::new(area.x, y, area.width, CARD_HEIGHT);
            let mut card = ImageCard::new(image, theme).selected(index == self.selected);
            if let Some(source) = &self.media {
                card = card.media_url(source.media_url(image, CARD_MEDIA_WIDTH, CARD_MEDIA_HEIGHT));
            }
            frame.render_widget(card, card_area);
            y += CARD_HEIGHT;
        }

        if y < bottom {
            frame.render_widget(Paragraph::new(footer), Rect::new(area.x, y, area.width, 1));
        }
    }

    pub fn selected_image<'a>(&self, images: &'a [GalleryImage]) -> Option<&'a GalleryImage> {
        images.get(self.selected)
    }
}
