//! Image card widget
//!
//! One gallery item as a bordered box: author as the title, favorite star,
//! id and dimensions, then the media link.

use libgallery::GalleryImage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::Theme;

/// Rows one card occupies, borders included
pub const CARD_HEIGHT: u16 = 4;

/// Rendition size requested for card media
pub const CARD_MEDIA_WIDTH: u32 = 300;
pub const CARD_MEDIA_HEIGHT: u32 = 200;

pub struct ImageCard<'a> {
    image: &'a GalleryImage,
    selected: bool,
    media_url: Option<String>,
    theme: &'a Theme,
}

impl<'a> ImageCard<'a> {
    pub fn new(image: &'a GalleryImage, theme: &'a Theme) -> Self {
        Self {
            image,
            selected: false,
            media_url: None,
            theme,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Show `url` instead of the original download link
    pub fn media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }
}

impl Widget for ImageCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            self.theme.accent()
        } else {
            self.theme.muted()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.image.author));
        let media = self
            .media_url
            .as_deref()
            .unwrap_or(self.image.download_url.as_str());

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    self.theme.star(self.image.is_favorite),
                    self.theme.favorite(self.image.is_favorite),
                ),
                Span::raw(format!(
                    "  #{}  {} x {}",
                    self.image.id, self.image.width, self.image.height
                )),
            ]),
            Line::from(Span::styled(media, self.theme.muted())),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
