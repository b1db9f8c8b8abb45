//! Header with navigation links
//!
//! The link whose path equals the current path exactly is highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::Theme;
use crate::app::keymap::NAV_LINKS;

pub struct Header<'a> {
    current_path: &'a str,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(current_path: &'a str, theme: &'a Theme) -> Self {
        Self { current_path, theme }
    }
}

/// Path of the header link matching `current_path`, if any
pub fn active_link(current_path: &str) -> Option<&'static str> {
    NAV_LINKS
        .iter()
        .map(|(_, path, _)| *path)
        .find(|path| *path == current_path)
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = active_link(self.current_path);

        let mut spans = vec![Span::styled("Infinite Gallery", self.theme.title()), Span::raw("   ")];
        for (label, path, shortcut) in NAV_LINKS {
            let style = if active == Some(path) {
                self.theme.accent()
            } else {
                self.theme.muted()
            };
            spans.push(Span::styled(format!("[{}] {}", shortcut, label), style));
            spans.push(Span::raw("  "));
        }

        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::BOTTOM))
            .render(area, buf);
    }
}
