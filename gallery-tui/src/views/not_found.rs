//! Fallback view for unknown locations

use crossterm::event::{KeyCode, KeyEvent};
use libgallery::{LinkClick, Mountable, RouteContext};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Page, PageCommand};
use crate::ui::Theme;

pub struct NotFoundView {
    path: String,
}

impl NotFoundView {
    pub fn new(route: &RouteContext) -> Self {
        Self {
            path: route.path().to_string(),
        }
    }
}

impl Mountable for NotFoundView {}

impl Page for NotFoundView {
    fn title(&self) -> String {
        "Not Found".to_string()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines = vec![
            Line::from(Span::styled("404 - Page not found", theme.error())),
            Line::from(""),
            Line::from(Span::styled(self.path.as_str(), theme.muted())),
            Line::from(""),
            Line::from("Press Enter to return to the gallery."),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).border_style(theme.muted()))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> PageCommand {
        match key.code {
            KeyCode::Enter | KeyCode::Char('h') => PageCommand::Follow(LinkClick::primary("/")),
            _ => PageCommand::None,
        }
    }
}
