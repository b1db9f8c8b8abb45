//! Detail view for one image

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use libgallery::pages::{DetailController, DetailStatus, PageContext};
use libgallery::{GalleryImage, LinkClick, Mountable};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{Page, PageCommand};
use crate::ui::Theme;

pub struct DetailView {
    controller: Rc<DetailController>,
}

impl DetailView {
    /// Build and start the controller; must run inside a `LocalSet`
    pub fn mount(context: &PageContext, image_id: Option<String>) -> Self {
        let controller = DetailController::new(context, image_id);
        controller.start();
        Self { controller }
    }
}

fn image_lines<'a>(image: &'a GalleryImage, theme: &Theme) -> Vec<Line<'a>> {
    let ratio = image
        .aspect_ratio()
        .map(|ratio| format!("{:.2}", ratio))
        .unwrap_or_else(|| "-".to_string());
    let favorite_label = if image.is_favorite {
        "Favorite"
    } else {
        "Not a favorite"
    };

    vec![
        Line::from(vec![
            Span::styled(theme.star(image.is_favorite), theme.favorite(image.is_favorite)),
            Span::raw(" "),
            Span::styled(favorite_label, theme.favorite(image.is_favorite)),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Author:     ", theme.muted()), Span::raw(image.author.as_str())]),
        Line::from(vec![Span::styled("Id:         ", theme.muted()), Span::raw(image.id.as_str())]),
        Line::from(vec![
            Span::styled("Size:       ", theme.muted()),
            Span::raw(format!("{} x {} ({})", image.width, image.height, ratio)),
        ]),
        Line::from(vec![Span::styled("Page:       ", theme.muted()), Span::raw(image.url.as_str())]),
        Line::from(vec![
            Span::styled("Original:   ", theme.muted()),
            Span::styled(image.download_url.as_str(), theme.accent()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "f: Toggle favorite | o: Open original | h: Back to gallery",
            theme.muted(),
        )),
    ]
}

impl Mountable for DetailView {
    fn teardown(&mut self) {
        self.controller.teardown();
    }
}

impl Page for DetailView {
    fn title(&self) -> String {
        match self.controller.image_id() {
            Some(id) => format!("Image {}", id),
            None => "Image".to_string(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let status = self.controller.status();
        let (title, lines) = match &status {
            DetailStatus::Loading => (
                " Loading ".to_string(),
                vec![Line::from(Span::styled("Loading image...", theme.muted()))],
            ),
            DetailStatus::Ready(image) => (format!(" {} ", image.author), image_lines(image, theme)),
            DetailStatus::Failed(message) => (
                " Error ".to_string(),
                vec![
                    Line::from(Span::styled(message.as_str(), theme.error())),
                    Line::from(""),
                    Line::from(Span::styled("h: Back to gallery", theme.muted())),
                ],
            ),
        };

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(theme.title()),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> PageCommand {
        match key.code {
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                self.controller.toggle_favorite();
                PageCommand::None
            }
            KeyCode::Char('o') => match self.controller.status() {
                DetailStatus::Ready(image) => {
                    PageCommand::Follow(LinkClick::primary(image.download_url).with_target("_blank"))
                }
                _ => PageCommand::None,
            },
            KeyCode::Char('h') | KeyCode::Esc => PageCommand::Follow(LinkClick::primary("/")),
            _ => PageCommand::None,
        }
    }
}
