//! Home view: the infinite feed
//!
//! Selecting towards the end of the list scrolls the shared viewport, which
//! is what makes the controller fetch the next page.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use libgallery::pages::{HomeController, PageContext};
use libgallery::{LinkClick, Mountable};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::{CardList, Page, PageCommand};
use crate::ui::Theme;

pub struct HomeView {
    controller: Rc<HomeController>,
    list: CardList,
}

impl HomeView {
    /// Build and start the controller; must run inside a `LocalSet`
    pub fn mount(context: &PageContext) -> Self {
        let controller = HomeController::new(context);
        controller.start(&context.viewport);
        Self {
            controller,
            list: CardList::new(Rc::clone(&context.viewport)).with_media(Rc::clone(&context.source)),
        }
    }

    fn footer(&self, count: usize, theme: &Theme) -> Line<'static> {
        let state = self.controller.gallery().state();
        let text = if state.loading {
            "Loading more images..."
        } else if !self.controller.has_more() {
            "No more images."
        } else if state.error.is_some() {
            "Press r to retry."
        } else if count == 0 {
            "No images yet."
        } else {
            ""
        };
        Line::from(Span::styled(text, theme.muted()))
    }
}

impl Mountable for HomeView {
    fn teardown(&mut self) {
        self.controller.teardown();
    }
}

impl Page for HomeView {
    fn title(&self) -> String {
        "Gallery".to_string()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let state = self.controller.gallery().state();
        self.list.sync(area, state.images.len());
        let footer = self.footer(state.images.len(), theme);
        self.list.render(frame, area, &state.images, footer, theme);
    }

    fn handle_key(&mut self, key: KeyEvent) -> PageCommand {
        let state = self.controller.gallery().state();
        let count = state.images.len();
        if self.list.handle_movement(&key, count) {
            return PageCommand::None;
        }

        match key.code {
            KeyCode::Enter => match self.list.selected_image(&state.images) {
                Some(image) => PageCommand::Follow(LinkClick::primary(image.detail_path())),
                None => PageCommand::None,
            },
            KeyCode::Char(' ') | KeyCode::Char('f') => {
                if let Some(image) = self.list.selected_image(&state.images) {
                    self.controller.gallery().toggle_favorite(&image.id);
                }
                PageCommand::None
            }
            KeyCode::Char('r') => {
                let controller = Rc::clone(&self.controller);
                tokio::task::spawn_local(async move {
                    controller.load_images().await;
                });
                PageCommand::Status("Retrying...".to_string())
            }
            _ => PageCommand::None,
        }
    }
}
