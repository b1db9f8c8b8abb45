//! Favorites view

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use libgallery::pages::{FavoritesController, FavoritesOutcome, PageContext};
use libgallery::{GalleryImage, LinkClick, Mountable};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::{CardList, Page, PageCommand};
use crate::ui::Theme;

pub struct FavoritesView {
    controller: Rc<FavoritesController>,
    list: CardList,
    /// Rows as of controller revision `seen`
    images: Vec<GalleryImage>,
    seen: Option<u64>,
}

impl FavoritesView {
    /// Build and start the controller; must run inside a `LocalSet`
    pub fn mount(context: &PageContext) -> Self {
        let controller = FavoritesController::new(context);
        controller.start();
        Self {
            controller,
            list: CardList::new(Rc::clone(&context.viewport)).with_media(Rc::clone(&context.source)),
            images: Vec::new(),
            seen: None,
        }
    }

    /// Rebuild the rows when the gallery changed since the last call
    fn refresh(&mut self) {
        let revision = self.controller.revision();
        if self.seen != Some(revision) {
            self.images = self.controller.images();
            self.seen = Some(revision);
        }
    }

    fn footer(&self, shown: usize, theme: &Theme) -> Line<'static> {
        if self.controller.is_loading() {
            return Line::from(Span::styled("Loading favorites...", theme.muted()));
        }
        match self.controller.outcome() {
            Some(FavoritesOutcome::Empty) => Line::from(Span::styled(
                "No favorites yet. Press f on an image to add one.",
                theme.muted(),
            )),
            Some(FavoritesOutcome::Unavailable { failed }) => Line::from(Span::styled(
                format!("{} favorites could not be loaded.", failed),
                theme.error(),
            )),
            Some(FavoritesOutcome::Loaded { failed, .. }) if failed > 0 => Line::from(Span::styled(
                format!("{} shown, {} could not be loaded.", shown, failed),
                theme.muted(),
            )),
            _ if shown == 0 => Line::from(Span::styled("No favorites yet.", theme.muted())),
            _ => Line::from(""),
        }
    }
}

impl Mountable for FavoritesView {
    fn teardown(&mut self) {
        self.controller.teardown();
    }
}

impl Page for FavoritesView {
    fn title(&self) -> String {
        "Favorites".to_string()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.refresh();
        self.list.sync(area, self.images.len());
        let footer = self.footer(self.images.len(), theme);
        self.list.render(frame, area, &self.images, footer, theme);
    }

    fn handle_key(&mut self, key: KeyEvent) -> PageCommand {
        self.refresh();
        if self.list.handle_movement(&key, self.images.len()) {
            return PageCommand::None;
        }

        let Some(image) = self.list.selected_image(&self.images) else {
            return PageCommand::None;
        };
        match key.code {
            KeyCode::Enter => PageCommand::Follow(LinkClick::primary(image.detail_path())),
            KeyCode::Char(' ') | KeyCode::Char('f') => {
                self.controller.toggle_favorite(&image.id);
                PageCommand::Status(format!("Removed {} from favorites", image.author))
            }
            _ => PageCommand::None,
        }
    }
}
