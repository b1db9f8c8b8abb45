//! UI rendering
//!
//! Draws the chrome (header, status bar, banners, help) around the mounted
//! page. The page itself renders through [`crate::views::Page::render`].

pub mod card;
pub mod header;

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::views::Page;
use header::Header;

/// Styles and symbols, degraded when colors or unicode are off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub colors: bool,
    pub unicode: bool,
}

impl Theme {
    pub fn new(colors: bool, unicode: bool) -> Self {
        Self { colors, unicode }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.config.colors_enabled, state.config.unicode_enabled)
    }

    fn fg(&self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    pub fn title(&self) -> Style {
        self.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        self.fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        self.fg(Color::DarkGray)
    }

    pub fn error(&self) -> Style {
        self.fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    pub fn favorite(&self, is_favorite: bool) -> Style {
        if is_favorite {
            self.fg(Color::Yellow)
        } else {
            self.muted()
        }
    }

    pub fn star(&self, is_favorite: bool) -> &'static str {
        match (self.unicode, is_favorite) {
            (true, true) => "★",
            (true, false) => "☆",
            (false, true) => "[*]",
            (false, false) => "[ ]",
        }
    }
}

/// Split the screen into header, page and status bar
pub fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Render one frame
pub fn render(frame: &mut Frame, state: &AppState, page: Option<&mut dyn Page>, now: Instant) {
    let theme = Theme::from_state(state);
    let (header_area, page_area, status_area) = layout(frame.area());

    frame.render_widget(Header::new(&state.current_path, &theme), header_area);

    let title = match page {
        Some(page) => {
            page.render(frame, page_area, &theme);
            page.title()
        }
        None => String::new(),
    };

    render_status_bar(frame, status_area, state, &title, &theme);

    if let Some(banner) = state.visible_banner(now) {
        render_banner(frame, page_area, &banner.message, &theme);
    }

    if state.help_visible {
        render_help_overlay(frame, frame.area(), &theme);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, title: &str, theme: &Theme) {
    let message = state
        .status
        .message
        .as_deref()
        .unwrap_or("q: Quit | F1: Help | 1/2: Pages | ←/→: History");

    let line = Line::from(vec![
        Span::styled(format!(" {} ", title), theme.title()),
        Span::raw(" "),
        Span::styled(message, theme.muted()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render a transient message across the top of the page area
fn render_banner(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let height = 3.min(area.height);
    let banner_area = Rect::new(area.x, area.y, area.width, height);

    let banner = Paragraph::new(Line::from(Span::styled(message, theme.error())))
        .block(Block::default().borders(Borders::ALL).border_style(theme.error()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, banner_area);
    frame.render_widget(banner, banner_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  q          - Quit"),
        Line::from("  F1         - Toggle help"),
        Line::from("  1 / 2      - Gallery / Favorites"),
        Line::from("  ← / →      - Back / Forward"),
        Line::from("  Esc        - Dismiss messages"),
        Line::from(""),
        Line::from("Lists:"),
        Line::from("  ↑ ↓ / j k  - Select"),
        Line::from("  PgUp PgDn  - Scroll a page"),
        Line::from("  Enter      - Open details"),
        Line::from("  Space / f  - Toggle favorite"),
        Line::from(""),
        Line::from("Details:"),
        Line::from("  o          - Show original image link"),
        Line::from("  h          - Back to the gallery"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(theme.title()),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Rectangle of `percent_x` by `percent_y` centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
