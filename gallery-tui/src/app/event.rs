//! Event handling infrastructure
//!
//! Polls the terminal without blocking the single-threaded runtime, so
//! background fetches keep running between key presses.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::app::Action;

/// TUI events that can be dispatched
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick
    Tick(Instant),
}

impl From<TuiEvent> for Action {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => Action::Key(key),
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick(now) => Action::Tick(now),
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Next terminal event, or a tick after `tick_rate` of quiet
    ///
    /// Waiting happens on the async runtime so spawned tasks make progress.
    pub async fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(Duration::ZERO)? {
            return Ok(match event::read()? {
                CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => TuiEvent::Key(key),
                CrosstermEvent::Resize(w, h) => TuiEvent::Resize(w, h),
                _ => TuiEvent::Tick(Instant::now()),
            });
        }

        tokio::time::sleep(self.tick_rate).await;
        Ok(TuiEvent::Tick(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new(100);
        assert_eq!(handler.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn test_tick_converts_to_action() {
        let now = Instant::now();
        assert!(matches!(Action::from(TuiEvent::Tick(now)), Action::Tick(at) if at == now));
    }
}
