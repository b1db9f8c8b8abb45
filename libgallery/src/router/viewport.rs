//! Scroll position of the mounted view, in rows

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row of the content
    pub scroll_top: u32,
    /// Rows visible at once
    pub client_height: u32,
    /// Total rows of content
    pub scroll_height: u32,
}

impl Viewport {
    pub fn max_scroll(&self) -> u32 {
        self.scroll_height.saturating_sub(self.client_height)
    }

    /// Within `threshold` rows of the end of the content
    pub fn near_bottom(&self, threshold: u32) -> bool {
        self.scroll_top
            .saturating_add(self.client_height)
            .saturating_add(threshold)
            >= self.scroll_height
    }

    /// Scroll by `delta` rows, clamped to the content
    pub fn scrolled_by(&self, delta: i64) -> Self {
        let target = (self.scroll_top as i64 + delta).clamp(0, self.max_scroll() as i64);
        Self {
            scroll_top: target as u32,
            ..*self
        }
    }

    /// New dimensions, keeping the scroll position inside the content
    pub fn resized(&self, client_height: u32, scroll_height: u32) -> Self {
        let next = Self {
            client_height,
            scroll_height,
            ..*self
        };
        Self {
            scroll_top: next.scroll_top.min(next.max_scroll()),
            ..next
        }
    }

    pub fn scrolled_to_top(&self) -> Self {
        Self {
            scroll_top: 0,
            ..*self
        }
    }
}
