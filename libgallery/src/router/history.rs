//! Session history
//!
//! An ordered list of visited locations with a cursor. Pushing truncates
//! every entry ahead of the cursor, like a browser tab.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl SessionHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        // The list is never empty.
        &self.entries[self.cursor]
    }

    pub fn push(&mut self, location: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location.to_string());
        self.cursor = self.entries.len() - 1;
    }

    /// Start a fresh session at `location`
    pub fn reset(&mut self, location: &str) {
        self.entries = vec![location.to_string()];
        self.cursor = 0;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Move the cursor back; `false` at the first entry
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor forward; `false` at the last entry
    pub fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }
}
