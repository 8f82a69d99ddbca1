//! Lightbox Navigation
//!
//! Which image of a gallery is open full-screen, if any. Navigation wraps
//! around at both ends.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lightbox {
    len: usize,
    selected: Option<usize>,
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Moved(usize),
    Closed,
    Ignored,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Self { len, selected: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Out-of-range indices leave the lightbox unchanged
    pub fn open(&mut self, index: usize) -> bool {
        if index < self.len {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn next(&mut self) -> Option<usize> {
        let current = self.selected?;
        let next = (current + 1) % self.len;
        self.selected = Some(next);
        Some(next)
    }

    pub fn prev(&mut self) -> Option<usize> {
        let current = self.selected?;
        let prev = if current == 0 { self.len - 1 } else { current - 1 };
        self.selected = Some(prev);
        Some(prev)
    }

    /// Keys follow `KeyboardEvent.key` names
    pub fn handle_key(&mut self, key: &str) -> KeyOutcome {
        if !self.is_open() {
            return KeyOutcome::Ignored;
        }
        match key {
            "ArrowRight" => self.next().map_or(KeyOutcome::Ignored, KeyOutcome::Moved),
            "ArrowLeft" => self.prev().map_or(KeyOutcome::Ignored, KeyOutcome::Moved),
            "Escape" => {
                self.close();
                KeyOutcome::Closed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Track a changed collection size. Closes when nothing is left and
    /// clamps a selection that fell off the end.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(index) if index >= len => Some(len - 1),
            other => other,
        };
    }
}
