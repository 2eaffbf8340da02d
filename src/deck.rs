/// Position in the deck, clamped to `[0, total - 1]`. Out-of-range requests
/// are no-ops, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckCursor {
    index: usize,
    total: usize,
}

impl DeckCursor {
    pub fn new(total: usize) -> Self {
        Self { index: 0, total }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn last(&self) -> Option<usize> {
        self.total.checked_sub(1)
    }

    /// Returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        match self.last() {
            Some(last) if self.index < last => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }

    pub fn retreat(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        match self.last() {
            Some(last) if index <= last && index != self.index => {
                self.index = index;
                true
            }
            _ => false,
        }
    }

    /// `(current + 1) / total`, or 0 for an empty deck.
    pub fn progress_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.index + 1) as f64 / self.total as f64
        }
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.last().map_or(true, |last| self.index == last)
    }
}

/// Keys the presenter reacts to regardless of focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Other,
}

impl Key {
    /// Recognises the ANSI cursor escape sequences a terminal sends for the
    /// arrow keys.
    pub fn from_input(input: &str) -> Key {
        match input.trim_end_matches(['\r', '\n']) {
            "\x1b[D" | "\x1bOD" => Key::Left,
            "\x1b[C" | "\x1bOC" => Key::Right,
            _ => Key::Other,
        }
    }
}
