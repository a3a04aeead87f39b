//! Game narration buffer.
//!
//! Lines accumulate in a pending buffer that the engine flushes to every
//! player right before a decision goes out and at game end. Every line is also
//! kept in a persistent history for inspection.

use im::Vector;

/// Buffered game log.
#[derive(Clone, Debug, Default)]
pub struct GameLog {
    pending: Vec<String>,
    history: Vector<String>,
}

impl GameLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.history.push_back(line.clone());
        self.pending.push(line);
    }

    /// Whether any lines are waiting to be flushed.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take the unflushed lines, leaving the buffer empty.
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Every line written so far.
    #[must_use]
    pub fn history(&self) -> &Vector<String> {
        &self.history
    }

    /// Whether any line so far contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.history.iter().any(|line| line.contains(needle))
    }
}
