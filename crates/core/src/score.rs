//! Scoring module - current and high score
//!
//! Scoring is flat: one point per square placed and one point per square
//! removed by a line clear. The high score tracks the maximum current score
//! ever reached and is persisted through a [`HighScoreStore`].

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Score values after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub current: i64,
    pub high: i64,
    /// The high score moved as part of this update
    pub new_high: bool,
}

/// Current score plus the best score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    current: i64,
    high: i64,
}

impl Score {
    /// Start a game at zero with a previously saved high score
    pub fn new(high: i64) -> Self {
        Self {
            current: 0,
            high: high.max(0),
        }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    /// Add points; raises the high score when the current score passes it
    pub fn add(&mut self, points: i64) -> ScoreUpdate {
        self.current = self.current.saturating_add(points);
        let new_high = self.current > self.high;
        if new_high {
            self.high = self.current;
        }
        ScoreUpdate {
            current: self.current,
            high: self.high,
            new_high,
        }
    }

    /// Reset the current score, keeping the high score
    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn snapshot(&self) -> ScoreUpdate {
        ScoreUpdate {
            current: self.current,
            high: self.high,
            new_high: false,
        }
    }
}

/// Persistence collaborator for the high score
///
/// The core only calls this at session start, when the high score rises
/// and at game over. Storage format and location are up to the implementor.
pub trait HighScoreStore {
    /// Saved high score, or 0 when nothing has been saved
    fn load_high_score(&self) -> i64;

    fn save_high_score(&mut self, value: i64);
}

/// In-memory store; clones share the saved value
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Rc<Cell<i64>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: i64) -> Self {
        let store = Self::default();
        store.value.set(value);
        store
    }

    pub fn value(&self) -> i64 {
        self.value.get()
    }

    /// Number of times `save_high_score` was called
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&self) -> i64 {
        self.value.get()
    }

    fn save_high_score(&mut self, value: i64) {
        self.value.set(value);
        self.saves.set(self.saves.get() + 1);
    }
}
