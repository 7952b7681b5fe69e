//! Presentation capability
//!
//! The session reports everything a front end needs through
//! [`GameObserver`]. Every method has a no-op default so implementors only
//! pick the events they care about. Observers are only called from inside a
//! turn; they receive values, never references into the board.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{PieceId, SoundCue, SpawnIndex, SquareId};

/// Callbacks fired by the session
pub trait GameObserver {
    fn score_changed(&mut self, _current: i64, _high: i64) {}

    /// Squares removed from the board by a line clear
    fn squares_destroyed(&mut self, _squares: &[SquareId]) {}

    /// A placed piece's presentation can be dropped
    fn piece_placed(&mut self, _piece: PieceId) {}

    /// A new piece arrived at a spawn point
    fn piece_docked(&mut self, _piece: PieceId, _spawn: SpawnIndex) {}

    /// Fired when a piece's placeable state flips
    fn placeable_changed(&mut self, _piece: PieceId, _spawn: SpawnIndex, _placeable: bool) {}

    fn game_over(&mut self, _final_score: i64, _high: i64) {}

    fn sound(&mut self, _cue: SoundCue) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Everything a [`GameObserver`] can be told, as data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { current: i64, high: i64 },
    SquaresDestroyed(Vec<SquareId>),
    PiecePlaced(PieceId),
    PieceDocked { piece: PieceId, spawn: SpawnIndex },
    PlaceableChanged { piece: PieceId, spawn: SpawnIndex, placeable: bool },
    GameOver { final_score: i64, high: i64 },
    Sound(SoundCue),
}

/// Observer that records events; clones share one log
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    fn push(&self, event: GameEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl GameObserver for RecordingObserver {
    fn score_changed(&mut self, current: i64, high: i64) {
        self.push(GameEvent::ScoreChanged { current, high });
    }

    fn squares_destroyed(&mut self, squares: &[SquareId]) {
        self.push(GameEvent::SquaresDestroyed(squares.to_vec()));
    }

    fn piece_placed(&mut self, piece: PieceId) {
        self.push(GameEvent::PiecePlaced(piece));
    }

    fn piece_docked(&mut self, piece: PieceId, spawn: SpawnIndex) {
        self.push(GameEvent::PieceDocked { piece, spawn });
    }

    fn placeable_changed(&mut self, piece: PieceId, spawn: SpawnIndex, placeable: bool) {
        self.push(GameEvent::PlaceableChanged {
            piece,
            spawn,
            placeable,
        });
    }

    fn game_over(&mut self, final_score: i64, high: i64) {
        self.push(GameEvent::GameOver { final_score, high });
    }

    fn sound(&mut self, cue: SoundCue) {
        self.push(GameEvent::Sound(cue));
    }
}
