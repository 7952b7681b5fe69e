//! Shared types module - value types and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! They are plain data with serde support, usable by the rules core, the
//! headless runner and any presentation layer that reads the board.
//!
//! # Coordinates
//!
//! Slots and squares live in a continuous 2D space. The board is built from
//! an unordered list of slot positions; a square "lands" on a slot when the
//! squared distance between the two is strictly below the matching tolerance.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TOLERANCE` | 0.3 | Squared-distance matching tolerance |
//! | `DEFAULT_SPAWN_COUNT` | 3 | Number of spawn points (and queue length) |
//! | `DEFAULT_BOARD_WIDTH` | 8 | Columns of the standard board |
//! | `DEFAULT_BOARD_HEIGHT` | 8 | Rows of the standard board |
//!
//! # Examples
//!
//! ```
//! use block_puzzle_types::{Position, SoundCue};
//!
//! let a = Position::new(1.0, 2.0);
//! let b = a + Position::new(0.5, -1.0);
//! assert_eq!(b, Position::new(1.5, 1.0));
//! assert_eq!(a.distance_squared(b), 1.25);
//!
//! assert_eq!(SoundCue::from_str("gameOver"), Some(SoundCue::GameOver));
//! ```

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Squared-distance tolerance for matching a position to a slot (exclusive)
pub const DEFAULT_TOLERANCE: f32 = 0.3;

/// Number of spawn points, which is also the spawn queue length
pub const DEFAULT_SPAWN_COUNT: usize = 3;

/// Upper bound on spawn points supported by fixed-capacity spawn storage
pub const MAX_SPAWNS: usize = 8;

/// Standard board width in slots
pub const DEFAULT_BOARD_WIDTH: usize = 8;

/// Standard board height in slots
pub const DEFAULT_BOARD_HEIGHT: usize = 8;

/// Number of distinct piece colours handed out by the default provider
pub const DEFAULT_PALETTE_SIZE: u8 = 6;

/// Points awarded for every square placed on the board
pub const POINTS_PER_PLACED_SQUARE: i64 = 1;

/// Points awarded for every square removed by a line clear
pub const POINTS_PER_CLEARED_SQUARE: i64 = 1;


/// A point in board space
///
/// Slot positions, square positions and shape offsets all use this type.
/// Equality is exact; matching against slots goes through
/// [`Position::distance_squared`] and a tolerance instead.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// The origin, used as the anchor offset of every shape
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`
    #[inline]
    pub fn distance_squared(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Rotate counter-clockwise around the origin by `turns * 90°`
    ///
    /// Quarter turns are exact (no trigonometry), so integer offsets stay integral.
    pub fn rotated_quarter_turns(self, turns: u8) -> Self {
        match turns % 4 {
            0 => self,
            1 => Self::new(-self.y, self.x),
            2 => Self::new(-self.x, -self.y),
            _ => Self::new(self.y, -self.x),
        }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Dense index of a slot in the board's row-major slot list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub usize);

/// Identity of a square committed to the board
///
/// Issued monotonically by the session when a piece is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SquareId(pub u32);

/// Identity of an active piece, issued when it is dequeued to a spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// Index of a spawn point (0-based)
pub type SpawnIndex = usize;

/// Rendering identity of a piece (palette index)
pub type ColorId = u8;

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece#{}", self.0)
    }
}

/// Sound effects the rules core asks the presentation layer to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// A session has started
    Start,
    /// A piece has been committed to the board
    PiecePlaced,
    /// At least one line was cleared this turn
    SquaresRemoved,
    /// No active piece can be placed any more
    GameOver,
}

impl SoundCue {
    /// Parse cue from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(SoundCue::Start),
            "pieceplaced" => Some(SoundCue::PiecePlaced),
            "squaresremoved" => Some(SoundCue::SquaresRemoved),
            "gameover" => Some(SoundCue::GameOver),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Start => "start",
            SoundCue::PiecePlaced => "piecePlaced",
            SoundCue::SquaresRemoved => "squaresRemoved",
            SoundCue::GameOver => "gameOver",
        }
    }
}

/// Where an active piece currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceLocation {
    /// Being dragged by the player
    InTransit,
    /// Resting at the given spawn point
    Docked(SpawnIndex),
}

/// Result of a placement attempt that was well-formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementVerdict {
    Accepted,
    Rejected,
}
