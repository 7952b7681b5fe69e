//! Core rules for the block puzzle - pure, deterministic, and testable
//!
//! This crate contains the board model, placement validation, line clearing,
//! scoring and the turn loop. It has **zero dependencies** on rendering, input
//! or storage: everything outside the rules is injected through small traits.
//!
//! - **Deterministic**: the same seed and the same drops produce the same game
//! - **Headless**: the caller supplies square positions, the core answers
//!
//! # Module Structure
//!
//! - [`grid`]: slots built from unordered positions, grouped into rows and columns
//! - [`shape`]: piece shapes as offsets from an anchor square, plus the standard catalog
//! - [`placement`]: tolerance matching, probing and committing a drop
//! - [`feasibility`]: "can this piece go anywhere?" and the game-over check
//! - [`lines`]: two-phase complete-line marking and removal
//! - [`score`]: current and high score, and the [`HighScoreStore`] seam
//! - [`queue`]: the fixed-length spawn queue and [`ShapeProvider`]s
//! - [`session`]: [`GameSession`], the turn state machine tying it all together
//! - [`observer`]: presentation callbacks
//!
//! # Game Rules
//!
//! - A drop is accepted only if every square lands within the tolerance of a
//!   distinct empty slot; otherwise nothing changes
//! - Each placed square is worth one point, each cleared square another
//! - Full rows and full columns clear together; a slot on both clears once
//! - The vacated spawn is refilled from the queue immediately
//! - The game ends when no active piece fits anywhere
//!
//! # Example
//!
//! ```
//! use block_puzzle_core::{GameConfig, GameSession};
//! use block_puzzle_core::types::SlotId;
//!
//! let config = GameConfig::standard();
//! let mut session = GameSession::seeded(&config, 12345).unwrap();
//!
//! let piece = session.active_pieces().next().unwrap().id();
//! let anchor = session.active_pieces().next().and_then(|p| {
//!     block_puzzle_core::feasibility::find_anchor(p.shape(), session.board(), session.tolerance())
//! });
//! let outcome = session.place_at(piece, anchor.unwrap_or(SlotId(0))).unwrap();
//!
//! assert!(outcome.is_accepted());
//! assert!(session.score().current() > 0);
//! ```

pub mod config;
pub mod error;
pub mod feasibility;
pub mod grid;
pub mod lines;
pub mod observer;
pub mod piece;
pub mod placement;
pub mod queue;
pub mod rng;
pub mod score;
pub mod session;
pub mod shape;
pub mod snapshot;

pub use block_puzzle_types as types;

// Re-export commonly used types for convenience
pub use config::{grid_positions, GameConfig};
pub use error::{ConfigError, SessionError};
pub use feasibility::{check_active_pieces, find_anchor, is_piece_placeable, PlayabilityReport};
pub use grid::{Slot, SpatialGrid};
pub use lines::{apply_removal, scan_complete_lines, LineScan, Removal};
pub use observer::{GameEvent, GameObserver, NullObserver, RecordingObserver};
pub use piece::{ActivePiece, QueuedPiece};
pub use placement::{commit, probe, resolve_assignment, Assignment, Tolerance};
pub use queue::{CyclingShapeProvider, SeededShapeProvider, ShapeProvider, SpawnQueue};
pub use rng::SimpleRng;
pub use score::{HighScoreStore, MemoryHighScoreStore, Score, ScoreUpdate};
pub use session::{GameSession, PlacementOutcome, TurnPhase, TurnReport};
pub use shape::{standard_catalog, PieceShape};
pub use snapshot::{BoardSnapshot, SpawnSnapshot};
