//! Placement module - snapping continuous positions onto slots
//!
//! A position lands on a slot when the squared distance between the two is
//! strictly below the [`Tolerance`]. The same policy drives both the dry-run
//! [`probe`] used for feasibility checks and [`resolve_assignment`] used when
//! the player releases a piece, so the two can never disagree.

use serde::{Deserialize, Serialize};

use crate::grid::SpatialGrid;
use crate::score::Score;
use crate::shape::PieceShape;
use crate::types::{Position, SlotId, SquareId, DEFAULT_TOLERANCE, POINTS_PER_PLACED_SQUARE};

/// Squared-distance matching tolerance (exclusive upper bound)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance(f32);

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance(DEFAULT_TOLERANCE);

    pub const fn new(squared: f32) -> Self {
        Self(squared)
    }

    pub fn squared(self) -> f32 {
        self.0
    }

    /// Check if two positions coincide under this tolerance
    #[inline]
    pub fn matches(self, a: Position, b: Position) -> bool {
        a.distance_squared(b) < self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Check whether `shape` fits with its anchor at `anchor`, without placing it.
///
/// Every offset must resolve to a distinct, currently empty slot.
pub fn probe(shape: &PieceShape, anchor: Position, grid: &SpatialGrid, tolerance: Tolerance) -> bool {
    let mut claimed: Vec<SlotId> = Vec::with_capacity(shape.len());
    for cell in shape.cells_at(anchor) {
        let Some(id) = grid.find_slot(cell, tolerance) else {
            return false;
        };
        if grid.is_occupied(id) || claimed.contains(&id) {
            return false;
        }
        claimed.push(id);
    }
    true
}

/// A validated square-to-slot mapping for one released piece
///
/// Pairs hold the square's index within the released piece and its target
/// slot, in the order the slots were claimed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    pairs: Vec<(usize, SlotId)>,
}

impl Assignment {
    pub fn pairs(&self) -> &[(usize, SlotId)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Target slot for the square at `square` index
    pub fn slot_for(&self, square: usize) -> Option<SlotId> {
        self.pairs
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|&(_, slot)| slot)
    }

    /// Slot ids in claim order
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.pairs.iter().map(|&(_, slot)| slot)
    }
}

/// Map released square positions onto empty slots.
///
/// Walks empty slots in slot order; each one claims the first unassigned
/// square within tolerance. Returns `None` unless every square was claimed.
/// Nothing is mutated either way.
pub fn resolve_assignment(
    squares: &[Position],
    grid: &SpatialGrid,
    tolerance: Tolerance,
) -> Option<Assignment> {
    let mut taken = vec![false; squares.len()];
    let mut pairs = Vec::with_capacity(squares.len());

    for slot_id in grid.empty_slots() {
        if pairs.len() == squares.len() {
            break;
        }
        let slot_pos = grid.slot(slot_id)?.position();
        let hit = squares
            .iter()
            .enumerate()
            .find(|&(i, &sq)| !taken[i] && tolerance.matches(slot_pos, sq));
        if let Some((i, _)) = hit {
            taken[i] = true;
            pairs.push((i, slot_id));
        }
    }

    if pairs.len() == squares.len() {
        Some(Assignment { pairs })
    } else {
        log::trace!(
            "assignment failed: {}/{} squares matched",
            pairs.len(),
            squares.len()
        );
        None
    }
}

/// Occupy the assigned slots and award points per square.
///
/// Square `i` of the piece becomes `SquareId(first_square.0 + i)`. The
/// assignment must come from [`resolve_assignment`] on the current grid.
/// Returns the points awarded.
pub fn commit(
    assignment: &Assignment,
    grid: &mut SpatialGrid,
    score: &mut Score,
    first_square: SquareId,
) -> i64 {
    let mut points = 0;
    for &(square, slot) in assignment.pairs() {
        grid.occupy(slot, SquareId(first_square.0 + square as u32));
        score.add(POINTS_PER_PLACED_SQUARE);
        points += POINTS_PER_PLACED_SQUARE;
    }
    points
}
