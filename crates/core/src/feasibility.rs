//! Feasibility - can a shape still go anywhere on the board?
//!
//! Every empty slot is tried as the anchor of the shape, stopping at the
//! first fit. Cost is `O(empty_slots * shape_len)` slot lookups per shape,
//! which is fine for boards of a few dozen slots and runs once per piece
//! after every turn.

use crate::grid::SpatialGrid;
use crate::piece::ActivePiece;
use crate::placement::{probe, Tolerance};
use crate::shape::PieceShape;
use crate::types::{PieceId, SlotId, SpawnIndex};

/// First empty slot that works as an anchor for `shape`
pub fn find_anchor(shape: &PieceShape, grid: &SpatialGrid, tolerance: Tolerance) -> Option<SlotId> {
    if shape.is_empty() {
        return None;
    }
    grid.empty_slots().find(|&id| {
        grid.slot(id)
            .is_some_and(|slot| probe(shape, slot.position(), grid, tolerance))
    })
}

/// Check if `shape` fits somewhere on the current board
pub fn is_piece_placeable(shape: &PieceShape, grid: &SpatialGrid, tolerance: Tolerance) -> bool {
    find_anchor(shape, grid, tolerance).is_some()
}

/// Placeable verdict for one active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceVerdict {
    pub piece: PieceId,
    pub spawn: SpawnIndex,
    pub placeable: bool,
    /// The piece's flag flipped during this check
    pub changed: bool,
}

/// Outcome of checking every active piece
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayabilityReport {
    /// One verdict per checked piece, in iteration order
    pub verdicts: Vec<PieceVerdict>,
    pub placeable: usize,
}

impl PlayabilityReport {
    /// No active piece can be placed: the game has ended
    pub fn game_over(&self) -> bool {
        self.placeable == 0
    }

    pub fn verdict(&self, piece: PieceId) -> Option<&PieceVerdict> {
        self.verdicts.iter().find(|v| v.piece == piece)
    }
}

/// Re-evaluate every active piece, updating its placeable flag.
///
/// An empty piece set reports zero placeable pieces.
pub fn check_active_pieces<'a>(
    pieces: impl IntoIterator<Item = &'a mut ActivePiece>,
    grid: &SpatialGrid,
    tolerance: Tolerance,
) -> PlayabilityReport {
    let mut report = PlayabilityReport::default();
    for piece in pieces {
        let placeable = is_piece_placeable(piece.shape(), grid, tolerance);
        let changed = piece.set_placeable(placeable);
        if placeable {
            report.placeable += 1;
        }
        report.verdicts.push(PieceVerdict {
            piece: piece.id(),
            spawn: piece.spawn(),
            placeable,
            changed,
        });
    }
    log::trace!(
        "playability: {}/{} pieces placeable",
        report.placeable,
        report.verdicts.len()
    );
    report
}
