//! Grid module - indexes slot positions into rows and columns
//!
//! The board is built once from an unordered list of slot positions.
//! Slots are stored row-major: sorted by `y` then `x`, so every contiguous
//! run of `width` slots is one row and `SlotId(row * width + col)` addresses
//! a slot. Column groups are the same slots sorted by `x` then `y`.
//! Row 0 is the row with the smallest `y`.
//!
//! Positions never move after construction, so the row and column groups
//! are computed once and never change. Only occupancy and removal marks
//! are mutable, and only from inside this crate.

use std::cmp::Ordering;

use crate::error::ConfigError;
use crate::placement::Tolerance;
use crate::types::{Position, SlotId, SquareId};

/// One fixed board cell
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    position: Position,
    row: usize,
    col: usize,
    occupant: Option<SquareId>,
    pending_removal: bool,
}

impl Slot {
    fn new(position: Position, row: usize, col: usize) -> Self {
        Self {
            position,
            row,
            col,
            occupant: None,
            pending_removal: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn occupant(&self) -> Option<SquareId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }
}

fn cmp_rows(a: &Position, b: &Position) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

fn cmp_columns(a: &Position, b: &Position) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// The board: slots plus their derived row and column groups
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    width: usize,
    height: usize,
    /// Row-major slot storage, indexed by `SlotId`
    slots: Vec<Slot>,
    rows: Vec<Vec<SlotId>>,
    columns: Vec<Vec<SlotId>>,
}

impl SpatialGrid {
    /// Build the grid from unordered slot positions.
    ///
    /// Fails with [`ConfigError::BoardMismatch`] when the number of positions
    /// is not `width * height` or that product overflows. Positions must be pairwise farther apart than
    /// the matching tolerance; coinciding positions give unspecified groups.
    pub fn build(positions: &[Position], width: usize, height: usize) -> Result<Self, ConfigError> {
        let expected = width.checked_mul(height);
        if expected != Some(positions.len()) {
            return Err(ConfigError::BoardMismatch {
                expected: expected.unwrap_or(usize::MAX),
                actual: positions.len(),
            });
        }

        let mut ordered = positions.to_vec();
        ordered.sort_by(cmp_rows);

        let slots: Vec<Slot> = ordered
            .iter()
            .enumerate()
            .map(|(i, &p)| Slot::new(p, i / width.max(1), i % width.max(1)))
            .collect();

        let rows: Vec<Vec<SlotId>> = (0..height)
            .map(|r| (r * width..(r + 1) * width).map(SlotId).collect())
            .collect();

        let mut by_column: Vec<SlotId> = (0..slots.len()).map(SlotId).collect();
        by_column.sort_by(|a, b| cmp_columns(&slots[a.0].position, &slots[b.0].position));
        let columns: Vec<Vec<SlotId>> = by_column
            .chunks(height.max(1))
            .take(width)
            .map(|chunk| chunk.to_vec())
            .collect();

        log::debug!(
            "built {}x{} grid ({} slots, {} rows, {} columns)",
            width,
            height,
            slots.len(),
            rows.len(),
            columns.len()
        );

        Ok(Self {
            width,
            height,
            slots,
            rows,
            columns,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of slots (`width * height`)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in row-major order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.0)
    }

    /// Slot at `(row, col)`, if inside the board
    pub fn slot_at(&self, row: usize, col: usize) -> Option<SlotId> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(SlotId(row * self.width + col))
    }

    /// `(row, col)` of a slot
    pub fn coords(&self, id: SlotId) -> Option<(usize, usize)> {
        self.slot(id).map(|slot| (slot.row, slot.col))
    }

    /// `height` groups of `width` slots, ordered by `y` then `x`
    pub fn rows(&self) -> &[Vec<SlotId>] {
        &self.rows
    }

    /// `width` groups of `height` slots, ordered by `x` then `y`
    pub fn columns(&self) -> &[Vec<SlotId>] {
        &self.columns
    }

    pub fn row(&self, index: usize) -> Option<&[SlotId]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn column(&self, index: usize) -> Option<&[SlotId]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Check if a slot exists and holds a square
    pub fn is_occupied(&self, id: SlotId) -> bool {
        self.slot(id).is_some_and(Slot::is_occupied)
    }

    /// Ids of every currently empty slot, in slot order
    pub fn empty_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_occupied())
            .map(|(i, _)| SlotId(i))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_occupied()).count()
    }

    /// Check if every slot holds a square
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Slot::is_occupied)
    }

    /// Check if every slot of a line is occupied
    pub fn is_line_full(&self, line: &[SlotId]) -> bool {
        line.iter().all(|&id| self.is_occupied(id))
    }

    /// First slot (lowest id) whose position matches `position` within tolerance
    pub fn find_slot(&self, position: Position, tolerance: Tolerance) -> Option<SlotId> {
        self.slots
            .iter()
            .position(|slot| tolerance.matches(slot.position, position))
            .map(SlotId)
    }

    pub(crate) fn occupy(&mut self, id: SlotId, square: SquareId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.occupant = Some(square);
        }
    }

    /// Mark an occupied slot for removal. Empty slots are left unmarked.
    /// Returns true if the slot was newly marked.
    pub(crate) fn mark_for_removal(&mut self, id: SlotId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) if slot.is_occupied() && !slot.pending_removal => {
                slot.pending_removal = true;
                true
            }
            _ => false,
        }
    }

    /// Vacate a marked slot and reset its mark. Returns the removed square.
    pub(crate) fn take_if_marked(&mut self, id: SlotId) -> Option<SquareId> {
        let slot = self.slots.get_mut(id.0)?;
        let removed = if slot.pending_removal {
            slot.occupant.take()
        } else {
            None
        };
        slot.pending_removal = false;
        removed
    }

    /// Empty every slot and drop every mark
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.occupant = None;
            slot.pending_removal = false;
        }
    }

    /// Occupy slots directly, bypassing placement validation (for testing)
    #[cfg(test)]
    pub(crate) fn fill(&mut self, ids: impl IntoIterator<Item = SlotId>) {
        for (n, id) in ids.into_iter().enumerate() {
            self.occupy(id, SquareId(10_000 + n as u32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::grid_positions;

    fn shuffled(mut positions: Vec<Position>) -> Vec<Position> {
        // Deterministic reversal plus interleave is enough to lose the input order.
        positions.reverse();
        let (a, b): (Vec<_>, Vec<_>) = positions.iter().enumerate().partition(|(i, _)| i % 2 == 0);
        a.into_iter().chain(b).map(|(_, p)| *p).collect()
    }

    #[test]
    fn build_orders_rows_then_columns() {
        let grid = SpatialGrid::build(&shuffled(grid_positions(3, 2, 1.0)), 3, 2).unwrap();

        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.columns().len(), 3);
        for (r, row) in grid.rows().iter().enumerate() {
            assert_eq!(row.len(), 3);
            for (c, &id) in row.iter().enumerate() {
                let slot = grid.slot(id).unwrap();
                assert_eq!(slot.position(), Position::new(c as f32, r as f32));
                assert_eq!((slot.row(), slot.col()), (r, c));
            }
        }
        for (c, column) in grid.columns().iter().enumerate() {
            assert_eq!(column.len(), 2);
            for (r, &id) in column.iter().enumerate() {
                assert_eq!(grid.slot_at(r, c), Some(id));
            }
        }
    }

    #[test]
    fn build_rejects_wrong_slot_count() {
        let err = SpatialGrid::build(&grid_positions(3, 3, 1.0)[..8], 3, 3).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BoardMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn find_slot_prefers_lowest_id() {
        let grid = SpatialGrid::build(&grid_positions(2, 1, 1.0), 2, 1).unwrap();
        let tol = Tolerance::new(1.0);
        // Equidistant (0.25) from both slots.
        assert_eq!(grid.find_slot(Position::new(0.5, 0.0), tol), Some(SlotId(0)));
        assert_eq!(grid.find_slot(Position::new(5.0, 0.0), tol), None);
    }

    #[test]
    fn marks_only_apply_to_occupied_slots() {
        let mut grid = SpatialGrid::build(&grid_positions(2, 2, 1.0), 2, 2).unwrap();
        grid.fill([SlotId(0)]);

        assert!(grid.mark_for_removal(SlotId(0)));
        assert!(!grid.mark_for_removal(SlotId(0)), "second mark is a no-op");
        assert!(!grid.mark_for_removal(SlotId(1)), "empty slot is never marked");

        assert!(grid.take_if_marked(SlotId(0)).is_some());
        assert!(!grid.is_occupied(SlotId(0)));
        assert!(!grid.slot(SlotId(0)).unwrap().is_pending_removal());
        assert_eq!(grid.take_if_marked(SlotId(1)), None);
    }

    #[test]
    fn overflowing_dimensions_are_a_mismatch() {
        let err = SpatialGrid::build(&[], usize::MAX / 2 + 1, 2).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BoardMismatch {
                expected: usize::MAX,
                actual: 0
            }
        );
        // Wraps to zero in unchecked arithmetic.
        assert!(SpatialGrid::build(&[], 1 << (usize::BITS - 2), 4).is_err());
    }

    #[test]
    fn clear_empties_board() {
        let mut grid = SpatialGrid::build(&grid_positions(2, 2, 1.0), 2, 2).unwrap();
        grid.fill(grid.rows()[0].clone());
        assert_eq!(grid.occupied_count(), 2);
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.empty_slots().count(), 4);
    }
}
