//! Line clearing - two-phase mark then remove
//!
//! Rows and columns are scanned together first, marking every slot of every
//! complete line. Removal runs once afterwards, so a slot in both a complete
//! row and a complete column is cleared and scored exactly once. Unlike
//! falling-block games nothing shifts: cleared slots simply become empty.

use arrayvec::ArrayVec;

use crate::grid::SpatialGrid;
use crate::score::Score;
use crate::types::{SlotId, SquareId, POINTS_PER_CLEARED_SQUARE};

/// Maximum number of complete lines reported per axis
///
/// Boards larger than this still clear every complete line; only the
/// per-axis index lists in [`LineScan`] are truncated.
pub const MAX_REPORTED_LINES: usize = 32;

/// Result of scanning the board for complete lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineScan {
    /// At least one row or column is complete
    pub any_complete: bool,
    /// Indices of complete rows
    pub rows: ArrayVec<usize, MAX_REPORTED_LINES>,
    /// Indices of complete columns
    pub columns: ArrayVec<usize, MAX_REPORTED_LINES>,
    /// Every slot marked for removal, without duplicates
    pub marked: Vec<SlotId>,
}

impl LineScan {
    /// Number of complete lines (rows plus columns)
    pub fn line_count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }
}

/// Squares removed by [`apply_removal`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Removal {
    pub removed: Vec<SquareId>,
    pub points: i64,
}

impl Removal {
    pub fn count(&self) -> usize {
        self.removed.len()
    }
}

fn mark_complete(
    grid: &mut SpatialGrid,
    lines: &[Vec<SlotId>],
    found: &mut ArrayVec<usize, MAX_REPORTED_LINES>,
    marked: &mut Vec<SlotId>,
) -> bool {
    let mut any = false;
    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() || !grid.is_line_full(line) {
            continue;
        }
        any = true;
        if found.try_push(index).is_err() {
            log::warn!(
                "line {} complete but not reported: more than {} on one axis",
                index,
                MAX_REPORTED_LINES
            );
        }
        for &id in line {
            if grid.mark_for_removal(id) {
                marked.push(id);
            }
        }
    }
    any
}

/// Mark every slot of every complete row and column.
///
/// Marking is idempotent; the grid's occupancy is not changed.
pub fn scan_complete_lines(grid: &mut SpatialGrid) -> LineScan {
    let mut scan = LineScan::default();

    // Group lists are immutable after build; clone the ids so marks can be written.
    let rows = grid.rows().to_vec();
    let columns = grid.columns().to_vec();

    let rows_done = mark_complete(grid, &rows, &mut scan.rows, &mut scan.marked);
    let cols_done = mark_complete(grid, &columns, &mut scan.columns, &mut scan.marked);
    scan.any_complete = rows_done || cols_done;

    if scan.any_complete {
        log::debug!(
            "complete lines: rows {:?}, columns {:?} ({} slots marked)",
            scan.rows,
            scan.columns,
            scan.marked.len()
        );
    }
    scan
}

/// Vacate every marked slot, scoring one point per removed square.
///
/// Every removal mark is reset afterwards, whether or not the slot held a
/// square. Call once per turn after [`scan_complete_lines`].
pub fn apply_removal(grid: &mut SpatialGrid, score: &mut Score) -> Removal {
    let mut removal = Removal::default();
    for index in 0..grid.len() {
        if let Some(square) = grid.take_if_marked(SlotId(index)) {
            score.add(POINTS_PER_CLEARED_SQUARE);
            removal.points += POINTS_PER_CLEARED_SQUARE;
            removal.removed.push(square);
        }
    }
    removal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::grid_positions;

    fn board(w: usize, h: usize) -> SpatialGrid {
        SpatialGrid::build(&grid_positions(w, h, 1.0), w, h).unwrap()
    }

    #[test]
    fn full_row_is_cleared_and_scored() {
        let mut grid = board(4, 4);
        let mut score = Score::new(0);
        grid.fill(grid.rows()[0].clone());
        // A partial column must survive.
        grid.fill([SlotId(5), SlotId(9)]);

        let scan = scan_complete_lines(&mut grid);
        assert!(scan.any_complete);
        assert_eq!(scan.rows.as_slice(), &[0]);
        assert!(scan.columns.is_empty());
        assert_eq!(scan.marked, grid.rows()[0]);

        let removal = apply_removal(&mut grid, &mut score);
        assert_eq!(removal.count(), 4);
        assert_eq!(score.current(), 4);
        assert!(grid.is_occupied(SlotId(5)));
        assert!(grid.is_occupied(SlotId(9)));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn crossing_slot_is_scored_once() {
        let mut grid = board(3, 3);
        let mut score = Score::new(0);
        grid.fill(grid.rows()[1].clone());
        grid.fill([SlotId(1), SlotId(7)]);

        let scan = scan_complete_lines(&mut grid);
        assert_eq!(scan.line_count(), 2);
        assert_eq!(scan.marked.len(), 5);

        let removal = apply_removal(&mut grid, &mut score);
        assert_eq!(removal.count(), 5);
        assert_eq!(score.current(), 5);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn scan_without_complete_lines_is_noop() {
        let mut grid = board(3, 3);
        let mut score = Score::new(0);
        grid.fill([SlotId(0), SlotId(4)]);
        let before = grid.clone();

        let scan = scan_complete_lines(&mut grid);
        let removal = apply_removal(&mut grid, &mut score);

        assert!(!scan.any_complete);
        assert!(scan.marked.is_empty());
        assert_eq!(removal, Removal::default());
        assert_eq!(grid, before);
        assert_eq!(score.current(), 0);
    }

    #[test]
    fn report_is_capped_but_every_line_clears() {
        let width = MAX_REPORTED_LINES + 1;
        let mut grid = board(width, 1);
        let mut score = Score::new(0);
        grid.fill((0..width).map(SlotId));

        let scan = scan_complete_lines(&mut grid);
        assert_eq!(scan.rows.as_slice(), &[0]);
        assert_eq!(scan.columns.len(), MAX_REPORTED_LINES);
        assert_eq!(scan.marked.len(), width);

        let removal = apply_removal(&mut grid, &mut score);
        assert_eq!(removal.count(), width);
        assert_eq!(grid.occupied_count(), 0);
    }
}
