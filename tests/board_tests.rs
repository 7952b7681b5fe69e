//! Board tests - slot grid construction and grouping

use block_puzzle::core::{grid_positions, ConfigError, SpatialGrid, Tolerance};
use block_puzzle::types::{Position, SlotId};

fn shuffled(mut positions: Vec<Position>) -> Vec<Position> {
    // Deterministic interleave: reverse, then swap neighbours.
    positions.reverse();
    for pair in positions.chunks_mut(2) {
        pair.swap(0, pair.len() - 1);
    }
    positions
}

#[test]
fn test_build_groups_rows_and_columns() {
    let grid = SpatialGrid::build(&shuffled(grid_positions(4, 3, 1.0)), 4, 3).unwrap();

    assert_eq!(grid.len(), 12);
    assert_eq!(grid.rows().len(), 3);
    assert_eq!(grid.columns().len(), 4);
    assert!(grid.rows().iter().all(|r| r.len() == 4));
    assert!(grid.columns().iter().all(|c| c.len() == 3));

    // Every slot is in exactly one row and one column.
    for id in (0..grid.len()).map(SlotId) {
        let in_rows = grid.rows().iter().filter(|r| r.contains(&id)).count();
        let in_cols = grid.columns().iter().filter(|c| c.contains(&id)).count();
        assert_eq!((in_rows, in_cols), (1, 1), "{id}");
    }
}

#[test]
fn test_rows_share_y_and_columns_share_x() {
    let grid = SpatialGrid::build(&shuffled(grid_positions(3, 3, 2.0)), 3, 3).unwrap();

    for (r, row) in grid.rows().iter().enumerate() {
        for &id in row {
            let slot = grid.slot(id).unwrap();
            assert_eq!(slot.position().y, r as f32 * 2.0);
            assert_eq!(slot.row(), r);
        }
    }
    for (c, column) in grid.columns().iter().enumerate() {
        for &id in column {
            assert_eq!(grid.slot(id).unwrap().position().x, c as f32 * 2.0);
        }
    }
}

#[test]
fn test_build_rejects_wrong_count() {
    let mut positions = grid_positions(3, 3, 1.0);
    positions.pop();

    let err = SpatialGrid::build(&positions, 3, 3).unwrap_err();
    assert_eq!(
        err,
        ConfigError::BoardMismatch {
            expected: 9,
            actual: 8
        }
    );
    assert_eq!(err.code(), "board_mismatch");
}

#[test]
fn test_new_grid_is_empty() {
    let grid = SpatialGrid::build(&grid_positions(5, 5, 1.0), 5, 5).unwrap();
    assert_eq!(grid.occupied_count(), 0);
    assert_eq!(grid.empty_slots().count(), 25);
    assert!(!grid.is_full());
    assert!(grid.slots().iter().all(|s| !s.is_pending_removal()));
}

#[test]
fn test_find_slot_uses_tolerance() {
    let grid = SpatialGrid::build(&grid_positions(3, 3, 1.0), 3, 3).unwrap();
    let tol = Tolerance::DEFAULT;

    assert_eq!(grid.find_slot(Position::new(1.0, 1.0), tol), grid.slot_at(1, 1));
    assert_eq!(grid.find_slot(Position::new(1.3, 1.3), tol), grid.slot_at(1, 1));
    assert_eq!(grid.find_slot(Position::new(1.5, 1.5), tol), None);
    assert_eq!(grid.find_slot(Position::new(-2.0, 0.0), tol), None);
}

#[test]
fn test_coords_match_slot_at() {
    let grid = SpatialGrid::build(&shuffled(grid_positions(4, 2, 1.0)), 4, 2).unwrap();
    for row in 0..2 {
        for col in 0..4 {
            let id = grid.slot_at(row, col).unwrap();
            assert_eq!(grid.coords(id), Some((row, col)));
        }
    }
    assert_eq!(grid.coords(SlotId(8)), None);
    assert_eq!(grid.slot_at(2, 0), None);
}
