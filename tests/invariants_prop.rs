//! Property tests for board and turn-loop invariants
//!
//! - Grid build puts every slot in exactly one row and one column, whatever
//!   the input order.
//! - Scanning and removing twice is the same as doing it once.
//! - Over random playouts the queue length and spawn count stay fixed, the
//!   score never drops, each turn scores placed + cleared squares, and no
//!   complete line or removal mark survives a turn.

use proptest::prelude::*;

use block_puzzle::core::{
    apply_removal, commit, grid_positions, probe, resolve_assignment, scan_complete_lines,
    GameConfig, GameSession, Score, SpatialGrid, Tolerance,
};
use block_puzzle::types::{Position, SlotId, SquareId};

fn shuffled_board() -> impl Strategy<Value = (usize, usize, Vec<Position>)> {
    (1usize..7, 1usize..7).prop_flat_map(|(w, h)| {
        (
            Just(w),
            Just(h),
            Just(grid_positions(w, h, 1.5)).prop_shuffle(),
        )
    })
}

fn no_complete_lines(grid: &SpatialGrid) -> bool {
    grid.rows()
        .iter()
        .chain(grid.columns().iter())
        .all(|line| !grid.is_line_full(line))
}

proptest! {
    #[test]
    fn build_partitions_slots((w, h, positions) in shuffled_board()) {
        let grid = SpatialGrid::build(&positions, w, h).unwrap();

        prop_assert_eq!(grid.rows().len(), h);
        prop_assert_eq!(grid.columns().len(), w);
        for id in (0..grid.len()).map(SlotId) {
            let rows = grid.rows().iter().filter(|r| r.contains(&id)).count();
            let cols = grid.columns().iter().filter(|c| c.contains(&id)).count();
            prop_assert_eq!((rows, cols), (1, 1));
        }
        for row in grid.rows() {
            let y = grid.slot(row[0]).unwrap().position().y;
            prop_assert!(row.iter().all(|&id| grid.slot(id).unwrap().position().y == y));
        }
        for column in grid.columns() {
            let x = grid.slot(column[0]).unwrap().position().x;
            prop_assert!(column.iter().all(|&id| grid.slot(id).unwrap().position().x == x));
        }
    }

    #[test]
    fn scan_and_apply_twice_equals_once(
        occupied in proptest::collection::vec(any::<bool>(), 25),
    ) {
        let mut grid = SpatialGrid::build(&grid_positions(5, 5, 1.0), 5, 5).unwrap();
        let mut score = Score::new(0);
        for (n, _) in occupied.iter().enumerate().filter(|(_, o)| **o) {
            let pos = grid.slot(SlotId(n)).unwrap().position();
            let assignment = resolve_assignment(&[pos], &grid, Tolerance::DEFAULT).unwrap();
            commit(&assignment, &mut grid, &mut score, SquareId(n as u32));
        }

        scan_complete_lines(&mut grid);
        let removal = apply_removal(&mut grid, &mut score);
        let once = (grid.clone(), score);

        scan_complete_lines(&mut grid);
        let again = apply_removal(&mut grid, &mut score);

        prop_assert_eq!(again.count(), 0);
        prop_assert_eq!((grid.clone(), score), once);
        prop_assert!(no_complete_lines(&grid));
        prop_assert!(removal.count() <= occupied.iter().filter(|&&o| o).count());
    }

    #[test]
    fn random_playout_respects_turn_invariants(
        seed in any::<u32>(),
        steps in 1usize..60,
        size in 4usize..9,
    ) {
        let config = GameConfig::with_board(size, size);
        let mut session = GameSession::seeded(&config, seed).unwrap();

        for i in 0..steps {
            if session.is_game_over() {
                break;
            }
            let placeable: Vec<_> = session
                .active_pieces()
                .filter(|p| p.is_placeable())
                .map(|p| (p.id(), p.shape().clone()))
                .collect();
            prop_assert!(!placeable.is_empty());
            let (piece, shape) = &placeable[(seed as usize).wrapping_add(i) % placeable.len()];

            let anchors: Vec<SlotId> = session
                .board()
                .empty_slots()
                .filter(|&id| {
                    let pos = session.board().slot(id).unwrap().position();
                    probe(shape, pos, session.board(), session.tolerance())
                })
                .collect();
            prop_assert!(!anchors.is_empty());
            let slot = anchors[(seed as usize).wrapping_mul(31).wrapping_add(i) % anchors.len()];

            let before = session.score().current();
            let outcome = session.place_at(*piece, slot).unwrap();
            let report = outcome.report().unwrap();

            prop_assert_eq!(report.placement_points, shape.len() as i64);
            prop_assert_eq!(report.clear_points, report.cleared_squares.len() as i64);
            prop_assert_eq!(session.score().current(), before + report.points());
            prop_assert!(session.score().high() >= session.score().current());
            prop_assert_eq!(session.queue().len(), config.spawn_count);
            prop_assert_eq!(session.active_pieces().count(), config.spawn_count);
            prop_assert!(session.board().slots().iter().all(|s| !s.is_pending_removal()));
            prop_assert!(no_complete_lines(session.board()));
            prop_assert_eq!(
                session.is_game_over(),
                session.active_pieces().all(|p| !p.is_placeable())
            );
        }
    }
}
