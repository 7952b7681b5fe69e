//! Board snapshots for front ends, logs and tests

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::grid::SpatialGrid;
use crate::piece::ActivePiece;
use crate::score::Score;
use crate::types::{ColorId, PieceId, Position, SpawnIndex, SquareId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSnapshot {
    pub spawn: SpawnIndex,
    pub piece: PieceId,
    pub color: ColorId,
    pub placeable: bool,
    pub offsets: Vec<Position>,
}

impl From<&ActivePiece> for SpawnSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            spawn: value.spawn(),
            piece: value.id(),
            color: value.color(),
            placeable: value.is_placeable(),
            offsets: value.shape().offsets().to_vec(),
        }
    }
}

/// Read-only copy of everything a front end draws between turns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major occupants, `cells[row * width + col]`
    pub cells: Vec<Option<SquareId>>,
    /// FNV-1a over the occupancy bitmap
    pub board_hash: u64,
    pub spawns: Vec<SpawnSnapshot>,
    pub score: i64,
    pub high_score: i64,
    pub game_over: bool,
}

fn fnv1a64(bytes: impl Iterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

impl BoardSnapshot {
    pub fn capture<'a>(
        grid: &SpatialGrid,
        pieces: impl Iterator<Item = &'a ActivePiece>,
        score: &Score,
        game_over: bool,
    ) -> Self {
        let cells: Vec<Option<SquareId>> = grid.slots().iter().map(|s| s.occupant()).collect();
        let board_hash = fnv1a64(cells.iter().map(|c| c.is_some() as u8));
        Self {
            width: grid.width(),
            height: grid.height(),
            cells,
            board_hash,
            spawns: pieces.map(SpawnSnapshot::from).collect(),
            score: score.current(),
            high_score: score.high(),
            game_over,
        }
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height
            && col < self.width
            && self.cells.get(row * self.width + col).is_some_and(Option::is_some)
    }

    /// One text line per row, row 0 first: `#` occupied, `.` empty
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                out.push(if self.is_occupied(row, col) { '#' } else { '.' });
            }
            out.push('\n');
        }
        let _ = write!(out, "score {} (high {})", self.score, self.high_score);
        if self.game_over {
            out.push_str(" - game over");
        }
        out
    }
}
