//! Shape module - pieces as anchor-relative offsets
//!
//! A [`PieceShape`] is the only piece geometry in the crate: committed
//! pieces and feasibility probes use the same type, so the probe and the
//! real drop always agree on which cells a piece covers.
//!
//! The first offset is always the zero offset (the anchor square itself).
//! Constructors normalise any other input so that this holds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Position;

/// Rigid set of squares, as offsets from the anchor square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct PieceShape {
    offsets: Vec<Position>,
}

impl PieceShape {
    /// Create a shape from square positions relative to any origin.
    ///
    /// Offsets are re-expressed relative to the first square.
    pub fn new(squares: Vec<Position>) -> Result<Self, ConfigError> {
        let Some(&anchor) = squares.first() else {
            return Err(ConfigError::EmptyShape { index: 0 });
        };
        let offsets = squares.into_iter().map(|p| p - anchor).collect();
        Ok(Self { offsets })
    }

    /// A single square
    pub fn monomino() -> Self {
        Self {
            offsets: vec![Position::ZERO],
        }
    }

    /// Create a shape from integer cell coordinates (one board unit per cell)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_puzzle_core::PieceShape;
    /// use block_puzzle_core::types::Position;
    ///
    /// let ell = PieceShape::from_cells(&[(1, 0), (1, 1), (2, 1)]).unwrap();
    /// assert_eq!(ell.offsets()[0], Position::ZERO);
    /// assert_eq!(ell.offsets()[2], Position::new(1.0, 1.0));
    /// ```
    pub fn from_cells(cells: &[(i32, i32)]) -> Result<Self, ConfigError> {
        Self::scaled_cells(cells, 1.0)
    }

    /// Create a shape from integer cell coordinates on a grid of `cell_size`
    pub fn scaled_cells(cells: &[(i32, i32)], cell_size: f32) -> Result<Self, ConfigError> {
        Self::new(
            cells
                .iter()
                .map(|&(x, y)| Position::new(x as f32 * cell_size, y as f32 * cell_size))
                .collect(),
        )
    }

    /// Offsets from the anchor; `offsets()[0]` is always zero
    pub fn offsets(&self) -> &[Position] {
        &self.offsets
    }

    /// Number of squares
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Absolute cell positions with the anchor square at `anchor`
    pub fn cells_at(&self, anchor: Position) -> impl Iterator<Item = Position> + '_ {
        self.offsets.iter().map(move |&offset| anchor + offset)
    }

    /// The same shape rotated counter-clockwise by `turns * 90°` about its anchor
    pub fn rotated(&self, turns: u8) -> Self {
        Self {
            offsets: self
                .offsets
                .iter()
                .map(|p| p.rotated_quarter_turns(turns))
                .collect(),
        }
    }
}

impl TryFrom<Vec<Position>> for PieceShape {
    type Error = ConfigError;

    fn try_from(value: Vec<Position>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PieceShape> for Vec<Position> {
    fn from(value: PieceShape) -> Self {
        value.offsets
    }
}

impl fmt::Display for PieceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.offsets.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, "]")
    }
}

/// The catalog used by the standard configuration
///
/// Monomino through the 3x3 block, every shape in one orientation; the
/// default shape provider adds random quarter turns.
pub fn standard_catalog() -> Vec<PieceShape> {
    const CATALOG: &[&[(i32, i32)]] = &[
        &[(0, 0)],
        &[(0, 0), (1, 0)],
        &[(0, 0), (1, 0), (2, 0)],
        &[(0, 0), (1, 0), (0, 1)],
        &[(0, 0), (1, 0), (2, 0), (3, 0)],
        &[(0, 0), (1, 0), (0, 1), (1, 1)],
        &[(0, 0), (1, 0), (2, 0), (1, 1)],
        &[(0, 0), (0, 1), (0, 2), (1, 0)],
        &[(0, 0), (1, 0), (1, 1), (2, 1)],
        &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
        &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)],
        &[
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (1, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ],
    ];

    CATALOG
        .iter()
        .filter_map(|cells| PieceShape::from_cells(cells).ok())
        .collect()
}
