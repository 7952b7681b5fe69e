//! Session configuration
//!
//! Everything the rules need is supplied up front: board dimensions, the
//! unordered slot positions, the shape catalog and the matching tolerance.
//! Configurations can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "width": 2,
//!   "height": 1,
//!   "slot_positions": [{"x": 1.0, "y": 0.0}, {"x": 0.0, "y": 0.0}],
//!   "shapes": [[{"x": 0.0, "y": 0.0}]]
//! }
//! ```
//!
//! Missing `tolerance`, `spawn_count` and `palette_size` take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::placement::Tolerance;
use crate::shape::{standard_catalog, PieceShape};
use crate::types::{
    ColorId, Position, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_PALETTE_SIZE,
    DEFAULT_SPAWN_COUNT, MAX_SPAWNS,
};

/// Positions of a regular `width x height` lattice with spacing `cell_size`,
/// row-major from the origin
pub fn grid_positions(width: usize, height: usize, cell_size: f32) -> Vec<Position> {
    (0..height)
        .flat_map(|row| {
            (0..width).map(move |col| Position::new(col as f32 * cell_size, row as f32 * cell_size))
        })
        .collect()
}

fn default_spawn_count() -> usize {
    DEFAULT_SPAWN_COUNT
}

fn default_palette_size() -> ColorId {
    DEFAULT_PALETTE_SIZE
}

/// Everything needed to start a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Slot positions in any order
    pub slot_positions: Vec<Position>,
    /// Shape catalog offered by the default provider
    pub shapes: Vec<PieceShape>,
    #[serde(default)]
    pub tolerance: Tolerance,
    #[serde(default = "default_spawn_count")]
    pub spawn_count: usize,
    #[serde(default = "default_palette_size")]
    pub palette_size: ColorId,
}

impl GameConfig {
    /// A `width x height` unit lattice with the standard catalog
    pub fn with_board(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slot_positions: grid_positions(width, height, 1.0),
            shapes: standard_catalog(),
            tolerance: Tolerance::DEFAULT,
            spawn_count: DEFAULT_SPAWN_COUNT,
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }

    /// The standard 8x8 game
    pub fn standard() -> Self {
        Self::with_board(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check everything that can be checked before the board is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.width.checked_mul(self.height);
        if expected != Some(self.slot_positions.len()) {
            return Err(ConfigError::BoardMismatch {
                expected: expected.unwrap_or(usize::MAX),
                actual: self.slot_positions.len(),
            });
        }
        if self.shapes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(index) = self.shapes.iter().position(PieceShape::is_empty) {
            return Err(ConfigError::EmptyShape { index });
        }
        if self.spawn_count == 0 || self.spawn_count > MAX_SPAWNS {
            return Err(ConfigError::NoSpawns {
                got: self.spawn_count,
                max: MAX_SPAWNS,
            });
        }
        let tol = self.tolerance.squared();
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tol));
        }
        if self.palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_is_valid() {
        let config = GameConfig::standard();
        assert_eq!(config.slot_positions.len(), 64);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn grid_positions_are_row_major() {
        let positions = grid_positions(3, 2, 0.5);
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[1], Position::new(0.5, 0.0));
        assert_eq!(positions[3], Position::new(0.0, 0.5));
    }

    #[test]
    fn validate_reports_each_problem() {
        let mut config = GameConfig::with_board(3, 3);
        config.slot_positions.pop();
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardMismatch {
                expected: 9,
                actual: 8
            })
        );

        let mut config = GameConfig::with_board(3, 3);
        config.shapes.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyCatalog));

        let mut config = GameConfig::with_board(3, 3);
        config.spawn_count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoSpawns { .. })));

        let mut config = GameConfig::with_board(3, 3);
        config.tolerance = Tolerance::new(f32::NAN);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTolerance(_))));

        let mut config = GameConfig::with_board(3, 3);
        config.palette_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn from_json_applies_defaults() {
        let json = r#"{
            "width": 2,
            "height": 1,
            "slot_positions": [{"x": 1.0, "y": 0.0}, {"x": 0.0, "y": 0.0}],
            "shapes": [[{"x": 0.0, "y": 0.0}]]
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.tolerance, Tolerance::DEFAULT);
        assert_eq!(config.spawn_count, DEFAULT_SPAWN_COUNT);
        assert_eq!(config.palette_size, DEFAULT_PALETTE_SIZE);
    }

    #[test]
    fn from_json_rejects_bad_input() {
        assert!(matches!(
            GameConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
        let mismatch = r#"{"width": 2, "height": 2, "slot_positions": [], "shapes": [[{"x":0,"y":0}]]}"#;
        assert!(matches!(
            GameConfig::from_json(mismatch),
            Err(ConfigError::BoardMismatch { .. })
        ));
    }

    #[test]
    fn overflowing_dimensions_are_a_mismatch() {
        let json = r#"{"width": 9223372036854775808, "height": 2, "slot_positions": [], "shapes": [[{"x":0,"y":0}]]}"#;
        assert_eq!(
            GameConfig::from_json(json),
            Err(ConfigError::BoardMismatch {
                expected: usize::MAX,
                actual: 0
            })
        );

        let mut config = GameConfig::with_board(2, 2);
        config.width = usize::MAX / 2 + 1;
        config.height = 4;
        assert!(matches!(config.validate(), Err(ConfigError::BoardMismatch { .. })));
    }
}
