//! Pieces waiting in the queue and pieces docked at a spawn point.

use serde::{Deserialize, Serialize};

use crate::shape::PieceShape;
use crate::types::{ColorId, PieceId, PieceLocation, SpawnIndex};

/// A shape waiting in the spawn queue, with its rendering identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedPiece {
    pub shape: PieceShape,
    pub color: ColorId,
}

impl QueuedPiece {
    pub fn new(shape: PieceShape, color: ColorId) -> Self {
        Self { shape, color }
    }
}

/// A piece the player can drag
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePiece {
    id: PieceId,
    shape: PieceShape,
    color: ColorId,
    spawn: SpawnIndex,
    location: PieceLocation,
    is_placeable: bool,
}

impl ActivePiece {
    /// Dock a dequeued piece at `spawn`. New pieces start out placeable.
    pub fn new(id: PieceId, queued: QueuedPiece, spawn: SpawnIndex) -> Self {
        Self {
            id,
            shape: queued.shape,
            color: queued.color,
            spawn,
            location: PieceLocation::Docked(spawn),
            is_placeable: true,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn shape(&self) -> &PieceShape {
        &self.shape
    }

    pub fn color(&self) -> ColorId {
        self.color
    }

    /// Spawn point this piece belongs to (and returns to on a rejected drop)
    pub fn spawn(&self) -> SpawnIndex {
        self.spawn
    }

    pub fn location(&self) -> PieceLocation {
        self.location
    }

    pub fn is_placeable(&self) -> bool {
        self.is_placeable
    }

    /// Update the placeable flag; returns true if it changed
    pub(crate) fn set_placeable(&mut self, placeable: bool) -> bool {
        let changed = self.is_placeable != placeable;
        self.is_placeable = placeable;
        changed
    }

    pub(crate) fn pick_up(&mut self) {
        self.location = PieceLocation::InTransit;
    }

    pub(crate) fn return_to_spawn(&mut self) {
        self.location = PieceLocation::Docked(self.spawn);
    }
}
