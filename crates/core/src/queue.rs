//! Spawn queue and shape providers
//!
//! The queue always holds exactly as many pending pieces as there are spawn
//! points: every pop is immediately followed by a push from the injected
//! [`ShapeProvider`]. Shape randomisation lives entirely in the provider.

use std::collections::VecDeque;
use std::fmt;

use crate::piece::QueuedPiece;
use crate::rng::SimpleRng;
use crate::shape::PieceShape;
use crate::types::ColorId;

/// Source of new pieces for the queue
pub trait ShapeProvider {
    fn next_shape(&mut self) -> QueuedPiece;
}

/// Random catalog shape, random quarter turn, random colour
#[derive(Debug, Clone)]
pub struct SeededShapeProvider {
    catalog: Vec<PieceShape>,
    palette_size: ColorId,
    rotate: bool,
    rng: SimpleRng,
}

impl SeededShapeProvider {
    /// An empty catalog degrades to single squares
    pub fn new(mut catalog: Vec<PieceShape>, palette_size: ColorId, seed: u32) -> Self {
        if catalog.is_empty() {
            catalog.push(PieceShape::monomino());
        }
        Self {
            catalog,
            palette_size: palette_size.max(1),
            rotate: true,
            rng: SimpleRng::new(seed),
        }
    }

    /// Keep catalog orientation instead of rotating each piece
    pub fn without_rotation(mut self) -> Self {
        self.rotate = false;
        self
    }
}

impl ShapeProvider for SeededShapeProvider {
    fn next_shape(&mut self) -> QueuedPiece {
        let index = self.rng.pick(self.catalog.len());
        let base = &self.catalog[index];
        let turns = if self.rotate { self.rng.next_range(4) as u8 } else { 0 };
        let color = self.rng.next_range(self.palette_size as u32) as ColorId;
        QueuedPiece::new(base.rotated(turns), color)
    }
}

/// Hands out a fixed list of pieces in order, wrapping around
#[derive(Debug, Clone)]
pub struct CyclingShapeProvider {
    pieces: Vec<QueuedPiece>,
    next: usize,
}

impl CyclingShapeProvider {
    /// An empty list degrades to single squares
    pub fn new(mut pieces: Vec<QueuedPiece>) -> Self {
        if pieces.is_empty() {
            pieces.push(QueuedPiece::new(PieceShape::monomino(), 0));
        }
        Self { pieces, next: 0 }
    }

    /// Cycle through shapes, all with colour 0
    pub fn from_shapes(shapes: impl IntoIterator<Item = PieceShape>) -> Self {
        Self::new(shapes.into_iter().map(|s| QueuedPiece::new(s, 0)).collect())
    }
}

impl ShapeProvider for CyclingShapeProvider {
    fn next_shape(&mut self) -> QueuedPiece {
        let piece = self.pieces[self.next % self.pieces.len()].clone();
        self.next = (self.next + 1) % self.pieces.len();
        piece
    }
}

/// Fixed-length queue of upcoming pieces
pub struct SpawnQueue {
    pending: VecDeque<QueuedPiece>,
    len: usize,
    provider: Box<dyn ShapeProvider>,
}

impl SpawnQueue {
    /// Create a queue of `len` pieces, filled from `provider`
    pub fn new(len: usize, provider: Box<dyn ShapeProvider>) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(len + 1),
            len,
            provider,
        };
        queue.refill();
        queue
    }

    fn refill(&mut self) {
        while self.pending.len() < self.len {
            self.push_new_shape();
        }
    }

    /// Remove the front piece. Pair with [`SpawnQueue::push_new_shape`].
    pub fn pop_next_shape(&mut self) -> QueuedPiece {
        match self.pending.pop_front() {
            Some(piece) => piece,
            None => self.provider.next_shape(),
        }
    }

    /// Append a fresh piece from the provider
    pub fn push_new_shape(&mut self) {
        let piece = self.provider.next_shape();
        self.pending.push_back(piece);
    }

    /// Pop the front piece and push a replacement, keeping the length fixed
    pub fn advance(&mut self) -> QueuedPiece {
        let piece = self.pop_next_shape();
        self.push_new_shape();
        piece
    }

    /// Drop every pending piece and draw a new queue
    pub fn reset(&mut self) {
        self.pending.clear();
        self.refill();
    }

    /// Upcoming pieces, front first
    pub fn pending(&self) -> impl Iterator<Item = &QueuedPiece> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl fmt::Debug for SpawnQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpawnQueue")
            .field("pending", &self.pending)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
