//! Session module - the turn loop
//!
//! [`GameSession`] owns the board, the spawn queue, the score and the active
//! pieces, plus the injected collaborators (shape provider, high-score store,
//! observer). One player action, releasing a piece, runs a whole turn:
//!
//! 1. **Validate**: map the released square positions onto empty slots
//! 2. **Commit**: occupy those slots, one point per square
//! 3. **Clear**: mark complete rows and columns, then remove, one point per square
//! 4. **Requeue**: dock the next queued piece at the vacated spawn
//! 5. **Reassess**: re-check every active piece; none placeable ends the game
//!
//! A drop that does not map onto empty slots is rejected without touching any
//! state. Once the game is over every inbound call returns
//! [`SessionError::SessionEnded`] until [`GameSession::restart`].

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::{ConfigError, SessionError};
use crate::feasibility::{check_active_pieces, PlayabilityReport};
use crate::grid::SpatialGrid;
use crate::lines::{apply_removal, scan_complete_lines};
use crate::observer::{GameObserver, NullObserver};
use crate::piece::ActivePiece;
use crate::placement::{commit, resolve_assignment, Tolerance};
use crate::queue::{SeededShapeProvider, ShapeProvider, SpawnQueue};
use crate::score::{HighScoreStore, MemoryHighScoreStore, Score, ScoreUpdate};
use crate::snapshot::BoardSnapshot;
use crate::types::{
    PieceId, PieceLocation, PlacementVerdict, Position, SlotId, SoundCue, SpawnIndex, SquareId,
    MAX_SPAWNS,
};

/// Where the turn pipeline currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Waiting for a placement attempt
    Idle,
    Validating,
    /// The drop did not fit; the piece goes back to its spawn
    Rejected,
    Committing,
    Clearing,
    Requeue,
    Reassess,
    /// Terminal: no active piece can be placed
    GameOver,
}

/// Everything that happened during one accepted turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub piece: PieceId,
    pub spawn: SpawnIndex,
    /// Slots the piece's squares now occupy
    pub placed: Vec<SlotId>,
    pub placement_points: i64,
    /// Indices of cleared rows
    pub cleared_rows: Vec<usize>,
    /// Indices of cleared columns
    pub cleared_columns: Vec<usize>,
    pub cleared_squares: Vec<SquareId>,
    pub clear_points: i64,
    /// The piece docked at the vacated spawn
    pub replacement: PieceId,
    pub playability: PlayabilityReport,
    pub score: ScoreUpdate,
}

impl TurnReport {
    pub fn points(&self) -> i64 {
        self.placement_points + self.clear_points
    }

    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len() + self.cleared_columns.len()
    }

    pub fn game_over(&self) -> bool {
        self.playability.game_over()
    }
}

/// Result of a well-formed placement attempt
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    Accepted(Box<TurnReport>),
    /// No legal mapping for this drop; nothing changed
    Rejected,
}

impl PlacementOutcome {
    pub fn verdict(&self) -> PlacementVerdict {
        match self {
            PlacementOutcome::Accepted(_) => PlacementVerdict::Accepted,
            PlacementOutcome::Rejected => PlacementVerdict::Rejected,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, PlacementOutcome::Accepted(_))
    }

    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            PlacementOutcome::Accepted(report) => Some(report.as_ref()),
            PlacementOutcome::Rejected => None,
        }
    }
}

/// One game: board, queue, score, active pieces and collaborators
pub struct GameSession {
    grid: SpatialGrid,
    tolerance: Tolerance,
    queue: SpawnQueue,
    score: Score,
    spawns: ArrayVec<Option<ActivePiece>, MAX_SPAWNS>,
    store: Box<dyn HighScoreStore>,
    observer: Box<dyn GameObserver>,
    phase: TurnPhase,
    next_piece_id: u32,
    next_square_id: u32,
    turns: u32,
}

impl GameSession {
    /// Start a session. Configuration errors are fatal.
    pub fn new(
        config: &GameConfig,
        provider: Box<dyn ShapeProvider>,
        store: Box<dyn HighScoreStore>,
        observer: Box<dyn GameObserver>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = SpatialGrid::build(&config.slot_positions, config.width, config.height)?;
        let queue = SpawnQueue::new(config.spawn_count, provider);
        let score = Score::new(store.load_high_score());

        let mut spawns = ArrayVec::new();
        for _ in 0..config.spawn_count {
            spawns.push(None);
        }

        let mut session = Self {
            grid,
            tolerance: config.tolerance,
            queue,
            score,
            spawns,
            store,
            observer,
            phase: TurnPhase::Idle,
            next_piece_id: 0,
            next_square_id: 0,
            turns: 0,
        };
        session.begin();
        Ok(session)
    }

    /// Session with the seeded default provider, in-memory high score and no observer
    pub fn seeded(config: &GameConfig, seed: u32) -> Result<Self, ConfigError> {
        let provider = SeededShapeProvider::new(config.shapes.clone(), config.palette_size, seed);
        Self::new(
            config,
            Box::new(provider),
            Box::new(MemoryHighScoreStore::new()),
            Box::new(NullObserver),
        )
    }

    fn begin(&mut self) {
        self.observer.sound(SoundCue::Start);
        self.observer
            .score_changed(self.score.current(), self.score.high());
        for spawn in 0..self.spawns.len() {
            self.dock_next(spawn);
        }
        self.enter(TurnPhase::Reassess);
        let report = self.reassess();
        if !report.game_over() {
            self.enter(TurnPhase::Idle);
        }
        log::info!(
            "session started: {}x{} board, {} spawns, high score {}",
            self.grid.width(),
            self.grid.height(),
            self.spawns.len(),
            self.score.high()
        );
    }

    /// Start over with an empty board and a fresh queue; the high score is kept
    pub fn restart(&mut self) {
        self.grid.clear();
        self.score.reset();
        self.queue.reset();
        for spawn in self.spawns.iter_mut() {
            *spawn = None;
        }
        self.turns = 0;
        self.phase = TurnPhase::Idle;
        self.begin();
    }

    fn enter(&mut self, phase: TurnPhase) {
        log::trace!("turn {}: {:?} -> {:?}", self.turns, self.phase, phase);
        self.phase = phase;
    }

    fn dock_next(&mut self, spawn: SpawnIndex) -> PieceId {
        let queued = self.queue.advance();
        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;
        self.spawns[spawn] = Some(ActivePiece::new(id, queued, spawn));
        self.observer.piece_docked(id, spawn);
        id
    }

    fn spawn_of(&self, piece: PieceId) -> Option<SpawnIndex> {
        self.spawns
            .iter()
            .position(|p| p.as_ref().is_some_and(|p| p.id() == piece))
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        if self.phase == TurnPhase::GameOver {
            return Err(SessionError::SessionEnded);
        }
        Ok(())
    }

    fn active_mut(&mut self, piece: PieceId) -> Result<&mut ActivePiece, SessionError> {
        self.ensure_running()?;
        let spawn = self
            .spawn_of(piece)
            .ok_or(SessionError::UnknownPiece(piece))?;
        self.spawns[spawn]
            .as_mut()
            .ok_or(SessionError::UnknownPiece(piece))
    }

    /// Tell the observer about a score change and persist a new high score
    fn publish_score(&mut self, before: Score) {
        if self.score == before {
            return;
        }
        self.observer
            .score_changed(self.score.current(), self.score.high());
        if self.score.high() > before.high() {
            log::debug!("new high score {}", self.score.high());
            self.store.save_high_score(self.score.high());
        }
    }

    fn reassess(&mut self) -> PlayabilityReport {
        let report = check_active_pieces(
            self.spawns.iter_mut().flatten(),
            &self.grid,
            self.tolerance,
        );
        for verdict in report.verdicts.iter().filter(|v| v.changed) {
            self.observer
                .placeable_changed(verdict.piece, verdict.spawn, verdict.placeable);
        }
        if report.game_over() {
            self.finish();
        }
        report
    }

    fn finish(&mut self) {
        self.enter(TurnPhase::GameOver);
        log::info!(
            "game over after {} turns: score {}, high {}",
            self.turns,
            self.score.current(),
            self.score.high()
        );
        self.observer
            .game_over(self.score.current(), self.score.high());
        self.observer.sound(SoundCue::GameOver);
        self.store.save_high_score(self.score.high());
    }

    /// Mark a piece as being dragged. Non-placeable pieces cannot be picked up.
    pub fn pick_up(&mut self, piece: PieceId) -> Result<(), SessionError> {
        let active = self.active_mut(piece)?;
        if !active.is_placeable() {
            return Err(SessionError::PieceNotPlaceable(piece));
        }
        active.pick_up();
        Ok(())
    }

    /// Put a dragged piece back at its spawn without attempting a placement
    pub fn release_to_spawn(&mut self, piece: PieceId) -> Result<(), SessionError> {
        self.active_mut(piece)?.return_to_spawn();
        Ok(())
    }

    /// Release `piece` with its squares at `squares` (in shape order).
    ///
    /// A drop that does not land every square on a distinct empty slot is
    /// [`PlacementOutcome::Rejected`] and changes nothing except returning the
    /// piece to its spawn. An accepted drop runs the whole turn.
    ///
    /// Each position is matched to a slot on its own; only the square count
    /// is checked against the piece's shape, not the layout. The positions
    /// are trusted to come from the dragged piece's rendered squares. Use
    /// [`GameSession::place_at`] to drop the shape rigidly at an anchor.
    pub fn attempt_placement(
        &mut self,
        piece: PieceId,
        squares: &[Position],
    ) -> Result<PlacementOutcome, SessionError> {
        let active = self.active_mut(piece)?;
        if !active.is_placeable() {
            return Err(SessionError::PieceNotPlaceable(piece));
        }
        if squares.len() != active.shape().len() {
            return Err(SessionError::SquareCountMismatch {
                expected: active.shape().len(),
                got: squares.len(),
            });
        }
        let spawn = active.spawn();

        self.enter(TurnPhase::Validating);
        let Some(assignment) = resolve_assignment(squares, &self.grid, self.tolerance) else {
            self.enter(TurnPhase::Rejected);
            if let Some(active) = self.spawns[spawn].as_mut() {
                active.return_to_spawn();
            }
            self.enter(TurnPhase::Idle);
            return Ok(PlacementOutcome::Rejected);
        };

        self.enter(TurnPhase::Committing);
        self.turns += 1;
        let before = self.score;
        self.spawns[spawn] = None;
        let first_square = SquareId(self.next_square_id);
        self.next_square_id += squares.len() as u32;
        let placement_points = commit(&assignment, &mut self.grid, &mut self.score, first_square);
        self.observer.sound(SoundCue::PiecePlaced);
        self.observer.piece_placed(piece);
        self.publish_score(before);

        self.enter(TurnPhase::Clearing);
        let before = self.score;
        let scan = scan_complete_lines(&mut self.grid);
        if scan.any_complete {
            self.observer.sound(SoundCue::SquaresRemoved);
        }
        let removal = apply_removal(&mut self.grid, &mut self.score);
        if !removal.removed.is_empty() {
            self.observer.squares_destroyed(&removal.removed);
        }
        self.publish_score(before);

        self.enter(TurnPhase::Requeue);
        let replacement = self.dock_next(spawn);

        self.enter(TurnPhase::Reassess);
        let playability = self.reassess();
        if !playability.game_over() {
            self.enter(TurnPhase::Idle);
        }

        log::debug!(
            "turn {}: {} placed at {:?}, {} lines cleared, +{} points",
            self.turns,
            piece,
            assignment.slots().collect::<Vec<_>>(),
            scan.line_count(),
            placement_points + removal.points
        );

        Ok(PlacementOutcome::Accepted(Box::new(TurnReport {
            piece,
            spawn,
            placed: assignment.slots().collect(),
            placement_points,
            cleared_rows: scan.rows.to_vec(),
            cleared_columns: scan.columns.to_vec(),
            cleared_squares: removal.removed,
            clear_points: removal.points,
            replacement,
            playability,
            score: self.score.snapshot(),
        })))
    }

    /// Drop `piece` with its anchor square exactly on `slot`
    pub fn place_at(
        &mut self,
        piece: PieceId,
        slot: SlotId,
    ) -> Result<PlacementOutcome, SessionError> {
        self.ensure_running()?;
        let anchor = self
            .grid
            .slot(slot)
            .ok_or(SessionError::UnknownSlot(slot))?
            .position();
        let squares: Vec<Position> = self
            .piece(piece)
            .ok_or(SessionError::UnknownPiece(piece))?
            .shape()
            .cells_at(anchor)
            .collect();
        self.attempt_placement(piece, &squares)
    }

    pub fn board(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Number of accepted turns
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn queue(&self) -> &SpawnQueue {
        &self.queue
    }

    /// Active pieces in spawn order
    pub fn active_pieces(&self) -> impl Iterator<Item = &ActivePiece> {
        self.spawns.iter().flatten()
    }

    /// Piece docked at `spawn`
    pub fn spawn(&self, spawn: SpawnIndex) -> Option<&ActivePiece> {
        self.spawns.get(spawn).and_then(Option::as_ref)
    }

    pub fn piece(&self, piece: PieceId) -> Option<&ActivePiece> {
        self.active_pieces().find(|p| p.id() == piece)
    }

    /// Location of an active piece
    pub fn location(&self, piece: PieceId) -> Option<PieceLocation> {
        self.piece(piece).map(ActivePiece::location)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(
            &self.grid,
            self.active_pieces(),
            &self.score,
            self.is_game_over(),
        )
    }
}
