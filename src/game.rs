//! The game engine: board, move history, phases and driver notifications.
//!
//! A [`Game`] is owned by its driver. The driver issues commands
//! ([`Game::place_stone`], [`Game::pass`], [`Game::undo`], ...) and reads the
//! resulting [`Event`]s with [`Game::drain_events`]. Every command either
//! completes fully or returns an error without touching the state.
//!
//! Each history entry records the stones its move captured, so undo puts
//! them back instead of replaying the game from scratch.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info};

use crate::board::{Board, Color, Point, in_bounds, str_coord};
use crate::config::GameConfig;
use crate::constants::PASSES_TO_END;
use crate::error::{ConfigError, GameError, MoveError};
use crate::group::{atari_stones, connected_group};
use crate::heuristic::{EngineMove, select_move};
use crate::rules::play_stone;
use crate::scoring::{ScoreReport, score};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Stones are being played.
    Playing,
    /// Both players passed; dead groups are being marked.
    Marking,
    /// The score has been computed. Terminal.
    Ended,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Playing => write!(f, "playing"),
            GamePhase::Marking => write!(f, "marking"),
            GamePhase::Ended => write!(f, "ended"),
        }
    }
}

/// One entry of the move history. `point` is `None` for a pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub player: Color,
    pub point: Option<Point>,
    /// Stones removed by this move.
    pub captured: Vec<Point>,
    ko_before: Option<Point>,
    passes_before: u8,
}

/// Outcome of a successful placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub player: Color,
    pub point: Point,
    pub captured: Vec<Point>,
    pub ko: Option<Point>,
}

/// Outcome of an undo request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Undo {
    /// Nothing was played yet; the game is unchanged.
    NoHistory,
    /// This many history entries were reverted.
    Undone(usize),
}

/// Read-only view of the game handed to the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub phase: GamePhase,
    pub to_move: Color,
    pub ko: Option<Point>,
    pub last_move: Option<Point>,
}

/// Notifications for the presentation driver, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    BoardChanged(Snapshot),
    PhaseChanged(GamePhase),
    TurnChanged(Color),
    /// Stones just removed from the board, for capture effects.
    Captured(Vec<Point>),
    /// Every stone whose group has exactly one liberty. Sent after each
    /// position change, empty once no stone is in atari.
    Atari(Vec<Point>),
    Passed { player: Color, consecutive: u8 },
    DeadMarksChanged(Vec<Point>),
    Scored(ScoreReport),
}

pub struct Game {
    config: GameConfig,
    board: Board,
    to_move: Color,
    history: Vec<HistoryEntry>,
    ko: Option<Point>,
    passes: u8,
    phase: GamePhase,
    dead: HashSet<Point>,
    final_score: Option<ScoreReport>,
    rng: fastrand::Rng,
    events: Vec<Event>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let rng = config.rng();
        Self {
            config,
            board: Board::new(),
            to_move: Color::Black,
            history: Vec::new(),
            ko: None,
            passes: 0,
            phase: GamePhase::Playing,
            dead: HashSet::new(),
            final_score: None,
            rng,
            events: Vec::new(),
        }
    }

    /// Rebuild a game by playing `moves` in order from an empty board,
    /// alternating colors. `None` is a pass.
    pub fn replay(config: GameConfig, moves: &[Option<Point>]) -> Result<Self, GameError> {
        let mut game = Self::new(config);
        for &mv in moves {
            match mv {
                Some(pt) => {
                    game.play(pt)?;
                }
                None => game.pass()?,
            }
        }
        game.events.clear();
        Ok(game)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn ko(&self) -> Option<Point> {
        self.ko
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.passes
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Moves in history order, `None` for passes. Feeding this to
    /// [`Game::replay`] reproduces the current board.
    pub fn moves(&self) -> Vec<Option<Point>> {
        self.history.iter().map(|e| e.point).collect()
    }

    pub fn last_move(&self) -> Option<Point> {
        self.history.last().and_then(|e| e.point)
    }

    pub fn dead_marks(&self) -> &HashSet<Point> {
        &self.dead
    }

    pub fn final_score(&self) -> Option<&ScoreReport> {
        self.final_score.as_ref()
    }

    pub fn engine_enabled(&self) -> bool {
        self.config.engine_enabled
    }

    /// True when the driver should ask the engine for a move.
    pub fn engine_to_move(&self) -> bool {
        self.config.engine_enabled
            && self.phase == GamePhase::Playing
            && self.to_move == self.config.engine_color
    }

    /// Stones on the board as (black, white).
    pub fn stone_counts(&self) -> (usize, usize) {
        (self.board.count(Color::Black), self.board.count(Color::White))
    }

    /// The group containing `pt`, empty if the point holds no stone.
    pub fn group_at(&self, pt: Point) -> Vec<Point> {
        match self.board.get(pt) {
            Some(color) => connected_group(&self.board, pt, color),
            None => Vec::new(),
        }
    }

    /// Stones in atari. Empty outside the playing phase.
    pub fn atari_stones(&self) -> Vec<Point> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        let mut stones = atari_stones(&self.board);
        stones.sort_unstable();
        stones
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            phase: self.phase,
            to_move: self.to_move,
            ko: self.ko,
            last_move: self.last_move(),
        }
    }

    /// Notifications queued since the last drain.
    pub fn pending_events(&self) -> &[Event] {
        &self.events
    }

    /// Take all notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    fn require(&self, phase: GamePhase, operation: &'static str) -> Result<(), GameError> {
        if self.phase != phase {
            return Err(GameError::InvalidPhase {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// Place a stone for the player to move.
    pub fn play(&mut self, pt: Point) -> Result<MoveReport, GameError> {
        self.place_stone(pt, self.to_move)
    }

    /// Place a stone for `player`, who must be the player to move.
    ///
    /// # Errors
    /// - [`GameError::InvalidPhase`] outside the playing phase
    /// - [`GameError::NotYourTurn`] if `player` is not to move
    /// - [`GameError::IllegalMove`] for occupied, ko or suicide points
    pub fn place_stone(&mut self, pt: Point, player: Color) -> Result<MoveReport, GameError> {
        self.require(GamePhase::Playing, "place a stone")?;
        if player != self.to_move {
            return Err(GameError::NotYourTurn {
                expected: self.to_move,
                got: player,
            });
        }

        let capture = play_stone(&mut self.board, self.ko, pt, player)?;
        debug!(
            %player,
            point = %str_coord(pt),
            captured = capture.captured.len(),
            "stone placed"
        );

        self.history.push(HistoryEntry {
            player,
            point: Some(pt),
            captured: capture.captured.clone(),
            ko_before: self.ko,
            passes_before: self.passes,
        });
        self.ko = capture.ko;
        self.passes = 0;
        self.to_move = player.opponent();

        if !capture.captured.is_empty() {
            self.events.push(Event::Captured(capture.captured.clone()));
        }
        self.notify_position();

        Ok(MoveReport {
            player,
            point: pt,
            captured: capture.captured,
            ko: capture.ko,
        })
    }

    /// Pass the turn. Two passes in a row start the marking phase.
    pub fn pass(&mut self) -> Result<(), GameError> {
        self.require(GamePhase::Playing, "pass")?;

        let player = self.to_move;
        self.history.push(HistoryEntry {
            player,
            point: None,
            captured: Vec::new(),
            ko_before: self.ko,
            passes_before: self.passes,
        });
        self.ko = None;
        self.passes += 1;
        self.to_move = player.opponent();
        debug!(%player, consecutive = self.passes, "pass");

        self.events.push(Event::Passed {
            player,
            consecutive: self.passes,
        });

        if self.passes >= PASSES_TO_END {
            self.phase = GamePhase::Marking;
            info!("both players passed, marking dead stones");
            self.events.push(Event::PhaseChanged(self.phase));
            self.events.push(Event::BoardChanged(self.snapshot()));
            self.events.push(Event::Atari(Vec::new()));
        } else {
            self.notify_position();
        }
        Ok(())
    }

    /// Take back the last move, restoring any stones it captured.
    ///
    /// With the engine enabled, moves keep being taken back until the human
    /// side is to move again, so one undo reverts the engine's reply too.
    pub fn undo(&mut self) -> Result<Undo, GameError> {
        self.require(GamePhase::Playing, "undo")?;
        if self.history.is_empty() {
            return Ok(Undo::NoHistory);
        }

        let mut undone = 0;
        while let Some(entry) = self.history.pop() {
            self.revert(entry);
            undone += 1;
            if !self.engine_to_move() {
                break;
            }
        }
        debug!(undone, "undo");

        self.notify_position();
        Ok(Undo::Undone(undone))
    }

    fn revert(&mut self, entry: HistoryEntry) {
        if let Some(pt) = entry.point {
            self.board.set(pt, None);
        }
        let owner = entry.player.opponent();
        for pt in entry.captured {
            self.board.set(pt, Some(owner));
        }
        self.ko = entry.ko_before;
        self.passes = entry.passes_before;
        self.to_move = entry.player;
    }

    /// Toggle the dead mark of the whole group at `pt`. Empty points are ignored.
    pub fn toggle_dead_mark(&mut self, pt: Point) -> Result<(), GameError> {
        self.require(GamePhase::Marking, "mark dead stones")?;
        if !in_bounds(pt) {
            return Err(MoveError::OutOfBounds.into());
        }

        let group = self.group_at(pt);
        if group.is_empty() {
            return Ok(());
        }

        if self.dead.contains(&pt) {
            for p in &group {
                self.dead.remove(p);
            }
        } else {
            self.dead.extend(group.iter().copied());
        }
        debug!(point = %str_coord(pt), stones = group.len(), "toggled dead mark");

        let mut marked: Vec<Point> = self.dead.iter().copied().collect();
        marked.sort_unstable();
        self.events.push(Event::DeadMarksChanged(marked));
        Ok(())
    }

    /// Score the game with the current dead marks and end it.
    pub fn finalize_score(&mut self) -> Result<ScoreReport, GameError> {
        self.require(GamePhase::Marking, "finalize the score")?;

        let report = score(&self.board, &self.dead, self.config.komi);
        info!(
            black = report.black.total(),
            white = report.white.total(),
            result = %report,
            "game scored"
        );

        self.phase = GamePhase::Ended;
        self.final_score = Some(report.clone());
        self.events.push(Event::Scored(report.clone()));
        self.events.push(Event::PhaseChanged(self.phase));
        Ok(report)
    }

    /// Change komi for the final count. Has no effect once the game is scored.
    pub fn set_komi(&mut self, komi: f64) -> Result<(), ConfigError> {
        self.config.clone().with_komi(komi).validate()?;
        self.config.komi = komi;
        Ok(())
    }

    pub fn set_engine_enabled(&mut self, enabled: bool) {
        debug!(enabled, "engine toggled");
        self.config.engine_enabled = enabled;
    }

    /// Let the heuristic engine choose and play a move for its color.
    ///
    /// # Errors
    /// - [`GameError::InvalidPhase`] outside the playing phase
    /// - [`GameError::EngineDisabled`] if the engine is switched off
    /// - [`GameError::NotEngineTurn`] if the engine's color is not to move
    pub fn request_engine_move(&mut self) -> Result<EngineMove, GameError> {
        self.require(GamePhase::Playing, "request an engine move")?;
        if !self.config.engine_enabled {
            return Err(GameError::EngineDisabled);
        }
        if self.to_move != self.config.engine_color {
            return Err(GameError::NotEngineTurn);
        }
        self.generate_move()
    }

    /// Choose and play a heuristic move for the player to move, regardless
    /// of which side the engine controls.
    pub fn generate_move(&mut self) -> Result<EngineMove, GameError> {
        self.require(GamePhase::Playing, "generate a move")?;
        let mv = select_move(&self.board, self.ko, self.to_move, &mut self.rng);
        match mv {
            EngineMove::Place(pt) => {
                self.place_stone(pt, self.to_move)?;
            }
            EngineMove::Pass => self.pass()?,
        }
        Ok(mv)
    }

    fn notify_position(&mut self) {
        self.events.push(Event::BoardChanged(self.snapshot()));
        self.events.push(Event::TurnChanged(self.to_move));
        // Sent even when empty so the driver drops stale warnings
        self.events.push(Event::Atari(self.atari_stones()));
    }
}
