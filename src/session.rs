//! A single game: the authoritative board, whose turn it is and what
//! happened so far.
//!
//! [`GameSession`] is the only thing that mutates a board during play. It is
//! an ordinary owned value; run as many as you like side by side.

use std::fs;
use std::path::Path;

use fastrand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::board::{Board, Color, Point};
use crate::frequency::{GameRecord, GameResult, MoveRecord};
use crate::rules::{GameStatus, MoveError, apply_move, check_draw, check_win, is_legal, pattern_score};
use crate::strategy::{DecisionContext, DecisionKind, Difficulty, choose, decide};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    IllegalMove(#[from] MoveError),
    #[error("no legal move available")]
    NoLegalMove,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("snapshot history has off-board moves")]
    OffBoardHistory,
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub point: Point,
    pub player: Color,
    pub captured: Vec<Point>,
    pub status: GameStatus,
}

/// Serializable state of a session: board, side to move and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Color,
    #[serde(default)]
    pub move_history: Vec<MoveRecord>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Color,
    history: Vec<MoveRecord>,
    status: GameStatus,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Empty board, black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Color::Black,
            history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Start from an arbitrary position with no history. A position that
    /// already holds six in a row is over.
    pub fn from_board(board: Board, current: Color) -> Self {
        let status = Board::points()
            .find_map(|pt| board.get(pt).filter(|&c| check_win(&board, pt, c)))
            .map_or_else(|| Self::draw_status(&board), GameStatus::Won);
        Self {
            board,
            current,
            history: Vec::new(),
            status,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Running draw-break scores as `(black, white)`.
    pub fn scores(&self) -> (u32, u32) {
        (
            pattern_score(&self.board, Color::Black),
            pattern_score(&self.board, Color::White),
        )
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }

    fn draw_status(board: &Board) -> GameStatus {
        check_draw(board).map_or(GameStatus::InProgress, GameStatus::Drawn)
    }

    /// Play `pt` for the side to move.
    ///
    /// On success the stone is placed, captures are resolved, the result is
    /// checked and, if the game goes on, the turn passes. On error nothing
    /// changes.
    pub fn play(&mut self, pt: Point) -> Result<MoveOutcome, SessionError> {
        if self.is_over() {
            return Err(MoveError::GameOver.into());
        }
        let player = self.current;
        let captured = apply_move(&mut self.board, pt, player)?;
        self.history.push(MoveRecord::new(pt, player, captured.clone()));

        if check_win(&self.board, pt, player) {
            self.status = GameStatus::Won(player);
            info!(winner = %player, point = %pt, moves = self.history.len(), "game won");
        } else if let Some(outcome) = check_draw(&self.board) {
            self.status = GameStatus::Drawn(outcome);
            info!(
                black = outcome.black_score,
                white = outcome.white_score,
                "board full"
            );
        } else {
            self.current = player.opponent();
        }

        Ok(MoveOutcome {
            point: pt,
            player,
            captured,
            status: self.status,
        })
    }

    /// Let the engine choose and play a move for the side to move.
    ///
    /// Heuristic picks can break the suicide rule; such a pick is replaced by
    /// a uniformly random legal point.
    pub fn play_ai(
        &mut self,
        difficulty: Difficulty,
        ctx: &DecisionContext<'_>,
        rng: &mut Rng,
    ) -> Result<MoveOutcome, SessionError> {
        if self.is_over() {
            return Err(MoveError::GameOver.into());
        }
        let color = self.current;
        let decision =
            decide(&self.board, color, difficulty, ctx, rng).ok_or(SessionError::NoLegalMove)?;

        let (point, kind) = if is_legal(&self.board, decision.point, color) {
            (decision.point, decision.kind)
        } else {
            warn!(point = %decision.point, kind = ?decision.kind, "engine chose an illegal point");
            let legal: Vec<Point> = self
                .board
                .empty_points()
                .into_iter()
                .filter(|&pt| is_legal(&self.board, pt, color))
                .collect();
            let pt = choose(&legal, rng).ok_or(SessionError::NoLegalMove)?;
            (pt, DecisionKind::Random)
        };

        let outcome = self.play(point)?;
        if let Some(last) = self.history.last_mut() {
            last.is_connect = kind == DecisionKind::Connect;
            last.is_block = kind == DecisionKind::Block;
        }
        Ok(outcome)
    }

    /// Take back the last move, returning captured stones to the board.
    ///
    /// A finished game becomes playable again.
    pub fn undo(&mut self) -> Result<MoveRecord, SessionError> {
        let record = self.history.pop().ok_or(SessionError::NothingToUndo)?;
        self.board.remove(record.point());
        let captured_color = record.player.opponent();
        for &pt in &record.captures {
            self.board.place(pt, captured_color);
        }
        self.current = record.player;
        self.status = GameStatus::InProgress;
        Ok(record)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            current_player: self.current,
            move_history: self.history.clone(),
        }
    }

    /// Rebuild a session from a snapshot. The game status is recomputed from
    /// the board and the last recorded move.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, SessionError> {
        let GameSnapshot {
            board,
            current_player,
            move_history,
        } = snapshot;
        if !move_history.iter().all(MoveRecord::on_board) {
            return Err(SessionError::OffBoardHistory);
        }

        let status = match move_history.last() {
            Some(last) if check_win(&board, last.point(), last.player) => {
                GameStatus::Won(last.player)
            }
            _ => Self::draw_status(&board),
        };
        info!(moves = move_history.len(), to_move = %current_player, "session restored");
        Ok(Self {
            board,
            current: current_player,
            history: move_history,
            status,
        })
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Self::restore(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// The game so far as a training record. True draws are tagged `0` and
    /// unfinished games are undecided.
    pub fn to_game_record(&self) -> GameRecord {
        let result = match self.status {
            GameStatus::Won(color) => GameResult::Winner(color),
            GameStatus::Drawn(outcome) => outcome
                .winner()
                .map_or(GameResult::DRAW, GameResult::Winner),
            GameStatus::InProgress => GameResult::Undecided,
        };
        GameRecord {
            moves: self.history.clone(),
            result,
        }
    }
}
