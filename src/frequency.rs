//! Recorded games and the move-frequency model built from them.
//!
//! A [`TrainingCorpus`] is the on-disk collection of finished games (the
//! `trained` opponent's only knowledge). The [`FrequencyModel`] simply counts
//! how often each point was played by a color across the corpus and prefers
//! the most popular point that is still empty.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{Board, Color, Point};
use crate::constants::{CORPUS_VERSION, N};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported corpus version {0:?}")]
    UnsupportedVersion(String),
    #[error("corpus has no games list")]
    MissingGames,
    #[error("corpus I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One placed stone as recorded in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub row: usize,
    pub col: usize,
    pub player: Color,
    #[serde(default)]
    pub captures: Vec<Point>,
    /// Chosen from the connect pool. Advisory only.
    #[serde(default)]
    pub is_connect: bool,
    /// Chosen from the block pool. Advisory only.
    #[serde(default)]
    pub is_block: bool,
}

impl MoveRecord {
    pub fn new(pt: Point, player: Color, captures: Vec<Point>) -> Self {
        Self {
            row: pt.row,
            col: pt.col,
            player,
            captures,
            is_connect: false,
            is_block: false,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.row, self.col)
    }

    pub(crate) fn on_board(&self) -> bool {
        self.row < N && self.col < N && self.captures.iter().all(|c| c.row < N && c.col < N)
    }
}

/// How a recorded game ended. Older corpora store a `1 / -1 / 0` tag from
/// the recording side's perspective; self-play stores the winner's color.
/// Games that stopped before a result are `null` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameResult {
    Winner(Color),
    Tag(i8),
    Undecided,
}

impl GameResult {
    pub const DRAW: GameResult = GameResult::Tag(0);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<MoveRecord>,
    pub result: GameResult,
}

/// Aggregate counts over a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub undecided: usize,
    pub connect_moves: usize,
    pub block_moves: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCorpus {
    pub version: String,
    pub games: Vec<GameRecord>,
}

impl Default for TrainingCorpus {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingCorpus {
    pub fn new() -> Self {
        Self {
            version: CORPUS_VERSION.to_string(),
            games: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn push(&mut self, game: GameRecord) {
        self.games.push(game);
    }

    /// Parse an exported corpus.
    ///
    /// The envelope must be well formed, but individual games that are
    /// missing fields or reference off-board points are logged and skipped.
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let value: Value = serde_json::from_str(json)?;

        let version = value
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if version != CORPUS_VERSION {
            return Err(CorpusError::UnsupportedVersion(version.to_string()));
        }
        let Some(entries) = value.get("games").and_then(Value::as_array) else {
            return Err(CorpusError::MissingGames);
        };

        let mut corpus = TrainingCorpus::new();
        for (i, entry) in entries.iter().enumerate() {
            match GameRecord::deserialize(entry) {
                Ok(game) if game.moves.iter().all(MoveRecord::on_board) => corpus.push(game),
                Ok(_) => warn!(game = i, "skipping game with off-board moves"),
                Err(e) => warn!(game = i, error = %e, "skipping malformed game"),
            }
        }
        debug!(
            kept = corpus.len(),
            skipped = entries.len() - corpus.len(),
            "corpus parsed"
        );
        Ok(corpus)
    }

    pub fn to_json(&self) -> Result<String, CorpusError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CorpusError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn summary(&self) -> CorpusSummary {
        let mut s = CorpusSummary {
            games: self.games.len(),
            ..CorpusSummary::default()
        };
        for game in &self.games {
            match game.result {
                GameResult::Winner(Color::Black) => s.black_wins += 1,
                GameResult::Winner(Color::White) => s.white_wins += 1,
                GameResult::Tag(t) if t > 0 => s.wins += 1,
                GameResult::Tag(t) if t < 0 => s.losses += 1,
                GameResult::Tag(_) => s.draws += 1,
                GameResult::Undecided => s.undecided += 1,
            }
            s.connect_moves += game.moves.iter().filter(|m| m.is_connect).count();
            s.block_moves += game.moves.iter().filter(|m| m.is_block).count();
        }
        s
    }
}

/// How often each point was played by one color across a set of games.
#[derive(Debug, Clone)]
pub struct FrequencyModel {
    counts: [[u32; N]; N],
    samples: usize,
}

impl FrequencyModel {
    /// Count every recorded move made by `color`.
    pub fn build(games: &[GameRecord], color: Color) -> Self {
        let mut model = Self {
            counts: [[0; N]; N],
            samples: 0,
        };
        for mv in games.iter().flat_map(|g| &g.moves) {
            if mv.player != color {
                continue;
            }
            if !mv.on_board() {
                warn!(row = mv.row, col = mv.col, "skipping off-board history move");
                continue;
            }
            model.counts[mv.row][mv.col] += 1;
            model.samples += 1;
        }
        model
    }

    pub fn count(&self, pt: Point) -> u32 {
        self.counts[pt.row][pt.col]
    }

    /// Number of moves that went into the model.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Most frequently played empty point.
    ///
    /// Ties keep the earliest point in row-major order. If no empty point was
    /// ever played, the first empty point is returned. `None` only on a full
    /// board.
    pub fn best_move(&self, board: &Board) -> Option<Point> {
        let empty = board.empty_points();
        let mut best = *empty.first()?;
        let mut max = 0;
        for pt in empty {
            let count = self.count(pt);
            if count > max {
                max = count;
                best = pt;
            }
        }
        Some(best)
    }
}
