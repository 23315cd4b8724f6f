//! Difficulty levels and the move decision entry point.
//!
//! Each difficulty is a fixed chain of finders; the first one that produces a
//! move wins:
//!
//! | difficulty | chain                                                        |
//! |------------|--------------------------------------------------------------|
//! | `easy`     | win, block win, random                                       |
//! | `medium`   | win, block win, connect pool, block pool, strong pool, random|
//! | `hard`     | win, block win, connect pool, block pool, search             |
//! | `trained`  | frequency model (random when there is no history)            |

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Color, Point};
use crate::frequency::{FrequencyModel, TrainingCorpus};
use crate::heuristics::{find_block_moves, find_connect_moves, find_strong_moves, find_winning_move};
use crate::mcts::{SearchConfig, search};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Trained,
    /// Uniform random play. Also what an unrecognised tag falls back to.
    Random,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Trained,
        Difficulty::Random,
    ];

    /// Lenient lookup: unknown tags play randomly.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(Difficulty::Random)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Trained => "trained",
            Difficulty::Random => "random",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}

/// Which finder produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    /// Completes six in a row.
    Winning,
    /// Occupies the opponent's winning point.
    Blocking,
    /// Picked from the connect pool.
    Connect,
    /// Picked from the block pool.
    Block,
    /// Picked from the strong-move pool.
    Strong,
    Search,
    Trained,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub point: Point,
    pub kind: DecisionKind,
}

impl Decision {
    fn new(point: Point, kind: DecisionKind) -> Self {
        Self { point, kind }
    }
}

/// Optional inputs to a decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionContext<'a> {
    /// Recorded games, consulted only by `trained`.
    pub corpus: Option<&'a TrainingCorpus>,
    /// Search limits for `hard`.
    pub search: SearchConfig,
}

impl<'a> DecisionContext<'a> {
    pub fn with_corpus(corpus: &'a TrainingCorpus) -> Self {
        Self {
            corpus: Some(corpus),
            ..Self::default()
        }
    }
}

/// Uniform pick from a pool.
pub fn choose(pool: &[Point], rng: &mut Rng) -> Option<Point> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.usize(..pool.len())])
}

/// Uniformly random empty point.
pub fn random_move(board: &Board, rng: &mut Rng) -> Option<Point> {
    choose(&board.empty_points(), rng)
}

fn win_or_block(board: &Board, color: Color) -> Option<Decision> {
    find_winning_move(board, color)
        .map(|pt| Decision::new(pt, DecisionKind::Winning))
        .or_else(|| {
            find_winning_move(board, color.opponent())
                .map(|pt| Decision::new(pt, DecisionKind::Blocking))
        })
}

fn from_pool(pool: Vec<Point>, kind: DecisionKind, rng: &mut Rng) -> Option<Decision> {
    choose(&pool, rng).map(|pt| Decision::new(pt, kind))
}

fn random_decision(board: &Board, rng: &mut Rng) -> Option<Decision> {
    random_move(board, rng).map(|pt| Decision::new(pt, DecisionKind::Random))
}

fn trained_decision(
    board: &Board,
    color: Color,
    corpus: Option<&TrainingCorpus>,
    rng: &mut Rng,
) -> Option<Decision> {
    match corpus {
        Some(corpus) if !corpus.is_empty() => {
            let model = FrequencyModel::build(&corpus.games, color);
            model
                .best_move(board)
                .map(|pt| Decision::new(pt, DecisionKind::Trained))
        }
        _ => random_decision(board, rng),
    }
}

/// Pick a move for `color` at the given difficulty.
///
/// Returns `None` only when the board has no empty point (or, for `hard`, when
/// the search is given nothing to do and the board is full). The chosen point
/// is always empty but heuristic picks are not checked against the suicide
/// rule.
pub fn decide(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    ctx: &DecisionContext<'_>,
    rng: &mut Rng,
) -> Option<Decision> {
    let opponent = color.opponent();
    let decision = match difficulty {
        Difficulty::Easy => win_or_block(board, color).or_else(|| random_decision(board, rng)),
        Difficulty::Medium => win_or_block(board, color)
            .or_else(|| from_pool(find_connect_moves(board, color), DecisionKind::Connect, rng))
            .or_else(|| from_pool(find_block_moves(board, opponent), DecisionKind::Block, rng))
            .or_else(|| from_pool(find_strong_moves(board, color), DecisionKind::Strong, rng))
            .or_else(|| random_decision(board, rng)),
        Difficulty::Hard => win_or_block(board, color)
            .or_else(|| from_pool(find_connect_moves(board, color), DecisionKind::Connect, rng))
            .or_else(|| from_pool(find_block_moves(board, opponent), DecisionKind::Block, rng))
            .or_else(|| {
                search(board, color, &ctx.search, rng)
                    .best
                    .map(|pt| Decision::new(pt, DecisionKind::Search))
            })
            .or_else(|| random_decision(board, rng)),
        Difficulty::Trained => trained_decision(board, color, ctx.corpus, rng),
        Difficulty::Random => random_decision(board, rng),
    };

    if let Some(d) = &decision {
        debug!(%color, %difficulty, point = %d.point, kind = ?d.kind, "move decided");
    }
    decision
}

/// Single entry point for callers that only need the point.
pub fn decide_move(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    ctx: &DecisionContext<'_>,
    rng: &mut Rng,
) -> Option<Point> {
    decide(board, color, difficulty, ctx, rng).map(|d| d.point)
}
