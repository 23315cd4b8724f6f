//! Monte Carlo search over the immediate candidate moves.
//!
//! This is a flat bandit rather than a deep tree: every empty point is an arm,
//! UCB1 picks which arm to pull, a random [`rollout`] provides the reward and
//! only that arm's statistics are updated. Statistics live for a single
//! decision and are dropped afterwards.

use std::time::{Duration, Instant};

use fastrand::Rng;
use tracing::{debug, trace};

use crate::board::{Board, Color, Point};
use crate::constants::{N, N_ITERATIONS, ROLLOUT_HORIZON, UCB_C};
use crate::playout::rollout;

/// Limits and tuning for one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Number of select/rollout/update iterations.
    pub iterations: usize,
    /// UCB1 exploration constant.
    pub exploration: f64,
    /// Maximum random plies per rollout.
    pub horizon: usize,
    /// Optional wall-clock budget; the search stops at whichever of this and
    /// `iterations` is reached first.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: N_ITERATIONS,
            exploration: UCB_C,
            horizon: ROLLOUT_HORIZON,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }
}

/// Accumulated reward and visit count of one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveStats {
    pub reward: f64,
    pub visits: u32,
}

impl MoveStats {
    /// Mean reward, 0 for an unvisited candidate.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.visits > 0 {
            self.reward / self.visits as f64
        } else {
            0.0
        }
    }
}

/// Per-point bandit statistics, indexed like the board.
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    stats: [[MoveStats; N]; N],
    total_visits: u32,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self {
            stats: [[MoveStats::default(); N]; N],
            total_visits: 0,
        }
    }

    pub fn get(&self, pt: Point) -> MoveStats {
        self.stats[pt.row][pt.col]
    }

    pub fn total_visits(&self) -> u32 {
        self.total_visits
    }

    pub fn record(&mut self, pt: Point, reward: f64) {
        let s = &mut self.stats[pt.row][pt.col];
        s.reward += reward;
        s.visits += 1;
        self.total_visits += 1;
    }

    /// UCB1 score: `mean + c * sqrt(ln(total) / (visits + 1))`, with the
    /// total clamped to at least one.
    #[inline]
    pub fn ucb1(&self, pt: Point, c: f64) -> f64 {
        let s = self.get(pt);
        let total = self.total_visits.max(1) as f64;
        s.mean() + c * (total.ln() / (s.visits as f64 + 1.0)).sqrt()
    }

    /// Visited candidates, most visited first.
    pub fn ranked(&self) -> Vec<(Point, MoveStats)> {
        let mut visited: Vec<(Point, MoveStats)> = Board::points()
            .map(|pt| (pt, self.get(pt)))
            .filter(|(_, s)| s.visits > 0)
            .collect();
        visited.sort_by(|a, b| b.1.visits.cmp(&a.1.visits));
        visited
    }
}

/// Result of a search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Candidate with the highest mean reward, if any was visited.
    pub best: Option<Point>,
    /// Iterations actually performed.
    pub iterations: usize,
    pub stats: SearchStatistics,
}

/// Select the candidate with the highest UCB1 score. Ties go to the earliest
/// candidate.
fn select(stats: &SearchStatistics, candidates: &[Point], c: f64) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for &pt in candidates {
        let score = stats.ucb1(pt, c);
        if best.is_none_or(|(_, b)| score > b) {
            best = Some((pt, score));
        }
    }
    best.map(|(pt, _)| pt)
}

/// Visited candidate with the highest mean reward. Ties go to the earliest
/// candidate.
fn best_mean(stats: &SearchStatistics, candidates: &[Point]) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for &pt in candidates {
        let s = stats.get(pt);
        if s.visits == 0 {
            continue;
        }
        if best.is_none_or(|(_, b)| s.mean() > b) {
            best = Some((pt, s.mean()));
        }
    }
    best.map(|(pt, _)| pt)
}

/// Run a search for `color` on `board`.
///
/// The board is only read; each rollout works on its own copy. With zero
/// iterations or no empty point the result carries no move.
pub fn search(board: &Board, color: Color, config: &SearchConfig, rng: &mut Rng) -> SearchResult {
    let candidates = board.empty_points();
    let mut stats = SearchStatistics::new();
    let deadline = config.time_limit.map(|limit| Instant::now() + limit);
    let mut done = 0;

    if !candidates.is_empty() {
        for i in 0..config.iterations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                debug!(iterations = i, "search deadline reached");
                break;
            }
            let Some(pt) = select(&stats, &candidates, config.exploration) else {
                break;
            };
            let reward = rollout(board, color, pt, config.horizon, rng);
            stats.record(pt, reward);
            done += 1;

            trace!(iteration = i, point = %pt, reward, "MCTS iteration complete");
        }
    }

    let best = best_mean(&stats, &candidates);
    if let Some(pt) = best {
        let s = stats.get(pt);
        debug!(
            %color,
            point = %pt,
            visits = s.visits,
            mean = s.mean(),
            iterations = done,
            "search finished"
        );
    }

    SearchResult {
        best,
        iterations: done,
        stats,
    }
}

/// Convenience wrapper returning only the chosen point.
pub fn best_move(board: &Board, color: Color, config: &SearchConfig, rng: &mut Rng) -> Option<Point> {
    search(board, color, config, rng).best
}
