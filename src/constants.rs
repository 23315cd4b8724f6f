//! Constants for board geometry, rules, search and heuristic tuning.
//!
//! The board is a plain 19x19 grid indexed by `(row, col)`. Every line
//! pattern (wins, draw scoring, heuristics) is scanned along the same four
//! axes listed in [`DIRECTIONS`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 19;

/// Number of intersections on the board.
pub const BOARD_AREA: usize = N * N;

/// The four line axes as `(row_delta, col_delta)`.
/// Order: horizontal, vertical, diagonal, anti-diagonal.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Orthogonal neighbor offsets used for group connectivity and liberties.
/// Order: North, South, West, East
pub const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// =============================================================================
// Rules
// =============================================================================

/// Stones in an unbroken line needed to win.
pub const WIN_LENGTH: usize = 6;

/// Run lengths tallied by the draw-break score. A run of at least
/// `target + 1` stones through a cell adds `target` points.
pub const PATTERN_TARGETS: [usize; 4] = [5, 4, 3, 2];

// =============================================================================
// Heuristic Move Finder
// =============================================================================

/// How far (in cells) the connect and strong scans look along a half-line.
pub const SCAN_REACH: usize = 5;

/// Minimum connect potential for a point to enter the connect/block pools.
pub const CONNECT_THRESHOLD: u32 = 3;

/// Stones needed along an axis for a point to count as a strong move.
pub const STRONG_RUN: u32 = 3;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default number of bandit iterations for the `hard` difficulty.
pub const N_ITERATIONS: usize = 1000;

/// UCB1 exploration constant (sqrt 2).
pub const UCB_C: f64 = std::f64::consts::SQRT_2;

/// Maximum number of placed stones in a single rollout.
pub const ROLLOUT_HORIZON: usize = 100;

/// Consecutive rejected picks after which a rollout gives up and is scored
/// as unresolved. Only reachable on boards where every empty point is
/// illegal for both colors.
pub const MAX_ROLLOUT_SKIPS: usize = 4 * BOARD_AREA;

// =============================================================================
// Training
// =============================================================================

/// Wire version of exported training corpora.
pub const CORPUS_VERSION: &str = "1.0";

/// Largest number of self-play games accepted in one training run.
pub const MAX_TRAINING_ROUNDS: usize = 1000;

/// Self-play games accepted when none is requested.
pub const DEFAULT_TRAINING_ROUNDS: usize = 100;
