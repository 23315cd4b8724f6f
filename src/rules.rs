//! Move legality, capture, six-in-a-row wins and full-board draws.
//!
//! Legality follows a Go-style suicide rule with one twist: a placement is
//! allowed if *any* opposing group on the board is left without liberties,
//! not only the groups touching the new stone. Capture itself only removes
//! groups adjacent to the placed stone.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Color, Point};
use crate::constants::{BOARD_AREA, DIRECTIONS, N, PATTERN_TARGETS, WIN_LENGTH};
use crate::group::{connected_group, group_liberties, liberties};
use crate::patterns::line_length;

/// Why a placement was rejected. The board is never modified when one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: point {0} is not empty")]
    Occupied(Point),
    #[error("illegal move: {0} would leave the group without liberties")]
    Suicide(Point),
    #[error("illegal move: ({}, {}) is off the board", .0.row, .0.col)]
    OutOfBounds(Point),
    #[error("illegal move: the game is over")]
    GameOver,
}

/// Outcome of a game that filled the board without six in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub black_score: u32,
    pub white_score: u32,
}

impl DrawOutcome {
    /// The draw-break winner, or `None` for a true draw.
    pub fn winner(&self) -> Option<Color> {
        match self.black_score.cmp(&self.white_score) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Per-game state machine: `InProgress` moves to either terminal state and
/// terminal states accept no further moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won(Color),
    Drawn(DrawOutcome),
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Check whether `color` may play at `pt`, reporting the reason if not.
///
/// The board is probed on a copy and is never touched.
pub fn check_legal(board: &Board, pt: Point, color: Color) -> Result<(), MoveError> {
    if pt.row >= N || pt.col >= N {
        return Err(MoveError::OutOfBounds(pt));
    }
    if !board.is_empty(pt) {
        return Err(MoveError::Occupied(pt));
    }

    let mut probe = board.clone();
    probe.place(pt, color);

    if group_liberties(&probe, pt) > 0 || has_dead_group(&probe, color.opponent()) {
        Ok(())
    } else {
        Err(MoveError::Suicide(pt))
    }
}

pub fn is_legal(board: &Board, pt: Point, color: Color) -> bool {
    check_legal(board, pt, color).is_ok()
}

/// True if any group of `color` anywhere on the board has zero liberties.
fn has_dead_group(board: &Board, color: Color) -> bool {
    let mut visited = [false; BOARD_AREA];
    for pt in Board::points() {
        if visited[pt.index()] || board.get(pt) != Some(color) {
            continue;
        }
        let Some(group) = connected_group(board, pt) else {
            continue;
        };
        for &g in &group {
            visited[g.index()] = true;
        }
        if liberties(board, &group) == 0 {
            return true;
        }
    }
    false
}

/// Place `color` at `pt` and remove adjacent opposing groups left without
/// liberties.
///
/// Returns the captured points. On error the board is unchanged.
pub fn apply_move(board: &mut Board, pt: Point, color: Color) -> Result<Vec<Point>, MoveError> {
    check_legal(board, pt, color)?;

    board.place(pt, color);
    let opp = color.opponent();
    let mut captured: Vec<Point> = Vec::new();

    for n in pt.neighbors() {
        if board.get(n) != Some(opp) || captured.contains(&n) {
            continue;
        }
        if let Some(group) = connected_group(board, n) {
            if liberties(board, &group) == 0 {
                captured.extend(group);
            }
        }
    }

    for &c in &captured {
        board.remove(c);
    }
    Ok(captured)
}

/// True if the line through `pt` holds at least six `color` stones along
/// some axis. `pt` itself is counted as part of the line.
pub fn check_win(board: &Board, pt: Point, color: Color) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| line_length(board, pt, dir, color, WIN_LENGTH - 1) >= WIN_LENGTH)
}

/// Resolve a full board. Returns `None` while any point is empty.
pub fn check_draw(board: &Board) -> Option<DrawOutcome> {
    if !board.is_full() {
        return None;
    }
    Some(DrawOutcome {
        black_score: pattern_score(board, Color::Black),
        white_score: pattern_score(board, Color::White),
    })
}

/// Draw-break tally for `color`.
///
/// For every stone, axis and target length `t` in 2..=5, adds `t` when a run
/// of at least `t + 1` stones passes through the stone. Overlapping runs are
/// counted once per member stone and per target, so long lines score heavily.
pub fn pattern_score(board: &Board, color: Color) -> u32 {
    let mut score = 0u32;
    for pt in Board::points() {
        if board.get(pt) != Some(color) {
            continue;
        }
        for &dir in &DIRECTIONS {
            for &target in &PATTERN_TARGETS {
                if line_length(board, pt, dir, color, target) > target {
                    score += target as u32;
                }
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Point {
        Point::new(row, col)
    }

    #[test]
    fn test_occupied_is_illegal() {
        let mut board = Board::new();
        board.place(p(3, 3), Color::White);
        assert_eq!(check_legal(&board, p(3, 3), Color::Black), Err(MoveError::Occupied(p(3, 3))));
    }

    #[test]
    fn test_corner_suicide() {
        let mut board = Board::new();
        board.place(p(0, 1), Color::Black);
        board.place(p(1, 0), Color::Black);
        assert_eq!(check_legal(&board, p(0, 0), Color::White), Err(MoveError::Suicide(p(0, 0))));
        // Filling your own eye is fine while the group keeps a liberty.
        assert!(is_legal(&board, p(0, 0), Color::Black));
    }

    #[test]
    fn test_suicide_allowed_when_capturing() {
        // Black at (1,0) has no liberty of its own, but it takes the last
        // liberty of the white corner stone.
        let mut board = Board::new();
        board.place(p(0, 0), Color::White);
        board.place(p(0, 1), Color::Black);
        board.place(p(1, 1), Color::White);
        board.place(p(2, 0), Color::White);
        board.place(p(0, 2), Color::White);
        assert!(is_legal(&board, p(1, 0), Color::Black));
        let captured = apply_move(&mut board, p(1, 0), Color::Black).unwrap();
        assert_eq!(captured, vec![p(0, 0)]);
        assert!(board.is_empty(p(0, 0)));
    }

    #[test]
    fn test_capture_group_reported_once() {
        // White pair at (5,5),(5,6); black plays the last liberty at (5,7).
        let mut board = Board::new();
        board.place(p(5, 5), Color::White);
        board.place(p(5, 6), Color::White);
        for pt in [p(4, 5), p(4, 6), p(6, 5), p(6, 6), p(5, 4)] {
            board.place(pt, Color::Black);
        }
        let mut captured = apply_move(&mut board, p(5, 7), Color::Black).unwrap();
        captured.sort();
        assert_eq!(captured, vec![p(5, 5), p(5, 6)]);
    }

    #[test]
    fn test_failed_move_leaves_board_untouched() {
        let mut board = Board::new();
        board.place(p(0, 1), Color::Black);
        board.place(p(1, 0), Color::Black);
        let before = board.clone();
        assert!(apply_move(&mut board, p(0, 0), Color::White).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_win_needs_six() {
        let mut board = Board::new();
        for col in 4..9 {
            board.place(p(9, col), Color::Black);
        }
        assert!(!check_win(&board, p(9, 8), Color::Black));
        board.place(p(9, 9), Color::Black);
        assert!(check_win(&board, p(9, 9), Color::Black));
        assert!(check_win(&board, p(9, 4), Color::Black));
    }

    #[test]
    fn test_win_on_anti_diagonal() {
        let mut board = Board::new();
        for k in 0..6 {
            board.place(p(3 + k, 10 - k), Color::White);
        }
        assert!(check_win(&board, p(5, 8), Color::White));
        assert!(!check_win(&board, p(5, 8), Color::Black));
    }

    #[test]
    fn test_pattern_score_pair() {
        // Target 2 needs a run of three, so a lone pair scores nothing.
        let mut board = Board::new();
        board.place(p(9, 9), Color::Black);
        board.place(p(9, 10), Color::Black);
        assert_eq!(pattern_score(&board, Color::Black), 0);
        assert_eq!(pattern_score(&board, Color::White), 0);
    }

    #[test]
    fn test_pattern_score_overlaps() {
        // Three in a row: every stone matches target 2 (run >= 3), none
        // matches target 3. 3 stones * 2 = 6.
        let mut board = Board::new();
        for col in 0..3 {
            board.place(p(0, col), Color::White);
        }
        assert_eq!(pattern_score(&board, Color::White), 6);
    }

    #[test]
    fn test_draw_only_on_full_board() {
        let mut board = Board::new();
        assert!(check_draw(&board).is_none());
        for pt in Board::points() {
            // Checkerboard: no runs on rows or columns, long diagonals.
            let color = if (pt.row + pt.col) % 2 == 0 { Color::Black } else { Color::White };
            board.place(pt, color);
        }
        let outcome = check_draw(&board).unwrap();
        assert!(outcome.black_score > 0);
        assert!(outcome.white_score > 0);
    }
}
