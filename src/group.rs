//! Connected groups and liberty counting.
//!
//! A group is the maximal set of same-colored stones reachable through
//! orthogonal steps. Groups are never stored; they are recomputed by
//! flood-fill whenever the rules need them.

use crate::board::{Board, Point};
use crate::constants::BOARD_AREA;

/// Collect every stone connected to `start`.
///
/// Returns `None` when `start` is empty, since an empty point has no group.
/// Stones come back in flood-fill order, `start` first.
pub fn connected_group(board: &Board, start: Point) -> Option<Vec<Point>> {
    let color = board.get(start)?;
    let mut stack = vec![start];
    let mut visited = [false; BOARD_AREA];
    let mut group = Vec::new();
    visited[start.index()] = true;

    while let Some(pt) = stack.pop() {
        group.push(pt);
        for n in pt.neighbors() {
            if !visited[n.index()] && board.get(n) == Some(color) {
                visited[n.index()] = true;
                stack.push(n);
            }
        }
    }
    Some(group)
}

/// Count the distinct empty points orthogonally adjacent to any stone of
/// `group`. A liberty shared by two stones counts once.
pub fn liberties(board: &Board, group: &[Point]) -> usize {
    let mut seen = [false; BOARD_AREA];
    let mut libs = 0;
    for &pt in group {
        for n in pt.neighbors() {
            if board.is_empty(n) && !seen[n.index()] {
                seen[n.index()] = true;
                libs += 1;
            }
        }
    }
    libs
}

/// Liberties of the group containing `pt`, or 0 if `pt` is empty.
pub fn group_liberties(board: &Board, pt: Point) -> usize {
    connected_group(board, pt)
        .map(|group| liberties(board, &group))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn p(row: usize, col: usize) -> Point {
        Point::new(row, col)
    }

    #[test]
    fn test_empty_point_has_no_group() {
        let board = Board::new();
        assert!(connected_group(&board, p(3, 3)).is_none());
        assert_eq!(group_liberties(&board, p(3, 3)), 0);
    }

    #[test]
    fn test_single_stone_liberties() {
        let mut board = Board::new();
        board.place(p(9, 9), Color::Black);
        assert_eq!(group_liberties(&board, p(9, 9)), 4);

        board.place(p(0, 0), Color::White);
        assert_eq!(group_liberties(&board, p(0, 0)), 2);
    }

    #[test]
    fn test_group_stops_at_other_color() {
        let mut board = Board::new();
        board.place(p(5, 5), Color::Black);
        board.place(p(5, 6), Color::Black);
        board.place(p(5, 7), Color::White);
        board.place(p(6, 6), Color::Black);

        let mut group = connected_group(&board, p(5, 5)).unwrap();
        group.sort();
        assert_eq!(group, vec![p(5, 5), p(5, 6), p(6, 6)]);
    }

    #[test]
    fn test_diagonal_is_not_connected() {
        let mut board = Board::new();
        board.place(p(5, 5), Color::Black);
        board.place(p(6, 6), Color::Black);
        assert_eq!(connected_group(&board, p(5, 5)).unwrap().len(), 1);
    }

    #[test]
    fn test_shared_liberty_counted_once() {
        // Two stones in an L share the empty corner at (4,5).
        let mut board = Board::new();
        board.place(p(4, 4), Color::Black);
        board.place(p(5, 4), Color::Black);
        board.place(p(5, 5), Color::Black);
        // Neighbours: (3,4) (4,3) (5,3) (6,4) (4,5) (6,5) (5,6) = 7 distinct
        assert_eq!(group_liberties(&board, p(4, 4)), 7);
    }
}
