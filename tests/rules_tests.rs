//! Rules scenarios: legality, capture, six in a row and the full-board draw.

use weiliu::board::{Board, Color, Point};
use weiliu::group::{connected_group, group_liberties, liberties};
use weiliu::rules::{
    DrawOutcome, GameStatus, MoveError, apply_move, check_draw, check_legal, check_win, is_legal,
    pattern_score,
};
use weiliu::session::GameSession;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn p(row: usize, col: usize) -> Point {
    Point::new(row, col)
}

/// Place stones directly, bypassing the rules.
fn setpos(black: &[(usize, usize)], white: &[(usize, usize)]) -> Board {
    let mut board = Board::new();
    for &(r, c) in black {
        board.place(p(r, c), Color::Black);
    }
    for &(r, c) in white {
        board.place(p(r, c), Color::White);
    }
    board
}

/// A full board with no line longer than two in any direction.
fn full_board() -> Board {
    let mut board = Board::new();
    for pt in Board::points() {
        let color = if (pt.row / 2 + pt.col) % 2 == 0 { Color::Black } else { Color::White };
        board.place(pt, color);
    }
    board
}

// =============================================================================
// Coordinates
// =============================================================================

#[test]
fn test_vertex_roundtrip() {
    for text in ["A1", "A19", "T1", "T19", "H5", "J5", "K10"] {
        let pt: Point = text.parse().unwrap();
        assert_eq!(pt.to_string(), text);
    }
    assert_eq!("K10".parse::<Point>().unwrap(), p(9, 9));
    assert_eq!("9,9".parse::<Point>().unwrap(), p(9, 9));
}

#[test]
fn test_vertex_skips_i() {
    let h: Point = "H5".parse().unwrap();
    let j: Point = "J5".parse().unwrap();
    assert_eq!(j.col - h.col, 1);
    assert!("I5".parse::<Point>().is_err());
    assert!("A20".parse::<Point>().is_err());
    assert!("19,0".parse::<Point>().is_err());
}

// =============================================================================
// Legality
// =============================================================================

#[test]
fn test_center_opening_is_legal_and_not_a_win() {
    let mut session = GameSession::new();
    let outcome = session.play(p(9, 9)).unwrap();
    assert!(outcome.captured.is_empty());
    assert_eq!(outcome.status, GameStatus::InProgress);
    assert_eq!(session.board().get(p(9, 9)), Some(Color::Black));
    assert_eq!(session.current_player(), Color::White);
}

#[test]
fn test_is_legal_is_pure_and_idempotent() {
    let board = setpos(&[(0, 1), (1, 0), (4, 4)], &[(4, 5)]);
    let before = board.clone();
    for pt in [p(0, 0), p(4, 4), p(10, 10)] {
        for color in [Color::Black, Color::White] {
            let first = is_legal(&board, pt, color);
            assert_eq!(is_legal(&board, pt, color), first);
        }
    }
    assert_eq!(board, before);
}

#[test]
fn test_suicide_is_rejected_without_touching_the_board() {
    let mut board = setpos(&[(0, 1), (1, 0)], &[]);
    let before = board.clone();
    assert_eq!(
        apply_move(&mut board, p(0, 0), Color::White),
        Err(MoveError::Suicide(p(0, 0)))
    );
    assert_eq!(board, before);
    assert_eq!(
        apply_move(&mut board, p(0, 1), Color::White),
        Err(MoveError::Occupied(p(0, 1)))
    );
    assert_eq!(board, before);
}

#[test]
fn test_suicide_allowed_while_any_opponent_group_is_dead() {
    // A white stone already sits without liberties at (10,10). While it is on
    // the board black may enter a corner that has no liberties.
    let board = setpos(
        &[(9, 10), (11, 10), (10, 9), (10, 11)],
        &[(10, 10), (0, 1), (1, 0)],
    );
    assert_eq!(group_liberties(&board, p(10, 10)), 0);
    assert_eq!(check_legal(&board, p(0, 0), Color::Black), Ok(()));
}

#[test]
fn test_off_board_point_is_rejected() {
    let board = Board::new();
    assert_eq!(
        check_legal(&board, p(19, 0), Color::Black),
        Err(MoveError::OutOfBounds(p(19, 0)))
    );
}

// =============================================================================
// Groups and capture
// =============================================================================

#[test]
fn test_shared_liberties_count_once() {
    // An L shape whose inner corner is adjacent to two of its stones.
    let board = setpos(&[(5, 5), (5, 6), (6, 5)], &[]);
    let group = connected_group(&board, p(5, 5)).unwrap();
    assert_eq!(group.len(), 3);
    // (4,5) (4,6) (5,4) (5,7) (6,4) (6,6) (7,5); (6,6) borders two stones.
    assert_eq!(liberties(&board, &group), 7);
}

#[test]
fn test_single_stone_capture() {
    let mut session = GameSession::from_board(
        setpos(&[(4, 5), (6, 5), (5, 4)], &[(5, 5)]),
        Color::Black,
    );
    let outcome = session.play(p(5, 6)).unwrap();
    assert_eq!(outcome.captured, vec![p(5, 5)]);
    assert!(session.board().is_empty(p(5, 5)));
    assert_eq!(session.board().get(p(5, 6)), Some(Color::Black));
    assert_eq!(session.history()[0].captures, vec![p(5, 5)]);
}

#[test]
fn test_group_capture_on_the_edge() {
    let mut board = setpos(&[(1, 0), (1, 1)], &[(0, 0), (0, 1)]);
    assert_eq!(group_liberties(&board, p(0, 0)), 1);
    let mut captured = apply_move(&mut board, p(0, 2), Color::Black).unwrap();
    captured.sort();
    assert_eq!(captured, vec![p(0, 0), p(0, 1)]);
    assert_eq!(board.stone_count(), 3);
}

// =============================================================================
// Winning and drawing
// =============================================================================

#[test]
fn test_five_plus_one_wins() {
    let mut board = setpos(&[(9, 4), (9, 5), (9, 6), (9, 7), (9, 8)], &[]);
    assert!(!check_win(&board, p(9, 8), Color::Black));
    apply_move(&mut board, p(9, 9), Color::Black).unwrap();
    assert!(check_win(&board, p(9, 9), Color::Black));
    assert!(check_win(&board, p(9, 4), Color::Black));
    assert!(!check_win(&board, p(9, 9), Color::White));
}

#[test]
fn test_diagonal_and_long_lines_win() {
    let diagonal: Vec<(usize, usize)> = (0..6).map(|i| (i, 13 + i)).collect();
    let board = setpos(&[], &diagonal);
    assert!(check_win(&board, p(2, 15), Color::White));

    let anti: Vec<(usize, usize)> = (0..6).map(|i| (10 + i, 8 - i)).collect();
    let board = setpos(&anti, &[]);
    assert!(check_win(&board, p(12, 6), Color::Black));

    let seven: Vec<(usize, usize)> = (0..7).map(|r| (r, 3)).collect();
    let board = setpos(&seven, &[]);
    assert!(check_win(&board, p(6, 3), Color::Black));
}

#[test]
fn test_broken_line_does_not_win() {
    let board = setpos(&[(3, 0), (3, 1), (3, 2), (3, 4), (3, 5), (3, 6)], &[(3, 3)]);
    assert!(!check_win(&board, p(3, 2), Color::Black));
    assert!(!check_win(&board, p(3, 4), Color::Black));
}

#[test]
fn test_full_board_is_scored() {
    let board = full_board();
    let outcome = check_draw(&board).unwrap();
    assert_eq!(outcome.black_score, pattern_score(&board, Color::Black));
    assert_eq!(outcome.white_score, pattern_score(&board, Color::White));
    assert!(check_draw(&Board::new()).is_none());

    let tie = DrawOutcome {
        black_score: 7,
        white_score: 7,
    };
    assert_eq!(tie.winner(), None);
}

#[test]
fn test_pattern_score_counts_runs() {
    let board = setpos(&[(0, 0), (0, 1), (0, 2)], &[]);
    // Each of the three stones sees a run of 3, which beats target 2.
    assert_eq!(pattern_score(&board, Color::Black), 6);
    assert_eq!(pattern_score(&board, Color::White), 0);
}

#[test]
fn test_pattern_score_accumulates_targets() {
    // Four in a row clears targets 2 and 3 at every stone: 4 * (2 + 3).
    let four: Vec<(usize, usize)> = (0..4).map(|c| (0, c)).collect();
    assert_eq!(pattern_score(&setpos(&four, &[]), Color::Black), 20);

    // Six clears every target at every stone: 6 * (2 + 3 + 4 + 5).
    let six: Vec<(usize, usize)> = (0..6).map(|c| (0, c)).collect();
    assert_eq!(pattern_score(&setpos(&[], &six), Color::White), 84);
}
