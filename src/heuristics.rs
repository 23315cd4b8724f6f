//! Board scans that suggest moves without searching.
//!
//! Every finder walks the empty points in row-major order. The pools returned
//! by the connect, block and strong finders are unranked; callers pick from
//! them uniformly.

use crate::board::{Board, Color, Point};
use crate::constants::{CONNECT_THRESHOLD, DIRECTIONS, SCAN_REACH, STRONG_RUN};
use crate::patterns::{scan_open, scan_run};
use crate::rules::check_win;

/// First empty point (row-major) where `color` would complete six in a row.
pub fn find_winning_move(board: &Board, color: Color) -> Option<Point> {
    // check_win counts the probed point as a stone, so no placement is needed.
    Board::points().find(|&pt| board.is_empty(pt) && check_win(board, pt, color))
}

/// Open space around `pt` from `color`'s point of view.
///
/// Along each axis, both half-lines are walked up to five cells, passing over
/// `color` stones and stopping at the first opposing stone. Every empty cell
/// passed adds one.
pub fn connect_potential(board: &Board, pt: Point, color: Color) -> u32 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            scan_open(board, pt, (dr, dc), color, SCAN_REACH).empty
                + scan_open(board, pt, (-dr, -dc), color, SCAN_REACH).empty
        })
        .sum()
}

fn potential_pool(board: &Board, color: Color) -> Vec<Point> {
    board
        .empty_points()
        .into_iter()
        .filter(|&pt| connect_potential(board, pt, color) >= CONNECT_THRESHOLD)
        .collect()
}

/// Empty points with enough connect potential for the mover.
pub fn find_connect_moves(board: &Board, color: Color) -> Vec<Point> {
    potential_pool(board, color)
}

/// Empty points with enough connect potential for `opponent`; playing there
/// takes the space away from them.
pub fn find_block_moves(board: &Board, opponent: Color) -> Vec<Point> {
    potential_pool(board, opponent)
}

/// Empty points that extend an existing line of three or more.
///
/// Along some axis the unbroken `color` stones on both sides of the point add
/// up to at least three, and at least one side ends on an empty cell.
pub fn find_strong_moves(board: &Board, color: Color) -> Vec<Point> {
    board
        .empty_points()
        .into_iter()
        .filter(|&pt| {
            DIRECTIONS.iter().any(|&(dr, dc)| {
                let fwd = scan_run(board, pt, (dr, dc), color, SCAN_REACH);
                let back = scan_run(board, pt, (-dr, -dc), color, SCAN_REACH);
                fwd.own + back.own >= STRONG_RUN && (fwd.ended_on_empty || back.ended_on_empty)
            })
        })
        .collect()
}
