//! Line scanning along the four board axes.
//!
//! Wins, the draw-break score and the move heuristics all reduce to walking
//! from a point along one of [`DIRECTIONS`](crate::constants::DIRECTIONS) and
//! counting what is found. The walks here never look at the center point
//! itself; callers decide whether it counts.

use crate::board::{Board, Color, Point};

/// Count consecutive `color` stones stepping from `pt` along `(dr, dc)`,
/// excluding `pt`, looking at most `reach` cells.
#[inline]
pub fn count_direction(
    board: &Board,
    pt: Point,
    (dr, dc): (isize, isize),
    color: Color,
    reach: usize,
) -> usize {
    (1..=reach as isize)
        .map_while(|k| pt.offset(dr, dc, k))
        .take_while(|&p| board.get(p) == Some(color))
        .count()
}

/// Length of the `color` run through `pt` along an axis, counting `pt` as a
/// member whatever it holds. Each half-line is capped at `reach`.
#[inline]
pub fn line_length(
    board: &Board,
    pt: Point,
    (dr, dc): (isize, isize),
    color: Color,
    reach: usize,
) -> usize {
    1 + count_direction(board, pt, (dr, dc), color, reach)
        + count_direction(board, pt, (-dr, -dc), color, reach)
}

/// What a half-line walk found before it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HalfLine {
    /// Stones of the scanning color passed over.
    pub own: u32,
    /// Empty cells passed over (walks that continue through empties only).
    pub empty: u32,
    /// The walk ended on an empty cell.
    pub ended_on_empty: bool,
}

/// Walk a half-line that continues through empty cells and stops at the
/// first opposing stone or the edge.
pub fn scan_open(
    board: &Board,
    pt: Point,
    (dr, dc): (isize, isize),
    color: Color,
    reach: usize,
) -> HalfLine {
    let mut line = HalfLine::default();
    for p in (1..=reach as isize).map_while(|k| pt.offset(dr, dc, k)) {
        match board.get(p) {
            Some(c) if c == color => line.own += 1,
            None => line.empty += 1,
            Some(_) => break,
        }
    }
    line
}

/// Walk a half-line over `color` stones only, noting whether the first
/// non-`color` cell was empty.
pub fn scan_run(
    board: &Board,
    pt: Point,
    (dr, dc): (isize, isize),
    color: Color,
    reach: usize,
) -> HalfLine {
    let mut line = HalfLine::default();
    for p in (1..=reach as isize).map_while(|k| pt.offset(dr, dc, k)) {
        match board.get(p) {
            Some(c) if c == color => line.own += 1,
            None => {
                line.ended_on_empty = true;
                break;
            }
            Some(_) => break,
        }
    }
    line
}
