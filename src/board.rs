//! The 19x19 grid of stones and its coordinates.
//!
//! [`Board`] is plain data: it knows which color (if any) sits on each
//! intersection and nothing about the rules. Copies are cheap value copies of
//! the fixed-size grid, which is what probes and rollouts rely on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{N, ORTHOGONAL};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

impl FromStr for Color {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Color::Black),
            "white" | "w" => Ok(Color::White),
            _ => Err(ParsePointError(s.to_string())),
        }
    }
}

/// An intersection, `(row, col)` with row 0 at the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `k` cells along `(dr, dc)`. Returns `None` once off the board.
    pub fn offset(self, dr: isize, dc: isize, k: isize) -> Option<Point> {
        let r = self.row as isize + dr * k;
        let c = self.col as isize + dc * k;
        if r < 0 || c < 0 || r >= N as isize || c >= N as isize {
            return None;
        }
        Some(Point::new(r as usize, c as usize))
    }

    /// Orthogonal neighbors that lie on the board.
    pub fn neighbors(self) -> impl Iterator<Item = Point> {
        ORTHOGONAL
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc, 1))
    }

    pub(crate) fn index(self) -> usize {
        self.row * N + self.col
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePointError(pub String);

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid coordinate: {}", self.0)
    }
}

impl std::error::Error for ParsePointError {}

/// Column letters skip 'I' to avoid confusion with 'J'.
fn column_letter(col: usize) -> char {
    let c = b'A' + col as u8;
    if c >= b'I' { (c + 1) as char } else { c as char }
}

/// Board coordinates print as a column letter plus a row number counted
/// from the bottom edge, e.g. `K10` for the center point.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.col), N - self.row)
    }
}

/// Accepts either a lettered vertex (`K10`, case-insensitive) or a raw
/// `row,col` pair.
impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePointError(s.to_string());
        let s = s.trim();

        if let Some((r, c)) = s.split_once(',') {
            let row: usize = r.trim().parse().map_err(|_| err())?;
            let col: usize = c.trim().parse().map_err(|_| err())?;
            if row >= N || col >= N {
                return Err(err());
            }
            return Ok(Point::new(row, col));
        }

        let bytes = s.as_bytes();
        if bytes.len() < 2 {
            return Err(err());
        }
        let letter = bytes[0].to_ascii_uppercase();
        if !letter.is_ascii_uppercase() || letter == b'I' {
            return Err(err());
        }
        let mut col = (letter - b'A') as usize;
        if letter > b'I' {
            col -= 1;
        }
        let number: usize = s[1..].parse().map_err(|_| err())?;
        if col >= N || number == 0 || number > N {
            return Err(err());
        }
        Ok(Point::new(N - number, col))
    }
}

/// Fixed-size grid of intersections. Serializes as a 19x19 nested array of
/// `null | "black" | "white"`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Color>; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; N]; N],
        }
    }

    pub fn get(&self, pt: Point) -> Option<Color> {
        self.cells[pt.row][pt.col]
    }

    pub fn is_empty(&self, pt: Point) -> bool {
        self.get(pt).is_none()
    }

    /// Put a stone on `pt` without consulting any rules.
    pub fn place(&mut self, pt: Point, color: Color) {
        self.cells[pt.row][pt.col] = Some(color);
    }

    pub fn remove(&mut self, pt: Point) {
        self.cells[pt.row][pt.col] = None;
    }

    /// All intersections in row-major order.
    pub fn points() -> impl Iterator<Item = Point> {
        (0..N).flat_map(|row| (0..N).map(move |col| Point::new(row, col)))
    }

    /// Empty intersections in row-major order.
    pub fn empty_points(&self) -> Vec<Point> {
        Self::points().filter(|&pt| self.is_empty(pt)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| c.is_some())
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn rows(&self) -> &[[Option<Color>; N]; N] {
        &self.cells
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board {{ stones: {} }}\n{self}", self.stone_count())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..N {
            write!(f, "{} ", column_letter(col))?;
        }
        writeln!(f)?;
        for row in 0..N {
            write!(f, "{:>2} ", N - row)?;
            for col in 0..N {
                let ch = match self.cells[row][col] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
