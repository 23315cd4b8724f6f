//! Random playouts (rollouts) used to score candidate moves.
//!
//! A rollout plays the candidate on a private copy of the board, then lets
//! both sides drop stones on uniformly random empty points until somebody
//! lines up six, the board fills, or the horizon runs out.

use fastrand::Rng;

use crate::board::{Board, Color, Point};
use crate::constants::MAX_ROLLOUT_SKIPS;
use crate::rules::{apply_move, check_win};

/// Play `first` for `mover`, then random moves up to `horizon` plies.
///
/// Returns the reward from `mover`'s perspective:
/// - `+1.0` if `mover` completes a line (including with `first` itself)
/// - `-1.0` if the opponent does, or if `first` is illegal
/// - `0.0` if the board fills up
/// - a coin flip of `±1.0` when the horizon is reached unresolved
///
/// Every stone goes through [`apply_move`], so random moves capture and
/// respect the suicide rule exactly like moves in a real game.
///
/// A random pick that is illegal for the side to move is not played; the turn
/// passes to the other color and the horizon is not charged.
pub fn rollout(board: &Board, mover: Color, first: Point, horizon: usize, rng: &mut Rng) -> f64 {
    let mut sim = board.clone();
    if apply_move(&mut sim, first, mover).is_err() {
        return -1.0;
    }
    if check_win(&sim, first, mover) {
        return 1.0;
    }

    let mut current = mover.opponent();
    let mut moves_left = horizon;
    let mut skips = 0;

    while moves_left > 0 {
        let empty = sim.empty_points();
        if empty.is_empty() {
            break;
        }
        let pt = empty[rng.usize(..empty.len())];

        if apply_move(&mut sim, pt, current).is_err() {
            current = current.opponent();
            skips += 1;
            if skips >= MAX_ROLLOUT_SKIPS {
                break;
            }
            continue;
        }
        skips = 0;

        if check_win(&sim, pt, current) {
            return if current == mover { 1.0 } else { -1.0 };
        }

        current = current.opponent();
        moves_left -= 1;
    }

    if sim.is_full() {
        return 0.0;
    }
    if rng.bool() { 1.0 } else { -1.0 }
}
