//! Weiliu: six in a row with Go-style capture on a 19x19 board.
//!
//! Players alternate placing stones. Six in an unbroken line wins; a stone
//! that leaves an opponent group without liberties captures it; a move that
//! leaves its own group without liberties is illegal unless some opponent
//! group is dead. A full board without a winner is settled by a pattern
//! score. The crate also provides an engine with several difficulty levels,
//! from plain heuristics up to Monte Carlo search and a frequency model
//! trained on recorded games.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`board`] - Board, colors and coordinates
//! - [`group`] - Connected groups and liberties
//! - [`patterns`] - Directional line scans
//! - [`rules`] - Legality, captures, win and draw detection
//! - [`heuristics`] - Winning, connect, block and strong move finders
//! - [`playout`] - Random rollouts
//! - [`mcts`] - UCB1 search over candidate moves
//! - [`frequency`] - Training corpus and frequency model
//! - [`strategy`] - Difficulty levels and move decisions
//! - [`session`] - A game in progress, with undo and snapshots
//! - [`selfplay`] - Engine-vs-engine training games
//! - [`protocol`] - Text command protocol
//!
//! ## Example
//!
//! ```
//! use weiliu::board::{Color, Point};
//! use weiliu::session::GameSession;
//! use weiliu::strategy::{DecisionContext, Difficulty};
//!
//! let mut session = GameSession::new();
//! session.play(Point::new(9, 9)).unwrap();
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let reply = session
//!     .play_ai(Difficulty::Medium, &DecisionContext::default(), &mut rng)
//!     .unwrap();
//! assert_eq!(reply.player, Color::White);
//! ```

pub mod board;
pub mod constants;
pub mod frequency;
pub mod group;
pub mod heuristics;
pub mod mcts;
pub mod patterns;
pub mod playout;
pub mod protocol;
pub mod rules;
pub mod selfplay;
pub mod session;
pub mod strategy;
