//! Automatic training: the engine plays both sides and the finished games are
//! collected into a [`TrainingCorpus`].

use fastrand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::{BOARD_AREA, MAX_TRAINING_ROUNDS};
use crate::frequency::{GameRecord, TrainingCorpus};
use crate::mcts::SearchConfig;
use crate::session::{GameSession, SessionError};
use crate::strategy::{DecisionContext, Difficulty};

#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("training rounds must be between 1 and {MAX_TRAINING_ROUNDS}, got {0}")]
    InvalidRounds(usize),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, Copy)]
pub struct SelfPlayConfig {
    /// Difficulty used for both sides.
    pub difficulty: Difficulty,
    /// Games still running after this many moves are recorded as undecided.
    pub max_moves: usize,
    pub search: SearchConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            max_moves: BOARD_AREA,
            search: SearchConfig::default(),
        }
    }
}

fn play_with(
    config: &SelfPlayConfig,
    ctx: &DecisionContext<'_>,
    rng: &mut Rng,
) -> Result<GameRecord, SessionError> {
    let mut session = GameSession::new();
    while !session.is_over() && session.history().len() < config.max_moves {
        match session.play_ai(config.difficulty, ctx, rng) {
            Ok(_) => {}
            Err(SessionError::NoLegalMove) => {
                debug!(moves = session.history().len(), "no legal move left");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(session.to_game_record())
}

/// Play one game from an empty board, black first.
pub fn play_game(config: &SelfPlayConfig, rng: &mut Rng) -> Result<GameRecord, SessionError> {
    let ctx = DecisionContext {
        corpus: None,
        search: config.search,
    };
    play_with(config, &ctx, rng)
}

/// Play `rounds` games and collect them.
///
/// At the `trained` difficulty each game learns from the ones recorded before
/// it.
pub fn run(
    config: &SelfPlayConfig,
    rounds: usize,
    rng: &mut Rng,
) -> Result<TrainingCorpus, SelfPlayError> {
    if !(1..=MAX_TRAINING_ROUNDS).contains(&rounds) {
        return Err(SelfPlayError::InvalidRounds(rounds));
    }
    info!(rounds, difficulty = %config.difficulty, "self-play started");

    let mut corpus = TrainingCorpus::new();
    for round in 1..=rounds {
        let game = {
            let ctx = DecisionContext {
                corpus: Some(&corpus),
                search: config.search,
            };
            play_with(config, &ctx, rng)?
        };
        info!(
            round,
            of = rounds,
            moves = game.moves.len(),
            result = ?game.result,
            "self-play game finished"
        );
        corpus.push(game);
    }
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::GameResult;

    fn quick() -> SelfPlayConfig {
        SelfPlayConfig {
            difficulty: Difficulty::Random,
            max_moves: 40,
            search: SearchConfig::with_iterations(10),
        }
    }

    #[test]
    fn test_rounds_are_validated() {
        let mut rng = Rng::with_seed(1);
        assert!(matches!(
            run(&quick(), 0, &mut rng),
            Err(SelfPlayError::InvalidRounds(0))
        ));
        assert!(matches!(
            run(&quick(), MAX_TRAINING_ROUNDS + 1, &mut rng),
            Err(SelfPlayError::InvalidRounds(_))
        ));
    }

    #[test]
    fn test_move_cap_leaves_game_undecided() {
        let mut rng = Rng::with_seed(3);
        let game = play_game(&quick(), &mut rng).unwrap();
        assert!(game.moves.len() <= 40);
        if game.moves.len() == 40 {
            assert_eq!(game.result, GameResult::Undecided);
        }
        assert_eq!(game.moves[0].player, crate::board::Color::Black);
    }

    #[test]
    fn test_run_collects_every_game() {
        let mut rng = Rng::with_seed(8);
        let config = SelfPlayConfig {
            difficulty: Difficulty::Trained,
            ..quick()
        };
        let corpus = run(&config, 3, &mut rng).unwrap();
        assert_eq!(corpus.len(), 3);
        assert!(corpus.games.iter().all(|g| !g.moves.is_empty()));
    }
}
