//! Weiliu: six in a row with capture.
//!
//! ## Usage
//!
//! - `weiliu` - Show a demo game
//! - `weiliu shell` - Start the text protocol on stdin/stdout
//! - `weiliu selfplay --games 50 --out corpus.json` - Record training games
//! - `weiliu analyze corpus.json` - Summarize a training corpus
//! - `weiliu demo` - Play one engine-vs-engine game

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fastrand::Rng;
use tracing::info;

use weiliu::constants::{BOARD_AREA, DEFAULT_TRAINING_ROUNDS};
use weiliu::frequency::TrainingCorpus;
use weiliu::mcts::SearchConfig;
use weiliu::protocol::Engine;
use weiliu::selfplay::{self, SelfPlayConfig};
use weiliu::session::{GameSession, SessionError};
use weiliu::strategy::{DecisionContext, Difficulty};

/// Weiliu: six in a row with Go-style capture
#[derive(Parser)]
#[command(name = "weiliu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct EngineArgs {
    /// Seed for reproducible play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Search iterations for the hard level
    #[arg(long, global = true, default_value_t = weiliu::constants::N_ITERATIONS)]
    iterations: usize,

    /// Wall-clock budget per search in milliseconds
    #[arg(long, global = true)]
    time_limit_ms: Option<u64>,
}

impl EngineArgs {
    fn search(&self) -> SearchConfig {
        SearchConfig {
            iterations: self.iterations,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
            ..SearchConfig::default()
        }
    }

    fn rng(&self) -> Rng {
        self.seed.map_or_else(Rng::new, Rng::with_seed)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text command protocol on stdin/stdout
    Shell {
        /// Engine level for genmove
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        /// Training corpus for the trained level
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Record engine-vs-engine games as a training corpus
    Selfplay {
        /// Number of games (1-1000)
        #[arg(long, default_value_t = DEFAULT_TRAINING_ROUNDS)]
        games: usize,
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        /// Games still running after this many moves are recorded as undecided
        #[arg(long, default_value_t = BOARD_AREA)]
        max_moves: usize,
        /// Output file; the corpus is printed to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Summarize a training corpus
    Analyze {
        path: PathBuf,
    },
    /// Play one engine-vs-engine game and print it
    Demo {
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Commands::Shell { difficulty, corpus }) => {
            let mut engine = Engine::with_search(cli.engine.search(), cli.engine.rng());
            engine.set_difficulty(difficulty);
            if let Some(path) = corpus {
                let corpus = TrainingCorpus::load(&path)
                    .with_context(|| format!("failed to load corpus {}", path.display()))?;
                info!(games = corpus.len(), "corpus loaded");
                engine.set_corpus(corpus);
            }
            engine
                .run(io::stdin().lock(), io::stdout())
                .context("protocol I/O failed")?;
        }
        Some(Commands::Selfplay {
            games,
            difficulty,
            max_moves,
            out,
        }) => {
            let config = SelfPlayConfig {
                difficulty,
                max_moves,
                search: cli.engine.search(),
            };
            let corpus = selfplay::run(&config, games, &mut cli.engine.rng())?;
            match out {
                Some(path) => corpus
                    .save(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{}", corpus.to_json()?),
            }
        }
        Some(Commands::Analyze { path }) => {
            let corpus = TrainingCorpus::load(&path)
                .with_context(|| format!("failed to load corpus {}", path.display()))?;
            print_summary(&corpus);
        }
        Some(Commands::Demo { difficulty }) => {
            run_demo(difficulty, &cli.engine)?;
        }
        None => run_demo(Difficulty::Medium, &cli.engine)?,
    }
    Ok(())
}

fn print_summary(corpus: &TrainingCorpus) {
    let s = corpus.summary();
    let moves: usize = corpus.games.iter().map(|g| g.moves.len()).sum();
    println!("Games:          {}", s.games);
    println!("Moves:          {moves}");
    println!("Black wins:     {}", s.black_wins);
    println!("White wins:     {}", s.white_wins);
    println!("Tagged wins:    {}", s.wins);
    println!("Tagged losses:  {}", s.losses);
    println!("Draws:          {}", s.draws);
    println!("Undecided:      {}", s.undecided);
    println!("Connect moves:  {}", s.connect_moves);
    println!("Block moves:    {}", s.block_moves);
}

fn run_demo(difficulty: Difficulty, args: &EngineArgs) -> Result<()> {
    println!("Weiliu: six in a row with capture ({difficulty} vs {difficulty})\n");

    let mut rng = args.rng();
    let ctx = DecisionContext {
        corpus: None,
        search: args.search(),
    };
    let mut session = GameSession::new();
    while !session.is_over() {
        let outcome = match session.play_ai(difficulty, &ctx, &mut rng) {
            Ok(outcome) => outcome,
            Err(SessionError::NoLegalMove) => {
                println!("{} has no legal move", session.current_player());
                break;
            }
            Err(e) => return Err(e.into()),
        };
        if !outcome.captured.is_empty() {
            println!(
                "{} {} captures {}",
                outcome.player,
                outcome.point,
                outcome.captured.len()
            );
        }
    }

    println!("{}", session.board());
    let (black, white) = session.scores();
    println!("Moves: {}", session.history().len());
    println!("Pattern score: black {black}, white {white}");
    println!("Result: {:?}", session.status());
    Ok(())
}
