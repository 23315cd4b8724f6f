//! Line-oriented text protocol for driving a game from a terminal or a
//! front end.
//!
//! The framing follows GTP: one command per line, an optional numeric id,
//! and responses of the form `=id message` or `?id error` followed by a blank
//! line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `clear_board` - Start a new game
//! - `play [color] <vertex>` - Play for the side to move (`K10` or `9,9`)
//! - `genmove [color|difficulty]` - Let the engine play for the side to move
//! - `undo` - Take back the last move
//! - `showboard`
//! - `difficulty [tag]` - Show or set the engine level
//! - `status` - Whose turn it is, or how the game ended
//! - `score` - Running draw-break scores
//! - `save <path>`, `load <path>` - Game snapshots as JSON
//! - `corpus <path>` - Load recorded games for the `trained` level
//!
//! ## Example
//!
//! ```no_run
//! use weiliu::protocol::Engine;
//! let mut engine = Engine::new(fastrand::Rng::new());
//! engine.run(std::io::stdin().lock(), std::io::stdout()).unwrap();
//! ```

use std::io::{self, BufRead, Write};

use fastrand::Rng;
use tracing::debug;

use crate::board::{Color, Point};
use crate::frequency::TrainingCorpus;
use crate::mcts::SearchConfig;
use crate::rules::GameStatus;
use crate::session::GameSession;
use crate::strategy::{DecisionContext, Difficulty};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "corpus",
    "difficulty",
    "genmove",
    "known_command",
    "list_commands",
    "load",
    "name",
    "play",
    "protocol_version",
    "quit",
    "save",
    "score",
    "showboard",
    "status",
    "undo",
    "version",
];

/// Protocol engine state.
pub struct Engine {
    session: GameSession,
    difficulty: Difficulty,
    corpus: Option<TrainingCorpus>,
    search: SearchConfig,
    rng: Rng,
}

impl Engine {
    pub fn new(rng: Rng) -> Self {
        Self::with_search(SearchConfig::default(), rng)
    }

    pub fn with_search(search: SearchConfig, rng: Rng) -> Self {
        Self {
            session: GameSession::new(),
            difficulty: Difficulty::default(),
            corpus: None,
            search,
            rng,
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_corpus(&mut self, corpus: TrainingCorpus) {
        self.corpus = Some(corpus);
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!(%command, ?args, "command received");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn check_turn(&self, arg: &str) -> Result<(), String> {
        let color: Color = arg.parse().map_err(|_| format!("invalid color: {arg}"))?;
        if color != self.session.current_player() {
            return Err(format!("it is {}'s turn", self.session.current_player()));
        }
        Ok(())
    }

    fn status_line(&self) -> String {
        match self.session.status() {
            GameStatus::InProgress => format!("{} to move", self.session.current_player()),
            GameStatus::Won(color) => format!("{color} wins"),
            GameStatus::Drawn(outcome) => match outcome.winner() {
                Some(color) => format!(
                    "board full, {color} wins on score {}-{}",
                    outcome.black_score, outcome.white_score
                ),
                None => format!("draw {}-{}", outcome.black_score, outcome.white_score),
            },
        }
    }

    fn play(&mut self, args: &[&str]) -> (bool, String) {
        let vertex = match args {
            [vertex] => *vertex,
            [color, vertex, ..] => {
                if let Err(e) = self.check_turn(color) {
                    return (false, e);
                }
                *vertex
            }
            [] => return (false, "missing argument".to_string()),
        };
        let pt: Point = match vertex.parse() {
            Ok(pt) => pt,
            Err(e) => return (false, format!("{e}")),
        };
        match self.session.play(pt) {
            Ok(outcome) if outcome.status.is_terminal() => (true, self.status_line()),
            Ok(_) => (true, String::new()),
            Err(e) => (false, e.to_string()),
        }
    }

    fn genmove(&mut self, args: &[&str]) -> (bool, String) {
        let mut difficulty = self.difficulty;
        if let Some(arg) = args.first() {
            if arg.parse::<Color>().is_ok() {
                if let Err(e) = self.check_turn(arg) {
                    return (false, e);
                }
            } else {
                match arg.parse() {
                    Ok(d) => difficulty = d,
                    Err(e) => return (false, e),
                }
            }
        }

        let ctx = DecisionContext {
            corpus: self.corpus.as_ref(),
            search: self.search,
        };
        match self.session.play_ai(difficulty, &ctx, &mut self.rng) {
            Ok(outcome) => (true, outcome.point.to_string()),
            Err(e) => (false, e.to_string()),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.session.restart();
                (true, String::new())
            }

            "play" => self.play(args),

            "genmove" => self.genmove(args),

            "undo" => match self.session.undo() {
                Ok(record) => (true, record.point().to_string()),
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.session.board())),

            "difficulty" => match args.first() {
                None => (true, self.difficulty.to_string()),
                Some(tag) => match tag.parse() {
                    Ok(d) => {
                        self.difficulty = d;
                        (true, String::new())
                    }
                    Err(e) => (false, e),
                },
            },

            "status" => (true, self.status_line()),

            "score" => {
                let (black, white) = self.session.scores();
                (true, format!("black {black} white {white}"))
            }

            "save" => {
                let Some(path) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match self.session.save(path) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "load" => {
                let Some(path) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match GameSession::load(path) {
                    Ok(session) => {
                        self.session = session;
                        (true, self.status_line())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "corpus" => {
                let Some(path) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match TrainingCorpus::load(path) {
                    Ok(corpus) => {
                        let games = corpus.len();
                        self.corpus = Some(corpus);
                        (true, format!("{games} games"))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::with_search(SearchConfig::with_iterations(20), Rng::with_seed(5))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Engine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Engine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "weiliu");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_checks_turn_and_vertex() {
        let mut engine = engine();

        let (success, _) = engine.execute("play", &["K10"]);
        assert!(success);
        assert_eq!(engine.session().board().get(Point::new(9, 9)), Some(Color::Black));

        let (success, response) = engine.execute("play", &["black", "A1"]);
        assert!(!success);
        assert_eq!(response, "it is white's turn");

        let (success, _) = engine.execute("play", &["9,9"]);
        assert!(!success);

        let (success, _) = engine.execute("play", &["Z99"]);
        assert!(!success);
    }

    #[test]
    fn test_genmove_and_undo() {
        let mut engine = engine();
        let (success, vertex) = engine.execute("genmove", &["easy"]);
        assert!(success);
        let pt: Point = vertex.parse().unwrap();
        assert_eq!(engine.session().board().get(pt), Some(Color::Black));

        let (success, undone) = engine.execute("undo", &[]);
        assert!(success);
        assert_eq!(undone, vertex);
        assert_eq!(engine.session().board().stone_count(), 0);

        let (success, _) = engine.execute("undo", &[]);
        assert!(!success);
        let (success, _) = engine.execute("genmove", &["expert"]);
        assert!(!success);
    }

    #[test]
    fn test_difficulty_and_status() {
        let mut engine = engine();
        assert_eq!(engine.execute("difficulty", &[]), (true, "medium".to_string()));
        assert!(engine.execute("difficulty", &["hard"]).0);
        assert_eq!(engine.execute("difficulty", &[]), (true, "hard".to_string()));
        assert_eq!(engine.execute("status", &[]), (true, "black to move".to_string()));
        assert_eq!(engine.execute("score", &[]), (true, "black 0 white 0".to_string()));
    }

    #[test]
    fn test_run_frames_responses() {
        let mut engine = engine();
        let input = b"1 name\nbogus\n# comment\n2 play A19\nquit\nname\n";
        let mut output = Vec::new();
        engine.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 weiliu\n\n? unknown command: bogus\n\n=2 \n\n= \n\n"
        );
        assert_eq!(engine.session().board().get(Point::new(0, 0)), Some(Color::Black));
    }
}
