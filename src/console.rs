//! Line-oriented console driver.
//!
//! The framing follows the Go Text Protocol: each request is an optional
//! numeric id, a command and its arguments; each response is `=id message`
//! on success or `?id message` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`, `known_command <cmd>`
//! - `quit` - Exit the loop
//! - `boardsize <size>` - Only 9 is accepted
//! - `clear_board` - Start a new game with the same configuration
//! - `komi <value>` - Set komi
//! - `play <color> <vertex|pass>` - Play a move; the engine replies if it is its turn
//! - `genmove` - Let the heuristic engine play for the side to move
//! - `undo` - Take back the last move (and the engine's reply)
//! - `engine <on|off>` - Enable or disable the engine
//! - `dead <vertex>` - Toggle the dead mark of a group (marking phase)
//! - `final_score` - Score the game (marking phase)
//! - `phase` - Current game phase
//! - `showboard` - Print the board
//! - `territory` - Print the territory map of the finished game

use std::io::{BufRead, Write};

use tracing::{debug, trace, warn};

use crate::board::{Color, parse_coord, str_coord};
use crate::config::GameConfig;
use crate::constants::N;
use crate::game::{Event, Game, Undo};
use crate::heuristic::EngineMove;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "dead",
    "engine",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "phase",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "territory",
    "undo",
    "version",
];

/// Console driver state.
pub struct Console {
    /// Configuration used for every new game
    config: GameConfig,
    game: Game,
}

impl Console {
    pub fn new(config: GameConfig) -> Self {
        let game = Game::new(config.clone());
        Self { config, game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> std::io::Result<()> {
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

            let (success, message) = self.execute(&command, args);
            self.consume_events();
            if !success {
                warn!(%command, %message, "command failed");
            }

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

    /// Drain the game's notifications. The console renders the board on
    /// request, so events are only logged.
    fn consume_events(&mut self) {
        for event in self.game.drain_events() {
            match event {
                Event::Captured(stones) => debug!(count = stones.len(), "stones captured"),
                Event::Atari(stones) if !stones.is_empty() => {
                    debug!(stones = ?stones, "stones in atari")
                }
                event => trace!(?event, "game event"),
            }
        }
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "execute");
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

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if size == N => (true, String::new()),
                    Ok(size) => (
                        false,
                        format!("unacceptable size, only {N} is supported (got {size})"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.game = Game::new(self.config.clone());
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let komi = match arg.parse::<f64>() {
                    Ok(komi) => komi,
                    Err(_) => return (false, "invalid komi".to_string()),
                };
                if let Err(e) = self.game.set_komi(komi) {
                    return (false, e.to_string());
                }
                self.config.komi = komi;
                (true, String::new())
            }

            "play" => self.play(args),

            "genmove" => match self.game.generate_move() {
                Ok(mv) => (true, format_engine_move(mv)),
                Err(e) => (false, e.to_string()),
            },

            "undo" => match self.game.undo() {
                Ok(Undo::NoHistory) => (true, "nothing to undo".to_string()),
                Ok(Undo::Undone(_)) => (true, String::new()),
                Err(e) => (false, e.to_string()),
            },

            "engine" => match args.first().map(|a| a.to_lowercase()).as_deref() {
                Some("on") => {
                    self.game.set_engine_enabled(true);
                    self.config.engine_enabled = true;
                    (true, String::new())
                }
                Some("off") => {
                    self.game.set_engine_enabled(false);
                    self.config.engine_enabled = false;
                    (true, String::new())
                }
                _ => (false, "expected on or off".to_string()),
            },

            "dead" => {
                let Some(pt) = args.first().and_then(|a| parse_coord(a)) else {
                    return (false, "invalid vertex".to_string());
                };
                match self.game.toggle_dead_mark(pt) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "final_score" => match self.game.finalize_score() {
                Ok(report) => (true, report.to_string()),
                Err(e) => (false, e.to_string()),
            },

            "phase" => (true, self.game.phase().to_string()),

            "showboard" => (true, format!("\n{}", self.game.board())),

            "territory" => match self.game.final_score() {
                Some(report) => (true, format!("\n{}", report.territory)),
                None => (false, "game has not been scored".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn play(&mut self, args: &[&str]) -> (bool, String) {
        if args.len() < 2 {
            return (false, "missing arguments".to_string());
        }
        let Some(color) = Color::parse(args[0]) else {
            return (false, "invalid color".to_string());
        };
        let vertex = args[1].to_lowercase();

        let result = if vertex == "pass" {
            if color != self.game.to_move() {
                return (false, format!("it is {}'s turn", self.game.to_move()));
            }
            self.game.pass()
        } else {
            let Some(pt) = parse_coord(&vertex) else {
                return (false, "invalid vertex".to_string());
            };
            self.game.place_stone(pt, color).map(|_| ())
        };
        if let Err(e) = result {
            return (false, e.to_string());
        }

        // The engine answers right away when it is its turn
        if self.game.engine_to_move() {
            return match self.game.request_engine_move() {
                Ok(mv) => (true, format_engine_move(mv)),
                Err(e) => (false, e.to_string()),
            };
        }
        (true, String::new())
    }
}

fn format_engine_move(mv: EngineMove) -> String {
    match mv {
        EngineMove::Place(pt) => str_coord(pt),
        EngineMove::Pass => "pass".to_string(),
    }
}
