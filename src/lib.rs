//! nine-go: a rules engine for 9x9 Go.
//!
//! The engine tracks the board, enforces suicide and simple ko, resolves
//! captures, scores finished games by area and offers a one-ply heuristic
//! opponent. Presentation is left to a driver that sends commands to a
//! [`game::Game`] and renders the events it emits.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, komi and heuristic weights
//! - [`board`] - Board storage and coordinates
//! - [`group`] - Connected groups and liberties
//! - [`rules`] - Move legality, captures and ko
//! - [`scoring`] - Territory flood fill and area score
//! - [`heuristic`] - Engine move selection
//! - [`game`] - Game phases, history, undo and driver events
//! - [`config`] - Game configuration
//! - [`console`] - Line-oriented text driver
//!
//! ## Example
//!
//! ```
//! use nine_go::board::parse_coord;
//! use nine_go::config::GameConfig;
//! use nine_go::game::{Game, GamePhase};
//!
//! let mut game = Game::new(GameConfig::default().with_engine(false));
//! game.play(parse_coord("E5").unwrap()).unwrap();
//! game.pass().unwrap();
//! game.pass().unwrap();
//! assert_eq!(game.phase(), GamePhase::Marking);
//!
//! let report = game.finalize_score().unwrap();
//! println!("Result: {report}");
//! ```

pub mod board;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod group;
pub mod heuristic;
pub mod rules;
pub mod scoring;
