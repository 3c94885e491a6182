//! nine-go: a 9x9 Go rules engine with a console driver.
//!
//! ## Usage
//!
//! - `nine-go` / `nine-go play` - Read commands from stdin (see [`nine_go::console`])
//! - `nine-go demo` - Let the engine play a short game against itself and score it

use std::io;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use nine_go::board::Color;
use nine_go::config::GameConfig;
use nine_go::console::Console;
use nine_go::constants::DEFAULT_KOMI;
use nine_go::game::{Game, GamePhase};
use nine_go::heuristic::EngineMove;

/// nine-go: a 9x9 Go rules engine
#[derive(Parser)]
#[command(name = "nine-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    game: GameArgs,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "nine_go=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Read console commands from stdin
    Play,
    /// Let the engine play both sides and print the result
    Demo {
        /// Stop after this many moves and pass out the game
        #[arg(long, default_value_t = 60)]
        moves: usize,
    },
}

#[derive(Args)]
struct GameArgs {
    /// Points of compensation for White
    #[arg(long, global = true, default_value_t = DEFAULT_KOMI)]
    komi: f64,

    /// Play both sides by hand
    #[arg(long, global = true)]
    no_engine: bool,

    /// Color played by the engine (black or white)
    #[arg(long, global = true, default_value = "white")]
    engine_color: String,

    /// Seed for reproducible engine play
    #[arg(long, global = true)]
    seed: Option<u64>,
}

impl GameArgs {
    fn to_config(&self) -> Result<GameConfig> {
        let Some(engine_color) = Color::parse(&self.engine_color) else {
            bail!("invalid engine color: {}", self.engine_color);
        };
        let config = GameConfig {
            komi: self.komi,
            engine_enabled: !self.no_engine,
            engine_color,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = cli.game.to_config()?;

    match cli.command {
        Some(Commands::Demo { moves }) => run_demo(config, moves),
        Some(Commands::Play) | None => {
            let mut console = Console::new(config);
            console
                .run(io::stdin().lock(), io::stdout())
                .context("console I/O failed")
        }
    }
}

fn run_demo(config: GameConfig, moves: usize) -> Result<()> {
    println!("nine-go: engine self-play demo\n");

    let mut game = Game::new(config);
    while game.phase() == GamePhase::Playing && game.history().len() < moves {
        let player = game.to_move();
        match game.generate_move()? {
            EngineMove::Place(pt) => info!(%player, ?pt, "demo move"),
            EngineMove::Pass => info!(%player, "demo pass"),
        }
        for event in game.drain_events() {
            trace!(?event, "game event");
        }
    }
    while game.phase() == GamePhase::Playing {
        game.pass()?;
    }

    println!("{}", game.board());
    let report = game.finalize_score()?;
    println!("{}", report.territory);
    println!(
        "Black: {} stones + {} territory = {}",
        report.black.stones,
        report.black.territory,
        report.black.total()
    );
    println!(
        "White: {} stones + {} territory + {} komi = {}",
        report.white.stones,
        report.white.territory,
        report.white.komi,
        report.white.total()
    );
    println!("Result: {report}");
    Ok(())
}
