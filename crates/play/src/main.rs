//! Console chess
//!
//! Play the minimax engine or the random bot from the terminal, or watch the
//! engine play the bot. After each finished game you are offered another.

mod game;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_core::{Color, Position};
use clap::{Parser, ValueEnum};
use minimax_engine::{EngineConfig, MinimaxEngine};
use random_engine::RandomEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

use game::{ask_replay, Game, GameEnd, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// You against the minimax engine
    Human,
    /// You against the random bot
    Bot,
    /// The minimax engine against the random bot
    Watch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "play")]
#[command(about = "Play chess against a minimax engine in the terminal", long_about = None)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Mode::Human)]
    mode: Mode,

    /// Your color; in watch mode, the engine's color
    #[arg(short, long, value_enum, default_value_t = Side::Random)]
    color: Side,

    /// TOML file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from this position instead of the initial one
    #[arg(long)]
    fen: Option<String>,

    /// Stop after this many plies (watch mode)
    #[arg(long)]
    max_plies: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let pos = match &args.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("parsing FEN '{fen}'"))?,
        None => Position::startpos(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    for number in 1.. {
        let end = play_one(&args, &config, pos.clone(), &mut input)?;
        if end == GameEnd::Quit || !ask_replay(&mut input, &mut io::stdout().lock())? {
            break;
        }
        info!(game = number + 1, "starting another game");
    }
    Ok(())
}

/// Sets up the players for `args.mode` and plays a single game from `pos`.
fn play_one(
    args: &Args,
    config: &EngineConfig,
    pos: Position,
    input: &mut impl BufRead,
) -> Result<GameEnd> {
    let color = match args.color {
        Side::White => Color::White,
        Side::Black => Color::Black,
        Side::Random if rand::random::<bool>() => Color::White,
        Side::Random => Color::Black,
    };

    let (first, second) = match args.mode {
        Mode::Human => (Player::Human, engine(config)),
        Mode::Bot => (Player::Human, bot(config)),
        Mode::Watch => (engine(config), bot(config)),
    };
    let (white, black) = match color {
        Color::White => (first, second),
        Color::Black => (second, first),
    };
    info!(mode = ?args.mode, %color, "starting game");

    let max_plies = match args.mode {
        Mode::Watch => args.max_plies,
        Mode::Human | Mode::Bot => None,
    };
    let mut game = Game::new(pos, white, black).with_max_plies(max_plies);
    let end = game.run(input, &mut io::stdout().lock())?;

    info!(
        ?end,
        plies = game.history().len(),
        fen = %game.position().to_fen(),
        "game finished"
    );
    if let GameEnd::Finished(outcome) = end {
        println!("Result: {outcome}");
    }
    Ok(end)
}

fn engine(config: &EngineConfig) -> Player {
    Player::Engine(Box::new(MinimaxEngine::with_config(config.clone())))
}

fn bot(config: &EngineConfig) -> Player {
    let bot = match config.seed {
        // Offset so a seeded bot does not share the engine's stream
        Some(seed) => RandomEngine::seeded(seed.wrapping_add(1)),
        None => RandomEngine::new(),
    };
    Player::Engine(Box::new(bot))
}
