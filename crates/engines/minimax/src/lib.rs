//! Minimax Chess Engine
//!
//! Depth-limited minimax with alpha-beta pruning over a material plus
//! piece-square evaluation. Leaf scores carry random noise and inner nodes
//! sometimes overlook long sliding moves, so play varies from game to game
//! and misses the kind of moves a casual player misses.

pub mod config;
pub mod eval;
pub mod naturalism;
pub mod noise;
pub mod pst;
pub mod rules;
pub mod search;

use std::time::Instant;

use chess_core::{Color, Engine, Position, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

pub use config::{ConfigError, EngineConfig};
pub use eval::{evaluate, MATE_SCORE};
pub use naturalism::is_long_move;
pub use noise::NoiseModel;
pub use rules::SearchPosition;
pub use search::{choose_move, SearchOptions, SearchOutcome};

/// Minimax engine owning its configuration and a single random stream.
///
/// The stream is created once and never reseeded, so a seeded engine replays
/// the same sequence of games.
#[derive(Debug, Clone)]
pub struct MinimaxEngine<R = StdRng> {
    config: EngineConfig,
    options: SearchOptions,
    rng: R,
}

impl MinimaxEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Seeds the stream from `config.seed`, or from OS entropy when unset.
    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl Default for MinimaxEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MinimaxEngine<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        let options = config.search_options();
        Self {
            config,
            options,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Replaces the options derived from the config, e.g. to switch pruning off.
    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    /// Searches a private copy of `pos` for `engine_color`.
    pub fn choose_move(&mut self, pos: &Position, engine_color: Color, depth: u8) -> SearchOutcome {
        let mut work = pos.clone();
        let start = Instant::now();
        let outcome = choose_move(&mut work, engine_color, depth, &self.options, &mut self.rng);

        if let Some(mv) = outcome.best_move {
            info!(
                %mv,
                score = outcome.score,
                depth,
                nodes = outcome.nodes,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "minimax move"
            );
        }
        outcome
    }
}

impl<R: Rng> Engine for MinimaxEngine<R> {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let outcome = self.choose_move(pos, pos.side_to_move, limits.depth);
        SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: limits.depth.max(1),
            nodes: outcome.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn limits_for(&self, pos: &Position) -> SearchLimits {
        SearchLimits::depth(self.config.depth_for(pos))
    }
}
