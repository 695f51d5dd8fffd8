//! Turn loop shared by every mode.

use std::io::{self, BufRead, Write};

use chess_core::{board_diagram, parse_uci_move, Color, Engine, Move, Outcome, Position};
use tracing::{debug, warn};

/// Who moves for one side.
pub enum Player {
    Human,
    Engine(Box<dyn Engine>),
}

impl Player {
    fn label(&self) -> &str {
        match self {
            Player::Human => "You",
            Player::Engine(engine) => engine.name(),
        }
    }
}

/// How a game left the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEnd {
    Finished(Outcome),
    /// The human typed `quit` or closed the input.
    Quit,
    /// `max_plies` were played without a result.
    PlyLimit,
}

pub struct Game {
    pos: Position,
    white: Player,
    black: Player,
    max_plies: Option<u32>,
    history: Vec<Move>,
    /// Zobrist key of every position reached, the starting one included
    keys: Vec<u64>,
}

impl Game {
    pub fn new(pos: Position, white: Player, black: Player) -> Self {
        let keys = vec![pos.zobrist_key()];
        Self {
            pos,
            white,
            black,
            max_plies: None,
            history: Vec::new(),
            keys,
        }
    }

    pub fn with_max_plies(mut self, max_plies: Option<u32>) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Plays until the game ends, the human quits or the ply cap is hit.
    /// Human moves are read line by line from `input`; everything shown to
    /// the players goes to `out`.
    pub fn run<I: BufRead, O: Write>(&mut self, input: &mut I, out: &mut O) -> io::Result<GameEnd> {
        for side in [&mut self.white, &mut self.black] {
            if let Player::Engine(engine) = side {
                engine.new_game();
            }
        }

        loop {
            writeln!(out, "\n{}\n", board_diagram(&self.pos))?;

            if let Some(outcome) = self.pos.outcome() {
                writeln!(out, "Game over: {outcome}")?;
                return Ok(GameEnd::Finished(outcome));
            }
            if self.repetitions() >= 5 {
                let outcome = Outcome::FivefoldRepetition;
                writeln!(out, "Game over: {outcome}")?;
                return Ok(GameEnd::Finished(outcome));
            }
            if self.max_plies.is_some_and(|cap| self.history.len() as u32 >= cap) {
                writeln!(out, "Stopped after {} plies", self.history.len())?;
                return Ok(GameEnd::PlyLimit);
            }

            let mover = self.pos.side_to_move;
            let player = match mover {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let mv = match player {
                Player::Human => match read_human_move(&self.pos, input, out)? {
                    Some(mv) => mv,
                    None => {
                        writeln!(out, "Bye")?;
                        return Ok(GameEnd::Quit);
                    }
                },
                Player::Engine(engine) => {
                    let limits = engine.limits_for(&self.pos);
                    let result = engine.search(&self.pos, limits);
                    let Some(mv) = result.best_move else {
                        // Only reachable if outcome() and the engine disagree
                        warn!(engine = engine.name(), "engine returned no move");
                        return Ok(GameEnd::Finished(Outcome::Stalemate));
                    };
                    debug!(depth = limits.depth, nodes = result.nodes, "engine searched");
                    mv
                }
            };

            writeln!(out, "{} ({mover}) played {mv}", player.label())?;
            self.pos.make_move(mv);
            self.history.push(mv);
            self.keys.push(self.pos.zobrist_key());
        }
    }

    /// How often the current position has occurred so far.
    fn repetitions(&self) -> usize {
        let current = self.pos.zobrist_key();
        self.keys.iter().filter(|&&key| key == current).count()
    }
}

/// Prompts until a legal move is entered. `None` on `quit` or end of input.
fn read_human_move<I: BufRead, O: Write>(
    pos: &Position,
    input: &mut I,
    out: &mut O,
) -> io::Result<Option<Move>> {
    let mut line = String::new();
    loop {
        write!(out, "Your move (e.g. e2e4, 'quit' to exit): ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let text = line.trim();
        if text.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        match parse_uci_move(pos, text) {
            Some(mv) => return Ok(Some(mv)),
            None => writeln!(out, "Illegal move '{text}', try again")?,
        }
    }
}

/// Offers another game. `true` only for an answer starting with `y` or `r`.
pub fn ask_replay<I: BufRead, O: Write>(input: &mut I, out: &mut O) -> io::Result<bool> {
    write!(out, "Play again? [y/N] ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer.starts_with('y') || answer.starts_with('r'))
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
