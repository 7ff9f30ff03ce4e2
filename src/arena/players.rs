//! Move-selection policies that can sit at an arena seat.
//!
//! - `SearchPolicy`: argmax of a temperature-0 search
//! - `RandomPolicy`: uniform over legal actions
//! - `GreedyPolicy`: maximizes the rules engine's score after the move
//! - `HumanPolicy`: reads an action index from a text stream
//!
//! Any `FnMut(&S) -> Result<usize>` closure is also a policy.

use std::io::{BufRead, Write};

use crate::core::{GameRng, Player};
use crate::error::{Error, Result};
use crate::mcts::{SearchConfig, SearchEngine};
use crate::nn::Oracle;
use crate::rules::RulesEngine;

/// Chooses an action for the player to move in a canonical state.
pub trait Policy<S> {
    /// Pick an action. The state is canonical: the mover is `Player::First`.
    fn select_action(&mut self, state: &S) -> Result<usize>;
}

impl<S, F> Policy<S> for F
where
    F: FnMut(&S) -> Result<usize>,
{
    fn select_action(&mut self, state: &S) -> Result<usize> {
        self(state)
    }
}

/// Index of the first maximum.
fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Deterministic search player.
///
/// Keeps one search context for its whole lifetime, so statistics carry
/// over between the games of a match.
pub struct SearchPolicy<'a, E: RulesEngine, O: Oracle<E::State>> {
    search: SearchEngine<'a, E, O>,
}

impl<'a, E: RulesEngine, O: Oracle<E::State>> SearchPolicy<'a, E, O> {
    /// Create a search player over `oracle`.
    pub fn new(engine: &'a E, oracle: &'a O, config: SearchConfig) -> Self {
        Self {
            search: SearchEngine::new(engine, oracle, config),
        }
    }

    /// The underlying search context.
    #[must_use]
    pub fn search(&self) -> &SearchEngine<'a, E, O> {
        &self.search
    }
}

impl<E: RulesEngine, O: Oracle<E::State>> Policy<E::State> for SearchPolicy<'_, E, O> {
    fn select_action(&mut self, state: &E::State) -> Result<usize> {
        let probs = self.search.action_probabilities(state, 0.0)?;
        argmax(&probs).ok_or(Error::EmptyDistribution)
    }
}

/// Uniformly random legal move.
pub struct RandomPolicy<'a, E: RulesEngine> {
    engine: &'a E,
    rng: GameRng,
}

impl<'a, E: RulesEngine> RandomPolicy<'a, E> {
    /// Create a random player.
    pub fn new(engine: &'a E, seed: u64) -> Self {
        Self {
            engine,
            rng: GameRng::new(seed),
        }
    }
}

impl<E: RulesEngine> Policy<E::State> for RandomPolicy<'_, E> {
    fn select_action(&mut self, state: &E::State) -> Result<usize> {
        let legal = self.engine.legal_actions(state, Player::First);
        self.rng.choose(&legal).copied().ok_or(Error::NoLegalActions)
    }
}

/// One-ply lookahead on the rules engine's score.
///
/// Ties go to the lowest action index.
pub struct GreedyPolicy<'a, E: RulesEngine> {
    engine: &'a E,
}

impl<'a, E: RulesEngine> GreedyPolicy<'a, E> {
    /// Create a greedy player.
    pub fn new(engine: &'a E) -> Self {
        Self { engine }
    }
}

impl<E: RulesEngine> Policy<E::State> for GreedyPolicy<'_, E> {
    fn select_action(&mut self, state: &E::State) -> Result<usize> {
        let mut best: Option<(usize, i32)> = None;
        for action in self.engine.legal_actions(state, Player::First) {
            let (next, _) = self.engine.apply(state, Player::First, action);
            let score = self.engine.score(&next, Player::First);
            match best {
                Some((_, b)) if score <= b => {}
                _ => best = Some((action, score)),
            }
        }
        best.map(|(action, _)| action).ok_or(Error::NoLegalActions)
    }
}

/// Reads moves from a text stream, reprompting until a legal index is given.
pub struct HumanPolicy<'a, E: RulesEngine, R: BufRead, W: Write> {
    engine: &'a E,
    input: R,
    output: W,
}

impl<'a, E: RulesEngine, R: BufRead, W: Write> HumanPolicy<'a, E, R, W> {
    /// Create a human player reading from `input` and prompting on `output`.
    pub fn new(engine: &'a E, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }
}

impl<E: RulesEngine, R: BufRead, W: Write> Policy<E::State> for HumanPolicy<'_, E, R, W> {
    fn select_action(&mut self, state: &E::State) -> Result<usize> {
        let legal = self.engine.legal_actions(state, Player::First);
        writeln!(self.output, "{}", self.engine.render(state))?;

        loop {
            writeln!(self.output, "legal moves: {legal:?}")?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "input closed before a move was entered",
                )));
            }

            match line.trim().parse::<usize>() {
                Ok(action) if legal.contains(&action) => return Ok(action),
                _ => writeln!(self.output, "invalid move: {}", line.trim())?,
            }
        }
    }
}
