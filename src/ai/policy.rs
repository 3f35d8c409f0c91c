use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::ai::heuristics::{flip_counts, liberty_scores, weighted_scores};
use crate::error::UnknownPolicyError;
use crate::game::Game;
use crate::stage::Stage;
use crate::types::Position;

/// Picks a move for the side to move in `game`.
pub trait Policy: Send {
    fn name(&self) -> &str;

    /// Returns `None` only when the side to move has no legal move.
    fn select_move(&mut self, game: &Game) -> Option<Position>;

    /// Interactive policies may retry illegal input indefinitely; the runner
    /// does not count their rejections.
    fn is_interactive(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Human,
    Random,
    Greedy,
    Weighted,
    Liberty,
}

impl PolicyKind {
    /// Builds a policy; `seed` makes the random tie-breaks reproducible.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Policy> {
        let rng = create_rng(seed);
        match self {
            PolicyKind::Human => Box::new(HumanPolicy::stdin()),
            PolicyKind::Random => Box::new(RandomPolicy::new(rng)),
            PolicyKind::Greedy => Box::new(GreedyPolicy::new(rng)),
            PolicyKind::Weighted => Box::new(WeightedPolicy::new(rng)),
            PolicyKind::Liberty => Box::new(LibertyPolicy::new(rng)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Human => "human",
            PolicyKind::Random => "random",
            PolicyKind::Greedy => "greedy",
            PolicyKind::Weighted => "weighted",
            PolicyKind::Liberty => "liberty",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive agent name, as typed on the command line or passed from
/// JavaScript.
impl FromStr for PolicyKind {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PolicyKind::Human),
            "random" => Ok(PolicyKind::Random),
            "greedy" => Ok(PolicyKind::Greedy),
            "weighted" => Ok(PolicyKind::Weighted),
            "liberty" => Ok(PolicyKind::Liberty),
            _ => Err(UnknownPolicyError(s.to_string())),
        }
    }
}

pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn pick(rng: &mut ChaCha8Rng, candidates: &[Position]) -> Option<Position> {
    candidates.choose(rng).copied()
}

/// Uniform over all legal moves.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "Random"
    }

    fn select_move(&mut self, game: &Game) -> Option<Position> {
        pick(&mut self.rng, &game.legal_moves())
    }
}

/// Flips the most disks; ties broken uniformly.
#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    rng: ChaCha8Rng,
}

impl GreedyPolicy {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl Policy for GreedyPolicy {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn select_move(&mut self, game: &Game) -> Option<Position> {
        let grid = flip_counts(game.board(), game.turn());
        pick(&mut self.rng, &grid.best_positions())
    }
}

/// Maximizes the positional score after the move; ties broken uniformly.
#[derive(Debug, Clone)]
pub struct WeightedPolicy {
    rng: ChaCha8Rng,
}

impl WeightedPolicy {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl Policy for WeightedPolicy {
    fn name(&self) -> &str {
        "Weighted"
    }

    fn select_move(&mut self, game: &Game) -> Option<Position> {
        let grid = weighted_scores(game.board(), game.turn(), game.config());
        pick(&mut self.rng, &grid.best_positions())
    }
}

/// Minimizes the opponent's replies; ties broken uniformly.
#[derive(Debug, Clone)]
pub struct LibertyPolicy {
    rng: ChaCha8Rng,
}

impl LibertyPolicy {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl Policy for LibertyPolicy {
    fn name(&self) -> &str {
        "Liberty"
    }

    fn select_move(&mut self, game: &Game) -> Option<Position> {
        let grid = liberty_scores(game.board(), game.turn());
        pick(&mut self.rng, &grid.worst_positions())
    }
}

type MoveSource = Box<dyn FnMut(&Game) -> Option<Position> + Send>;

/// Delegates the choice to an input source, typically a person at a
/// terminal. The move is not checked here; the engine rejects illegal ones.
pub struct HumanPolicy {
    source: MoveSource,
}

impl HumanPolicy {
    pub fn new(source: impl FnMut(&Game) -> Option<Position> + Send + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Prompts on stdout and reads `row col` lines from stdin. End of input
    /// yields `None`.
    pub fn stdin() -> Self {
        Self::new(|game| {
            if game.stage() == Stage::NotValidMove {
                println!("illegal move, try again");
            }
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            loop {
                print!("{}\n{} to move (row col): ", game.board(), game.turn());
                let _ = io::stdout().flush();
                let line = lines.next()?.ok()?;
                match parse_position(&line) {
                    Some(pos) => return Some(pos),
                    None => println!("expected two numbers, e.g. `2 3`"),
                }
            }
        })
    }
}

impl Policy for HumanPolicy {
    fn name(&self) -> &str {
        "Human"
    }

    fn select_move(&mut self, game: &Game) -> Option<Position> {
        (self.source)(game)
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Parses `row col` (space or comma separated).
pub fn parse_position(input: &str) -> Option<Position> {
    let mut parts = input
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|part| !part.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Position::new(row, col))
}
