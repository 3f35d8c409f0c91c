use crate::stage::Stage;
use crate::types::Player;

/// A placement that the rules reject. The board is never mutated when one
/// of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveError {
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("position ({row}, {col}) is already occupied")]
    Occupied { row: i32, col: i32 },

    #[error("position ({row}, {col}) flips no disks")]
    NoFlips { row: i32, col: i32 },
}

/// Errors from the stage-gated command surface of `Game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMoveError),

    #[error("placements are not accepted during stage {0:?}")]
    StageLocked(Stage),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size must be even and between 4 and 16, got {0}")]
    InvalidSize(usize),

    #[error("weight table must have {expected} entries, got {actual}")]
    WeightTableSize { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected {expected} cells, got {actual}")]
    Dimension { expected: usize, actual: usize },

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: u8 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy `{0}`, expected human, random, greedy, weighted or liberty")]
pub struct UnknownPolicyError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    #[error("{player} policy submitted {attempts} illegal moves in a row")]
    PolicyStuck { player: Player, attempts: u32 },

    #[error("{player} policy gave up without choosing a move")]
    Aborted { player: Player },

    #[error(transparent)]
    Game(#[from] GameError),
}
