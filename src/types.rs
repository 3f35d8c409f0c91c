use std::fmt;

use serde::{Deserialize, Serialize};

/// Side to move. Empty squares are `Cell::Empty`, never a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Wire code used by board bytes and WASM state: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Player::Black => 1,
            Player::White => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => Player::Black.code(),
            Cell::White => Player::White.code(),
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cross-episode results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tallies {
    pub black_wins: u32,
    pub white_wins: u32,
    pub draws: u32,
}

impl Tallies {
    pub fn record(&mut self, winner: Option<Player>) {
        match winner {
            Some(Player::Black) => self.black_wins += 1,
            Some(Player::White) => self.white_wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn episodes(&self) -> u32 {
        self.black_wins + self.white_wins + self.draws
    }
}

/// Public game state handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub size: u8,
    /// Row-major, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub turn: u8,
    pub black_count: u32,
    pub white_count: u32,
    pub tallies: Tallies,
    pub last_move: Option<Position>,
    pub legal_moves: Vec<Position>,
    /// Numeric stage code, see `Stage::code`.
    pub stage: u8,
    pub turn_count: u32,
}
