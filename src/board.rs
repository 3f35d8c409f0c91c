use std::fmt;

use crate::config::{Config, STANDARD_SIZE};
use crate::error::{BoardError, ConfigError, IllegalMoveError};
use crate::types::{Cell, Player, Position};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Reversi board: a square grid of cells stored row-major.
///
/// Cloning is the only way evaluators look ahead; the live board belongs
/// to `Game`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the standard 8×8 starting position:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self::starting(STANDARD_SIZE)
    }

    /// Creates the starting position on a `size`×`size` board.
    pub fn with_size(size: usize) -> Result<Self, ConfigError> {
        Config::with_size(size).validate()?;
        Ok(Self::starting(size))
    }

    /// Builds a board from wire codes (0=empty, 1=black, 2=white).
    pub fn from_cells(size: usize, codes: &[u8]) -> Result<Self, BoardError> {
        Config::with_size(size).validate()?;
        let expected = size * size;
        if codes.len() != expected {
            return Err(BoardError::Dimension {
                expected,
                actual: codes.len(),
            });
        }

        let cells = codes
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Cell::from_code(value).ok_or(BoardError::InvalidCell { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { size, cells })
    }

    pub(crate) fn starting(size: usize) -> Self {
        let mut cells = vec![Cell::Empty; size * size];
        let hi = size / 2;
        let lo = hi - 1;
        cells[lo * size + lo] = Cell::White;
        cells[hi * size + hi] = Cell::White;
        cells[lo * size + hi] = Cell::Black;
        cells[hi * size + lo] = Cell::Black;
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at `(row, col)`, or `None` when off the board.
    pub fn cell(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// True when `player` may place at `(row, col)`. No side effects.
    pub fn is_legal_move(&self, player: Player, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(idx) if self.cells[idx].is_empty() => DIRECTIONS
                .iter()
                .any(|&dir| self.flanked_run(player, row, col, dir) > 0),
            _ => false,
        }
    }

    /// All legal moves for `player` in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        self.positions()
            .filter(|pos| self.is_legal_move(player, pos.row as i32, pos.col as i32))
            .collect()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        self.positions()
            .any(|pos| self.is_legal_move(player, pos.row as i32, pos.col as i32))
    }

    /// Neither side can move.
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(Player::Black) && !self.has_legal_move(Player::White)
    }

    /// Disks that placing at `(row, col)` would flip, unioned over all eight
    /// directions, in row-major order. Empty when the move is illegal.
    pub fn flips_for(&self, player: Player, row: i32, col: i32) -> Vec<Position> {
        match self.index(row, col) {
            Some(idx) if self.cells[idx].is_empty() => self.collect_flips(player, row, col),
            _ => Vec::new(),
        }
    }

    /// Places one disk and flips captured disks.
    /// Returns the flipped positions; an illegal move leaves the board as is.
    pub fn apply_move(
        &mut self,
        player: Player,
        row: i32,
        col: i32,
    ) -> Result<Vec<Position>, IllegalMoveError> {
        let idx = self
            .index(row, col)
            .ok_or(IllegalMoveError::OutOfBounds { row, col })?;
        if !self.cells[idx].is_empty() {
            return Err(IllegalMoveError::Occupied { row, col });
        }

        let flips = self.collect_flips(player, row, col);
        if flips.is_empty() {
            return Err(IllegalMoveError::NoFlips { row, col });
        }

        let mine = Cell::from(player);
        self.cells[idx] = mine;
        for pos in &flips {
            let flip_idx = pos.row as usize * self.size + pos.col as usize;
            debug_assert_eq!(self.cells[flip_idx].owner(), Some(player.opponent()));
            self.cells[flip_idx] = mine;
        }

        Ok(flips)
    }

    pub fn disk_count(&self, player: Player) -> usize {
        let target = Cell::from(player);
        self.cells.iter().filter(|&&cell| cell == target).count()
    }

    /// Returns `(black_count, white_count)`.
    pub fn counts(&self) -> (usize, usize) {
        (
            self.disk_count(Player::Black),
            self.disk_count(Player::White),
        )
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// The side with strictly more disks; `None` on a tie.
    pub fn winner(&self) -> Option<Player> {
        let (black, white) = self.counts();
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Row-major wire codes: 0=empty, 1=black, 2=white.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let n = self.size as u8;
        (0..n).flat_map(move |row| (0..n).map(move |col| Position::new(row, col)))
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let n = self.size as i32;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Some(row as usize * self.size + col as usize)
        } else {
            None
        }
    }

    fn collect_flips(&self, player: Player, row: i32, col: i32) -> Vec<Position> {
        let mut flips = Vec::new();
        for dir in DIRECTIONS {
            let run = self.flanked_run(player, row, col, dir);
            for step in 1..=run as i32 {
                let r = row + dir.0 * step;
                let c = col + dir.1 * step;
                flips.push(Position::new(r as u8, c as u8));
            }
        }
        flips.sort_unstable();
        flips
    }

    /// Length of the opponent run starting next to `(row, col)` in `dir`
    /// that is closed by one of `player`'s disks. 0 when not closed.
    fn flanked_run(&self, player: Player, row: i32, col: i32, (dr, dc): (i32, i32)) -> usize {
        let mine = Some(player);
        let theirs = Some(player.opponent());
        let mut r = row + dr;
        let mut c = col + dc;
        let mut run = 0usize;

        while let Some(cell) = self.cell(r, c) {
            let owner = cell.owner();
            if owner == theirs {
                run += 1;
            } else if owner == mine {
                return run;
            } else {
                return 0;
            }
            r += dr;
            c += dc;
        }

        0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..self.size {
            write!(f, " {}", col % 10)?;
        }
        writeln!(f)?;
        for (row, line) in self.cells.chunks(self.size).enumerate() {
            write!(f, "{}", row % 10)?;
            for cell in line {
                let glyph = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                };
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
