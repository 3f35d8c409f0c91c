//! One-ply evaluators used by the move-selection policies.
//!
//! Every evaluator clones the board per candidate move, applies it, and
//! scores the copy. The board passed in is never modified.

use std::fmt;

use serde::Serialize;

use crate::board::Board;
use crate::config::Config;
use crate::types::{Player, Position};

/// Per-cell scores for one side's candidate moves.
///
/// Cells that are not legal moves hold 0 and are excluded from
/// `best_positions` / `worst_positions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreGrid {
    size: usize,
    scores: Vec<i32>,
    candidates: Vec<Position>,
}

impl ScoreGrid {
    fn new(size: usize) -> Self {
        Self {
            size,
            scores: vec![0; size * size],
            candidates: Vec::new(),
        }
    }

    fn set(&mut self, pos: Position, score: i32) {
        self.scores[pos.row as usize * self.size + pos.col as usize] = score;
        self.candidates.push(pos);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw cell value; 0 for non-candidates.
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.scores[row * self.size + col]
    }

    /// Score of a candidate, `None` for cells that are not legal moves.
    pub fn score(&self, pos: Position) -> Option<i32> {
        self.candidates
            .contains(&pos)
            .then(|| self.get(pos.row as usize, pos.col as usize))
    }

    /// Candidate moves in row-major order.
    pub fn candidates(&self) -> &[Position] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Row-major scores.
    pub fn as_slice(&self) -> &[i32] {
        &self.scores
    }

    /// Candidates sharing the highest score.
    pub fn best_positions(&self) -> Vec<Position> {
        self.extreme_positions(|score, best| score > best)
    }

    /// Candidates sharing the lowest score.
    pub fn worst_positions(&self) -> Vec<Position> {
        self.extreme_positions(|score, best| score < best)
    }

    fn extreme_positions(&self, better: impl Fn(i32, i32) -> bool) -> Vec<Position> {
        let mut out: Vec<Position> = Vec::new();
        let mut best: Option<i32> = None;

        for &pos in &self.candidates {
            let score = self.get(pos.row as usize, pos.col as usize);
            match best {
                Some(current) if score == current => out.push(pos),
                Some(current) if !better(score, current) => {}
                _ => {
                    best = Some(score);
                    out.clear();
                    out.push(pos);
                }
            }
        }

        out
    }
}

impl fmt::Display for ScoreGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.scores.chunks(self.size) {
            let cells: Vec<String> = line.iter().map(|score| format!("{score:>5}")).collect();
            writeln!(f, "{}", cells.join(""))?;
        }
        Ok(())
    }
}

/// Positional balance of `board` for `player`: weights of own disks minus
/// weights of opponent disks.
pub fn positional_score(board: &Board, player: Player, config: &Config) -> i32 {
    debug_assert_eq!(board.size(), config.size, "weight table size mismatch");
    board
        .cells()
        .iter()
        .zip(config.weights.iter())
        .map(|(cell, &weight)| match cell.owner() {
            Some(owner) if owner == player => weight,
            Some(_) => -weight,
            None => 0,
        })
        .sum()
}

/// Positional score after each legal move, shifted by
/// `config.score_offset`.
pub fn weighted_scores(board: &Board, player: Player, config: &Config) -> ScoreGrid {
    score_each_move(board, player, |next, _| {
        positional_score(next, player, config) + config.score_offset
    })
}

/// Number of replies the opponent has after each legal move.
pub fn liberty_scores(board: &Board, player: Player) -> ScoreGrid {
    let opponent = player.opponent();
    score_each_move(board, player, |next, _| next.legal_moves(opponent).len() as i32)
}

/// Number of disks each legal move flips.
pub fn flip_counts(board: &Board, player: Player) -> ScoreGrid {
    score_each_move(board, player, |_, flipped| flipped as i32)
}

fn score_each_move(
    board: &Board,
    player: Player,
    score: impl Fn(&Board, usize) -> i32,
) -> ScoreGrid {
    let mut grid = ScoreGrid::new(board.size());
    for mv in board.legal_moves(player) {
        let mut next = board.clone();
        let flipped = next
            .apply_move(player, mv.row as i32, mv.col as i32)
            .map_or(0, |flips| flips.len());
        grid.set(mv, score(&next, flipped));
    }
    grid
}
