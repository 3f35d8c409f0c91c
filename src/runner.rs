//! Headless driver that plays episodes between two policies by polling the
//! stage machine, the same way an interactive front end would.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

use crate::ai::policy::Policy;
use crate::board::Board;
use crate::error::{GameError, RunnerError};
use crate::game::Game;
use crate::stage::Stage;
use crate::types::{Player, Tallies};

/// Result of one finished episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeReport {
    pub winner: Option<Player>,
    pub black_count: usize,
    pub white_count: usize,
    pub moves: u32,
    pub final_board: Board,
    pub elapsed: Duration,
}

/// Aggregate over a run of episodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub black_name: String,
    pub white_name: String,
    pub tallies: Tallies,
    pub total_moves: u32,
    pub elapsed: Duration,
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let episodes = self.tallies.episodes();
        writeln!(f, "episodes: {episodes}")?;
        writeln!(
            f,
            "black ({}): {} wins, white ({}): {} wins, draws: {}",
            self.black_name,
            self.tallies.black_wins,
            self.white_name,
            self.tallies.white_wins,
            self.tallies.draws
        )?;
        let avg_moves = if episodes == 0 {
            0.0
        } else {
            self.total_moves as f64 / episodes as f64
        };
        write!(
            f,
            "moves per episode: {avg_moves:.1}, elapsed: {:.2?}",
            self.elapsed
        )
    }
}

pub struct Runner {
    game: Game,
    black: Box<dyn Policy>,
    white: Box<dyn Policy>,
}

impl Runner {
    pub fn new(game: Game, black: Box<dyn Policy>, white: Box<dyn Policy>) -> Self {
        Self { game, black, white }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays episodes back to back. Tallies in the summary cover only these
    /// episodes.
    pub fn run(&mut self, episodes: u32) -> Result<MatchSummary, RunnerError> {
        let start = Instant::now();
        let mut summary = MatchSummary {
            black_name: self.black.name().to_string(),
            white_name: self.white.name().to_string(),
            ..MatchSummary::default()
        };

        for episode in 1..=episodes {
            let report = self.run_episode()?;
            tracing::info!(
                episode,
                winner = ?report.winner,
                black = report.black_count,
                white = report.white_count,
                moves = report.moves,
                "episode complete"
            );
            summary.tallies.record(report.winner);
            summary.total_moves += report.moves;
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }

    /// Plays until the end-of-game view, then advances into the next
    /// episode so the board is fresh for the following call.
    pub fn run_episode(&mut self) -> Result<EpisodeReport, RunnerError> {
        let start = Instant::now();
        let mut rejected = 0u32;

        loop {
            match self.game.stage() {
                Stage::EndGameView => break,
                Stage::EndGame => {
                    self.game.advance();
                }
                Stage::NoPossibleMoves => {
                    tracing::debug!(
                        skipped = %self.game.turn().opponent(),
                        "no possible moves, turn stays"
                    );
                    self.game.advance();
                }
                Stage::Idle | Stage::PlacementSuccess | Stage::NotValidMove | Stage::StartNewGame => {
                    self.play_turn(&mut rejected)?;
                }
            }
        }

        debug_assert!(self.game.stage().is_episode_over());
        let (black_count, white_count) = self.game.board().counts();
        let report = EpisodeReport {
            winner: self.game.winner(),
            black_count,
            white_count,
            moves: self.game.turn_count(),
            final_board: self.game.board().clone(),
            elapsed: start.elapsed(),
        };
        self.game.advance();
        Ok(report)
    }

    fn play_turn(&mut self, rejected: &mut u32) -> Result<(), RunnerError> {
        let player = self.game.turn();
        let policy = match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        };

        let mv = policy
            .select_move(&self.game)
            .ok_or(RunnerError::Aborted { player })?;

        match self.game.place(mv.row as i32, mv.col as i32) {
            Ok(_) => {
                *rejected = 0;
                Ok(())
            }
            Err(GameError::IllegalMove(_)) if policy.is_interactive() => Ok(()),
            Err(GameError::IllegalMove(_)) => {
                *rejected += 1;
                let limit = self.game.config().max_invalid_attempts;
                if *rejected > limit {
                    return Err(RunnerError::PolicyStuck {
                        player,
                        attempts: *rejected,
                    });
                }
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
