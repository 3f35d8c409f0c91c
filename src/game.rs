use crate::board::Board;
use crate::config::Config;
use crate::error::{ConfigError, GameError, IllegalMoveError};
use crate::stage::Stage;
use crate::types::{Player, Position, Snapshot, Tallies};

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub placed: Position,
    /// Flipped disks in row-major order.
    pub flipped: Vec<Position>,
    pub stage: Stage,
    /// Whose turn it is after the placement.
    pub next_turn: Player,
}

/// The rules engine: canonical board plus turn, episode and stage state.
///
/// All commands take `&mut self`, so one instance never sees interleaved
/// placements.
#[derive(Debug, Clone)]
pub struct Game {
    config: Config,
    board: Board,
    turn: Player,
    /// Player who opened the current episode.
    starter: Player,
    sequence: Vec<Position>,
    tallies: Tallies,
    turn_count: u32,
    stage: Stage,
}

impl Game {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Standard 8×8 game with the default weight table.
    pub fn standard() -> Self {
        Self::from_valid_config(Config::standard())
    }

    fn from_valid_config(config: Config) -> Self {
        let first = config.first_player;
        Self {
            board: Board::starting(config.size),
            turn: first,
            starter: first,
            sequence: Vec::new(),
            tallies: Tallies::default(),
            turn_count: 0,
            stage: Stage::Idle,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn tallies(&self) -> Tallies {
        self.tallies
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn sequence(&self) -> &[Position] {
        &self.sequence
    }

    pub fn last_move(&self) -> Option<Position> {
        self.sequence.last().copied()
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves(self.turn)
    }

    pub fn is_legal_move(&self, row: i32, col: i32) -> bool {
        self.board.is_legal_move(self.turn, row, col)
    }

    pub fn disk_count(&self, player: Player) -> usize {
        self.board.disk_count(player)
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// Places a disk for the side to move.
    ///
    /// A rejected move leaves the board untouched and sets the stage to
    /// `NotValidMove`, unless the current stage is one that locks placements
    /// (it then stays as is). After a legal move the stage is `EndGame` when nobody
    /// can move, `NoPossibleMoves` when only the opponent is stuck (the turn
    /// stays with the mover), otherwise `PlacementSuccess` and the turn
    /// passes.
    pub fn apply_move(&mut self, row: i32, col: i32) -> Result<Outcome, IllegalMoveError> {
        let mover = self.turn;
        let flipped = match self.board.apply_move(mover, row, col) {
            Ok(flipped) => flipped,
            Err(err) => {
                tracing::warn!(player = %mover, %err, "rejected placement");
                if self.stage.accepts_placement() {
                    self.stage = Stage::NotValidMove;
                }
                return Err(err);
            }
        };

        let placed = Position::new(row as u8, col as u8);
        self.sequence.push(placed);
        self.turn_count += 1;

        self.stage = if self.board.is_terminal() {
            let winner = self.board.winner();
            self.tallies.record(winner);
            let (black, white) = self.board.counts();
            tracing::debug!(?winner, black, white, turns = self.turn_count, "episode finished");
            Stage::EndGame
        } else if !self.board.has_legal_move(mover.opponent()) {
            Stage::NoPossibleMoves
        } else {
            self.turn = mover.opponent();
            Stage::PlacementSuccess
        };

        tracing::debug!(
            player = %mover,
            %placed,
            flipped = flipped.len(),
            stage = ?self.stage,
            "applied move"
        );

        Ok(Outcome {
            placed,
            flipped,
            stage: self.stage,
            next_turn: self.turn,
        })
    }

    /// Stage-gated placement used by interactive front ends.
    pub fn place(&mut self, row: i32, col: i32) -> Result<Stage, GameError> {
        if !self.stage.accepts_placement() {
            return Err(GameError::StageLocked(self.stage));
        }
        let outcome = self.apply_move(row, col)?;
        Ok(outcome.stage)
    }

    /// Moves the stage machine one step. Entering `StartNewGame` resets the
    /// board for the next episode.
    pub fn advance(&mut self) -> Stage {
        let from = self.stage;
        let next = from.next();
        if next == Stage::StartNewGame {
            self.reset_episode();
        }
        tracing::debug!(?from, to = ?next, "stage advanced");
        self.stage = next;
        next
    }

    /// Restores the starting layout and hands the first move to the player
    /// who did not open the previous episode. Tallies are kept.
    pub fn reset_episode(&mut self) -> (&Board, Player) {
        self.starter = self.starter.opponent();
        self.turn = self.starter;
        self.board = Board::starting(self.config.size);
        self.sequence.clear();
        self.turn_count = 0;
        self.stage = Stage::Idle;
        (&self.board, self.turn)
    }

    pub fn snapshot(&self) -> Snapshot {
        let (black, white) = self.board.counts();
        Snapshot {
            size: self.config.size as u8,
            board: self.board.to_bytes(),
            turn: self.turn.code(),
            black_count: black as u32,
            white_count: white as u32,
            tallies: self.tallies,
            last_move: self.last_move(),
            legal_moves: self.legal_moves(),
            stage: self.stage.code(),
            turn_count: self.turn_count,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_board_for_test(&mut self, board: Board, turn: Player) {
        self.board = board;
        self.turn = turn;
        self.stage = Stage::Idle;
        self.sequence.clear();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_from_rows;

    fn small_game() -> Game {
        Game::new(Config::with_size(4)).expect("4x4 config is valid")
    }

    /// Black to move at (0, 0); afterwards White is stuck but Black can
    /// still take (3, 3).
    fn opponent_stuck_board() -> Board {
        board_from_rows(&[".OX.", ".X..", "..O.", "...."])
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::standard();
        let state = game.snapshot();

        assert_eq!(game.turn(), Player::Black);
        assert_eq!(game.stage(), Stage::Idle);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert_eq!(state.legal_moves.len(), 4);
        assert_eq!(state.last_move, None);
        assert_eq!(state.turn_count, 0);
    }

    #[test]
    fn legal_move_passes_turn_and_records_sequence() {
        let mut game = Game::standard();

        let outcome = game.apply_move(2, 3).unwrap();

        assert_eq!(outcome.stage, Stage::PlacementSuccess);
        assert_eq!(outcome.flipped, vec![Position::new(3, 3)]);
        assert_eq!(outcome.next_turn, Player::White);
        assert_eq!(game.turn(), Player::White);
        assert_eq!(game.disk_count(Player::Black), 4);
        assert_eq!(game.disk_count(Player::White), 1);
        assert_eq!(game.last_move(), Some(Position::new(2, 3)));
        assert_eq!(game.turn_count(), 1);
    }

    #[test]
    fn illegal_move_sets_not_valid_stage_without_mutation() {
        let mut game = Game::standard();
        let before = game.board().to_bytes();

        let err = game.apply_move(4, 4).unwrap_err();

        assert_eq!(err, IllegalMoveError::Occupied { row: 4, col: 4 });
        assert_eq!(game.stage(), Stage::NotValidMove);
        assert_eq!(game.board().to_bytes(), before);
        assert_eq!(game.turn(), Player::Black);
        assert_eq!(game.turn_count(), 0);
        assert!(game.sequence().is_empty());
    }

    #[test]
    fn stuck_opponent_keeps_turn_with_mover() {
        let mut game = small_game();
        game.set_board_for_test(opponent_stuck_board(), Player::Black);

        let outcome = game.apply_move(0, 0).unwrap();

        assert_eq!(outcome.stage, Stage::NoPossibleMoves);
        assert_eq!(game.turn(), Player::Black);
        assert!(!game.board().has_legal_move(Player::White));
        assert!(game.board().has_legal_move(Player::Black));
        assert_eq!(game.tallies(), Tallies::default());
    }

    #[test]
    fn no_possible_moves_blocks_placement_until_advanced() {
        let mut game = small_game();
        game.set_board_for_test(opponent_stuck_board(), Player::Black);
        game.place(0, 0).unwrap();

        assert_eq!(
            game.place(3, 3),
            Err(GameError::StageLocked(Stage::NoPossibleMoves))
        );
        assert_eq!(game.advance(), Stage::Idle);
        assert_eq!(game.place(3, 3), Ok(Stage::EndGame));
    }

    #[test]
    fn double_zero_ends_game_and_counts_win() {
        let mut game = small_game();
        game.set_board_for_test(opponent_stuck_board(), Player::Black);
        game.apply_move(0, 0).unwrap();

        let outcome = game.apply_move(3, 3).unwrap();

        assert_eq!(outcome.stage, Stage::EndGame);
        assert_eq!(game.winner(), Some(Player::Black));
        assert_eq!(game.tallies().black_wins, 1);
        assert_eq!(game.tallies().white_wins, 0);
        assert!(game.board().is_terminal());
    }

    #[test]
    fn full_board_after_move_ends_game() {
        let mut codes = vec![2u8; 64];
        codes[0] = 0;
        codes[1] = 1;
        let mut game = Game::standard();
        game.set_board_for_test(Board::from_cells(8, &codes).unwrap(), Player::White);

        let outcome = game.apply_move(0, 0).unwrap();

        assert_eq!(outcome.stage, Stage::EndGame);
        assert_eq!(outcome.flipped, vec![Position::new(0, 1)]);
        assert_eq!(game.disk_count(Player::White), 64);
        assert_eq!(game.tallies().white_wins, 1);
    }

    #[test]
    fn end_game_cycles_through_view_into_new_episode() {
        let mut game = small_game();
        game.set_board_for_test(opponent_stuck_board(), Player::Black);
        game.apply_move(0, 0).unwrap();
        game.apply_move(3, 3).unwrap();

        assert_eq!(game.place(0, 3), Err(GameError::StageLocked(Stage::EndGame)));
        assert_eq!(game.advance(), Stage::EndGameView);
        assert_eq!(game.advance(), Stage::StartNewGame);

        assert_eq!(game.board(), &Board::with_size(4).unwrap());
        assert_eq!(game.turn(), Player::White);
        assert_eq!(game.turn_count(), 0);
        assert_eq!(game.tallies().black_wins, 1);
        assert!(game.stage().accepts_placement());
        assert_eq!(game.advance(), Stage::Idle);
    }

    #[test]
    fn rejected_move_after_end_game_keeps_episode_boundary() {
        let mut game = small_game();
        game.set_board_for_test(opponent_stuck_board(), Player::Black);
        game.apply_move(0, 0).unwrap();
        game.apply_move(3, 3).unwrap();
        let finished = game.board().clone();

        assert!(game.apply_move(0, 3).is_err());
        assert_eq!(game.stage(), Stage::EndGame);
        assert!(!game.stage().accepts_placement());

        assert_eq!(game.advance(), Stage::EndGameView);
        assert!(game.apply_move(0, 3).is_err());
        assert_eq!(game.stage(), Stage::EndGameView);
        assert_eq!(game.board(), &finished);

        assert_eq!(game.advance(), Stage::StartNewGame);
        assert_eq!(game.board(), &Board::with_size(4).unwrap());
    }

    #[test]
    fn rejected_move_while_opponent_is_stuck_keeps_stage() {
        let mut game = small_game();
        game.set_board_for_test(opponent_stuck_board(), Player::Black);
        game.apply_move(0, 0).unwrap();

        assert!(game.apply_move(1, 0).is_err());

        assert_eq!(game.stage(), Stage::NoPossibleMoves);
        assert_eq!(game.advance(), Stage::Idle);
    }

    #[test]
    fn reset_episode_alternates_starting_player() {
        let mut game = Game::standard();
        game.apply_move(2, 3).unwrap();

        let (board, first) = game.reset_episode();
        assert_eq!(board, &Board::new());
        let (_, second) = game.reset_episode();

        assert_eq!(first, Player::White);
        assert_eq!(second, Player::Black);
        assert_ne!(first, second);
        assert!(game.sequence().is_empty());
        assert_eq!(game.stage(), Stage::Idle);
    }

    #[test]
    fn configured_first_player_opens_first_episode() {
        let game = Game::new(Config::standard().with_first_player(Player::White)).unwrap();

        assert_eq!(game.turn(), Player::White);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_eq!(
            Game::new(Config::with_size(9)).unwrap_err(),
            ConfigError::InvalidSize(9)
        );
    }
}
