use serde::Serialize;

/// What the last interaction produced. Presentation layers poll this to
/// decide what to draw or prompt next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Stage {
    /// Nothing pending; waiting for a placement.
    #[default]
    Idle,
    PlacementSuccess,
    NotValidMove,
    /// The mover's opponent must pass; the mover plays again.
    NoPossibleMoves,
    EndGame,
    EndGameView,
    StartNewGame,
}

impl Stage {
    /// Transition table. Every stage not listed falls back to `Idle`:
    ///
    /// ```text
    /// NoPossibleMoves -> Idle
    /// EndGame         -> EndGameView
    /// EndGameView     -> StartNewGame
    /// StartNewGame    -> Idle
    /// _               -> Idle
    /// ```
    pub fn next(self) -> Stage {
        match self {
            Stage::EndGame => Stage::EndGameView,
            Stage::EndGameView => Stage::StartNewGame,
            Stage::NoPossibleMoves
            | Stage::StartNewGame
            | Stage::Idle
            | Stage::PlacementSuccess
            | Stage::NotValidMove => Stage::Idle,
        }
    }

    /// Stages in which a new placement attempt is accepted.
    pub fn accepts_placement(self) -> bool {
        match self {
            Stage::Idle | Stage::PlacementSuccess | Stage::NotValidMove | Stage::StartNewGame => {
                true
            }
            Stage::NoPossibleMoves | Stage::EndGame | Stage::EndGameView => false,
        }
    }

    /// The board is final and no placement will be accepted until the
    /// next episode starts.
    pub fn is_episode_over(self) -> bool {
        matches!(self, Stage::EndGame | Stage::EndGameView)
    }

    /// Numeric code for the WASM boundary.
    pub fn code(self) -> u8 {
        match self {
            Stage::Idle => 0,
            Stage::PlacementSuccess => 1,
            Stage::NotValidMove => 2,
            Stage::NoPossibleMoves => 3,
            Stage::EndGame => 4,
            Stage::EndGameView => 5,
            Stage::StartNewGame => 6,
        }
    }
}

pub fn next(stage: Stage) -> Stage {
    stage.next()
}

pub fn is_valid_placement_stage(stage: Stage) -> bool {
    stage.accepts_placement()
}
