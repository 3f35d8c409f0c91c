//! Browser-facing wrapper around `Game`.

use wasm_bindgen::prelude::*;

use crate::ai::heuristics::{flip_counts, liberty_scores, weighted_scores};
use crate::ai::policy::PolicyKind;
use crate::config::Config;
use crate::error::GameError;
use crate::game::Game;
use crate::stage::Stage;

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            game: Game::standard(),
        }
    }

    /// Builds a game from a (possibly partial) config object.
    pub fn with_config(config: JsValue) -> Result<WasmGame, JsError> {
        let config: Config = serde_wasm_bindgen::from_value(config)?;
        Ok(WasmGame {
            game: Game::new(config)?,
        })
    }

    /// Attempts a placement for the side to move and returns the stage
    /// code. An illegal move yields the `NotValidMove` code; a placement
    /// outside an accepting stage is an error.
    pub fn place(&mut self, row: i32, col: i32) -> Result<u8, JsError> {
        match self.game.place(row, col) {
            Ok(stage) => Ok(stage.code()),
            Err(GameError::IllegalMove(_)) => Ok(Stage::NotValidMove.code()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn advance(&mut self) -> u8 {
        self.game.advance().code()
    }

    /// Resets the board and returns the starting player's code.
    pub fn reset_episode(&mut self) -> u8 {
        let (_, starter) = self.game.reset_episode();
        starter.code()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.snapshot())?)
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.legal_moves())?)
    }

    pub fn weighted_scores(&self) -> Result<JsValue, JsError> {
        let grid = weighted_scores(self.game.board(), self.game.turn(), self.game.config());
        Ok(serde_wasm_bindgen::to_value(&grid)?)
    }

    pub fn liberty_scores(&self) -> Result<JsValue, JsError> {
        let grid = liberty_scores(self.game.board(), self.game.turn());
        Ok(serde_wasm_bindgen::to_value(&grid)?)
    }

    pub fn flip_counts(&self) -> Result<JsValue, JsError> {
        let grid = flip_counts(self.game.board(), self.game.turn());
        Ok(serde_wasm_bindgen::to_value(&grid)?)
    }

    /// Lets a built-in policy (`random`, `greedy`, `weighted`, `liberty`)
    /// move for the side to move.
    pub fn ai_move(&mut self, kind: &str, seed: Option<u64>) -> Result<u8, JsError> {
        let kind: PolicyKind = kind.parse()?;
        if kind == PolicyKind::Human {
            return Err(JsError::new("human moves must come from place()"));
        }

        let mut policy = kind.build(seed);
        let mv = policy
            .select_move(&self.game)
            .ok_or_else(|| JsError::new("no legal moves for the side to move"))?;
        self.place(mv.row as i32, mv.col as i32)
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
