use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod runner;
pub mod stage;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::Config;
pub use error::{
    BoardError, ConfigError, GameError, IllegalMoveError, RunnerError, UnknownPolicyError,
};
pub use game::{Game, Outcome};
pub use stage::Stage;
pub use types::{Cell, Player, Position, Snapshot, Tallies};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
