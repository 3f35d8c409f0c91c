#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

use reversi_env::Stage;
use reversi_env::wasm::WasmGame;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).expect("field must exist")
}

#[wasm_bindgen_test]
fn wasm_ready_reports_true() {
    assert!(reversi_env::wasm_ready());
}

#[wasm_bindgen_test]
fn opening_state_lists_four_moves() {
    let game = WasmGame::new();

    let moves = Array::from(&game.legal_moves().ok().expect("wasm call must succeed"));
    let state = game.state().ok().expect("wasm call must succeed");

    assert_eq!(moves.length(), 4);
    assert_eq!(field(&state, "black_count").as_f64(), Some(2.0));
    assert_eq!(field(&state, "stage").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn illegal_placement_reports_not_valid_stage() {
    let mut game = WasmGame::new();

    assert_eq!(game.place(0, 0).ok().expect("wasm call must succeed"), Stage::NotValidMove.code());
    assert_eq!(game.place(2, 3).ok().expect("wasm call must succeed"), Stage::PlacementSuccess.code());
}

#[wasm_bindgen_test]
fn ai_move_plays_a_legal_move() {
    let mut game = WasmGame::new();

    let stage = game.ai_move("weighted", Some(3)).ok().expect("wasm call must succeed");

    assert_eq!(stage, Stage::PlacementSuccess.code());
    assert!(game.ai_move("nonsense", None).is_err());
}

#[wasm_bindgen_test]
fn reset_alternates_starter() {
    let mut game = WasmGame::new();

    let first = game.reset_episode();
    let second = game.reset_episode();

    assert_ne!(first, second);
}
