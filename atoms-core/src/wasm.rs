//! WASM bindings for atoms-core
//!
//! Exposes the game controller to a JavaScript renderer. Boards and
//! detailed moves cross the boundary as plain serde values.

use wasm_bindgen::prelude::*;

use crate::{GameConfig, GameController, Pos};

/// WASM-friendly wrapper around GameController
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameController,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a new game. Throws if the size or player count is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(size: u8, players: usize) -> Result<WasmGame, JsError> {
        let config = GameConfig {
            board_size: size,
            player_count: players,
            ..GameConfig::default()
        };
        let inner = GameController::new(config)?;
        Ok(WasmGame { inner })
    }

    /// Place an electron for the current player.
    /// Returns the detailed move, or null if the move was rejected.
    #[wasm_bindgen(js_name = performMove)]
    pub fn perform_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        match self.inner.perform_move(Pos::new(row, col)) {
            Some(mov) => Ok(serde_wasm_bindgen::to_value(&mov)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Let the computer move for the current player.
    /// Returns the detailed move, or null if the game is over.
    #[wasm_bindgen(js_name = performAIMove)]
    pub fn perform_ai_move(&mut self) -> Result<JsValue, JsError> {
        match self.inner.perform_ai_move() {
            Some(mov) => Ok(serde_wasm_bindgen::to_value(&mov)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Seat index of the player to move
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player().0
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    /// Seat index of the winner, or undefined while the game runs
    pub fn winner(&self) -> Option<u8> {
        self.inner.winner().map(|player| player.0)
    }

    /// Snapshot of the current board
    pub fn board(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.board_snapshot())?)
    }
}
