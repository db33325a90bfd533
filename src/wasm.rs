use wasm_bindgen::prelude::*;

use crate::board;
use crate::game::{FirstLegalMoveSelector, GameInstance};
use crate::rules;

/// Browser-facing checkers game.
#[wasm_bindgen]
pub struct CheckersGame {
    game: GameInstance,
}

#[wasm_bindgen]
impl CheckersGame {
    /// Start a new game from the standard layout, player one (black) to move.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CheckersGame {
        Self {
            game: GameInstance::new(),
        }
    }

    /// Restore a game from its serialized string. Malformed fields fall back
    /// to the starting position.
    #[wasm_bindgen(js_name = "fromState")]
    pub fn from_state(state: &str) -> CheckersGame {
        Self {
            game: GameInstance::from_state(state),
        }
    }

    pub fn serialize(&self) -> String {
        self.game.serialize()
    }

    pub fn checksum(&self) -> u32 {
        self.game.checksum()
    }

    /// Load a state received from a peer, refusing it when the CRC32 differs.
    #[wasm_bindgen(js_name = "loadVerified")]
    pub fn load_verified(&mut self, state: &str, crc: u32) -> Result<(), JsError> {
        self.game
            .deserialize_checked(state, crc)
            .map_err(|e| JsError::new(&e))
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// Returns false and leaves the game untouched for an illegal move.
    #[wasm_bindgen(js_name = "applyMove")]
    pub fn apply_move(&mut self, start: usize, end: usize) -> bool {
        self.game.apply_move(start, end)
    }

    /// Play the first legal move for the side to move.
    #[wasm_bindgen(js_name = "autoMove")]
    pub fn auto_move(&mut self) -> Result<JsValue, JsError> {
        let played = self
            .game
            .play_selected(&FirstLegalMoveSelector)
            .map_err(|e| JsError::new(&e))?;
        serde_wasm_bindgen::to_value(&played).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Get all legal moves as an array of `{ start, end, weight }`.
    #[wasm_bindgen(js_name = "legalMoves")]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.game.legal_moves())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Full snapshot: board ids, current player, active capture and counts.
    pub fn state(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.game.to_game_state())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// `{ winner, blackCount, whiteCount }` once the game is over, else `undefined`.
    pub fn result(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.game.to_game_result())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = "isGameOver")]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Whether the piece on `index` cannot be captured next turn.
    #[wasm_bindgen(js_name = "isSafe")]
    pub fn is_safe(&self, index: usize) -> bool {
        match board::to_point(index) {
            Some(point) => rules::is_safe(&self.game.board(), point),
            None => true,
        }
    }

    /// Returns 1 or 2.
    #[wasm_bindgen(js_name = "currentPlayer")]
    pub fn current_player(&self) -> u8 {
        self.game.turn().code()
    }

    /// Square the current capture chain must continue from, or -1.
    #[wasm_bindgen(js_name = "activeCapture")]
    pub fn active_capture(&self) -> i32 {
        self.game
            .active_capture()
            .map_or(-1, |index| index as i32)
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}
