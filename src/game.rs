use crate::board::{self, Board, NUM_SQUARES};
use crate::movegen;
use crate::rules::{self, IllegalMove, MoveKind};
use crate::types::{Color, GameResult, GameState, Move, Piece, Player, Point};

const TURN_FIELD: usize = NUM_SQUARES;
const CAPTURE_FIELD: usize = NUM_SQUARES + 1;

/// Something that can pick a move for the side to play: a remote peer, a
/// scripted player, an engine.
pub trait MoveSelector {
    fn select_move(&self, game: &GameInstance) -> Option<Move>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, game: &GameInstance) -> Option<Move> {
        game.legal_moves().into_iter().next()
    }
}

/// What a successful move did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub captured: Option<usize>,
    pub promoted: bool,
    pub turn_ended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInstance {
    board: Board,
    turn: Player,
    active_capture: Option<usize>,
}

impl GameInstance {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::One,
            active_capture: None,
        }
    }

    /// Assembles a game from its parts. An active capture off the board is
    /// dropped.
    pub fn from_parts(board: Board, turn: Player, active_capture: Option<usize>) -> Self {
        Self {
            board,
            turn,
            active_capture: active_capture.filter(|&index| board::is_valid_index(index)),
        }
    }

    /// Builds a game from its serialized form. See [`GameInstance::deserialize`].
    pub fn from_state(state: &str) -> Self {
        let mut game = Self::new();
        game.deserialize(state);
        game
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Returns a copy of the board; the live board is never handed out.
    pub fn board(&self) -> Board {
        self.board.copy()
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn set_turn(&mut self, player: Player) {
        self.turn = player;
    }

    /// Square the current player must continue capturing from, if any.
    pub fn active_capture(&self) -> Option<usize> {
        self.active_capture
    }

    pub fn is_legal_move(&self, start: usize, end: usize) -> bool {
        rules::is_legal_move(&self.board, self.turn, start, end, self.active_capture)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves(&self.board, self.turn, self.active_capture)
    }

    /// Applies a move. Returns false, leaving the game untouched, when the
    /// move is illegal.
    pub fn apply_move(&mut self, start: usize, end: usize) -> bool {
        self.try_move(start, end).is_ok()
    }

    pub fn apply_move_points(&mut self, start: Point, end: Point) -> bool {
        match (board::point_to_index(start), board::point_to_index(end)) {
            (Some(start), Some(end)) => self.apply_move(start, end),
            _ => false,
        }
    }

    pub fn try_move(&mut self, start: usize, end: usize) -> Result<MoveOutcome, IllegalMove> {
        let kind = rules::check_move(&self.board, self.turn, start, end, self.active_capture)?;

        let mut piece = self.board.get(start).unwrap_or_default();
        let captured = match kind {
            MoveKind::Capture { captured } => Some(captured),
            MoveKind::Step => None,
        };
        if let Some(captured) = captured {
            self.board.set(captured, Piece::Empty);
        }
        self.board.set(start, Piece::Empty);

        let promoted = !piece.is_king() && reaches_promotion_row(piece, end);
        if promoted {
            piece = piece.promoted();
        }
        self.board.set(end, piece);

        let continues = !promoted
            && captured.is_some()
            && !movegen::capture_candidates(&self.board, end).is_empty();
        if continues {
            self.active_capture = Some(end);
        } else {
            self.turn = self.turn.opponent();
            self.active_capture = None;
        }

        Ok(MoveOutcome {
            captured,
            promoted,
            turn_ended: !continues,
        })
    }

    /// Asks `selector` for a move and plays it.
    pub fn play_selected(&mut self, selector: &dyn MoveSelector) -> Result<Move, String> {
        if self.is_game_over() {
            return Err("game is already over".to_string());
        }

        let selected = selector
            .select_move(self)
            .ok_or_else(|| "selector could not select a move".to_string())?;

        self.try_move(selected.start, selected.end)
            .map_err(|err| format!("selector chose an illegal move: {err}"))?;

        Ok(selected)
    }

    /// True when a side has no pieces left or the side to move is blocked.
    pub fn is_game_over(&self) -> bool {
        let (black_count, white_count) = self.board.count();
        if black_count == 0 || white_count == 0 {
            return true;
        }
        !movegen::has_any_move(&self.board, self.turn.color())
    }

    /// The winning player once the game is over.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_game_over() {
            return None;
        }
        let (black_count, white_count) = self.board.count();
        if black_count == 0 {
            Some(Player::of_color(Color::White))
        } else if white_count == 0 {
            Some(Player::of_color(Color::Black))
        } else {
            Some(self.turn.opponent())
        }
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.turn.code(),
            active_capture: self.active_capture.map_or(-1, |index| index as i8),
            black_count,
            white_count,
            is_game_over: self.is_game_over(),
            legal_moves: self.legal_moves(),
        }
    }

    pub fn to_game_result(&self) -> Option<GameResult> {
        let winner = self.winner()?;
        let (black_count, white_count) = self.board.count();
        Some(GameResult {
            winner: winner.code(),
            black_count,
            white_count,
        })
    }

    /// Encodes the game as 32 piece-id digits, a turn digit (`1` for player
    /// one) and the active capture square (`-1` for none).
    pub fn serialize(&self) -> String {
        let mut state: String = self
            .board
            .to_array()
            .iter()
            .map(|id| char::from(b'0' + id))
            .collect();
        state.push(if self.turn == Player::One { '1' } else { '0' });
        match self.active_capture {
            Some(index) => state.push_str(&index.to_string()),
            None => state.push_str("-1"),
        }
        state
    }

    /// Resets the game, then overlays whatever fields of `state` parse.
    /// Unparsable digits keep the starting piece, a missing turn digit keeps
    /// player one, and a missing or unparsable capture square means none.
    pub fn deserialize(&mut self, state: &str) {
        self.restart();

        let bytes = state.as_bytes();
        for (index, &byte) in bytes.iter().take(NUM_SQUARES).enumerate() {
            if let Some(id) = char::from(byte).to_digit(10) {
                self.board.set_id(index, id as i32);
            }
        }

        if let Some(&turn) = bytes.get(TURN_FIELD) {
            self.turn = if turn == b'1' { Player::One } else { Player::Two };
        }

        self.active_capture = state
            .get(CAPTURE_FIELD..)
            .and_then(|field| field.parse::<i64>().ok())
            .and_then(|index| usize::try_from(index).ok())
            .filter(|&index| board::is_valid_index(index));
    }

    /// CRC32 of the serialized state, for peers to confirm they agree.
    pub fn checksum(&self) -> u32 {
        crc32fast::hash(self.serialize().as_bytes())
    }

    /// Loads a transmitted state after verifying its CRC32. On mismatch the
    /// game is left as it was.
    pub fn deserialize_checked(&mut self, state: &str, expected_crc: u32) -> Result<(), String> {
        let actual_crc = crc32fast::hash(state.as_bytes());
        if actual_crc != expected_crc {
            return Err(format!(
                "CRC32 mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"
            ));
        }
        self.deserialize(state);
        Ok(())
    }
}

impl Default for GameInstance {
    fn default() -> Self {
        Self::new()
    }
}

fn reaches_promotion_row(piece: Piece, end: usize) -> bool {
    match (piece.color(), board::to_point(end)) {
        (Some(color), Some(point)) => point.y == color.promotion_row(),
        _ => false,
    }
}
