use serde::Serialize;

/// Side colour. Black starts on rows 0-2 and moves toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Row delta a man of this colour advances by.
    pub fn forward(self) -> i8 {
        match self {
            Self::Black => 1,
            Self::White => -1,
        }
    }

    /// Row on which a man of this colour is promoted.
    pub fn promotion_row(self) -> i8 {
        match self {
            Self::Black => 7,
            Self::White => 0,
        }
    }
}

/// Turn owner. Player one plays black, player two plays white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn color(self) -> Color {
        match self {
            Self::One => Color::Black,
            Self::Two => Color::White,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub fn of_color(color: Color) -> Self {
        match color {
            Color::Black => Self::One,
            Color::White => Self::Two,
        }
    }

    /// Numeric code used by JS consumers: 1 or 2.
    pub fn code(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// Contents of one playable square.
///
/// The persisted ids are three bits: bit 2 marks an occupied square, bit 1
/// marks black and bit 0 marks a king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Piece {
    #[default]
    Empty,
    WhiteMan,
    WhiteKing,
    BlackMan,
    BlackKing,
}

const OCCUPIED_BIT: i32 = 0b100;
const BLACK_BIT: i32 = 0b010;
const KING_BIT: i32 = 0b001;

impl Piece {
    /// Decodes a raw id. Negative ids and ids without the occupied bit decode
    /// to `Empty`; only the low three bits are read.
    pub fn from_id(id: i32) -> Self {
        if id < 0 || id & OCCUPIED_BIT == 0 {
            return Self::Empty;
        }
        match (id & BLACK_BIT != 0, id & KING_BIT != 0) {
            (false, false) => Self::WhiteMan,
            (false, true) => Self::WhiteKing,
            (true, false) => Self::BlackMan,
            (true, true) => Self::BlackKing,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::WhiteMan => 4,
            Self::WhiteKing => 5,
            Self::BlackMan => 6,
            Self::BlackKing => 7,
        }
    }

    pub fn man(color: Color) -> Self {
        match color {
            Color::Black => Self::BlackMan,
            Color::White => Self::WhiteMan,
        }
    }

    pub fn king(color: Color) -> Self {
        match color {
            Color::Black => Self::BlackKing,
            Color::White => Self::WhiteKing,
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::WhiteMan | Self::WhiteKing => Some(Color::White),
            Self::BlackMan | Self::BlackKing => Some(Color::Black),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    pub fn is_king(self) -> bool {
        matches!(self, Self::WhiteKing | Self::BlackKing)
    }

    pub fn is_black(self) -> bool {
        self.color() == Some(Color::Black)
    }

    pub fn is_white(self) -> bool {
        self.color() == Some(Color::White)
    }

    /// Whether this piece may travel along row delta `dy`.
    /// Empty squares move nowhere; kings move both ways.
    pub fn moves_along(self, dy: i8) -> bool {
        match self.color() {
            None => false,
            Some(_) if self.is_king() => true,
            Some(color) => dy.signum() == color.forward(),
        }
    }

    /// The king of the same colour; other values are returned unchanged.
    pub fn promoted(self) -> Self {
        match self {
            Self::WhiteMan => Self::WhiteKing,
            Self::BlackMan => Self::BlackKing,
            other => other,
        }
    }
}

/// A board coordinate. Only dark squares (x and y of different parity)
/// inside the 8x8 grid are playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(self) -> bool {
        (0..8).contains(&self.x) && (0..8).contains(&self.y)
    }

    /// True for in-bounds dark squares.
    pub fn is_playable(self) -> bool {
        self.is_on_board() && self.x % 2 != self.y % 2
    }

    /// Shifts the point, saturating at the `i8` range; a saturated point is
    /// never on the board.
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// A proposed move between two square indices.
///
/// `weight` is for external move rankers; the rules ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Move {
    pub start: usize,
    pub end: usize,
    pub weight: f64,
}

impl Move {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            weight: 0.0,
        }
    }

    pub fn with_weight(start: usize, end: usize, weight: f64) -> Self {
        Self { start, end, weight }
    }

    pub fn change_weight(&mut self, delta: f64) {
        self.weight += delta;
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Piece ids, square 0 first.
    pub board: Vec<u8>,
    pub current_player: u8,
    /// Contract:
    /// - Square index the current player must continue capturing from.
    /// - `-1` outside a capture chain.
    pub active_capture: i8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    pub legal_moves: Vec<Move>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// 1 or 2 for the winning player.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}
