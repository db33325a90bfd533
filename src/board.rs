use crate::types::{Color, Piece, Point};

pub const NUM_SQUARES: usize = 32;
const STARTING_ROWS: usize = 3;
const SQUARES_PER_ROW: usize = 4;

/// Checkers board state represented by three bit-planes over the 32 dark
/// squares: occupancy, colour (set = black) and king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    occupied: u32,
    black: u32,
    king: u32,
}

impl Board {
    /// Creates the initial board:
    /// black men on squares 0-11, white men on 20-31.
    pub fn new() -> Self {
        let black_men = (1u32 << (STARTING_ROWS * SQUARES_PER_ROW)) - 1;
        let white_men = black_men << (NUM_SQUARES - STARTING_ROWS * SQUARES_PER_ROW);
        Self {
            occupied: black_men | white_men,
            black: black_men,
            king: 0,
        }
    }

    /// Creates a board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            occupied: 0,
            black: 0,
            king: 0,
        }
    }

    /// Returns the piece on `index`, or `None` when the index is off the board.
    pub fn get(&self, index: usize) -> Option<Piece> {
        let square = bit(index);
        if square == 0 {
            return None;
        }
        if self.occupied & square == 0 {
            return Some(Piece::Empty);
        }
        let is_black = self.black & square != 0;
        let is_king = self.king & square != 0;
        Some(match (is_black, is_king) {
            (false, false) => Piece::WhiteMan,
            (false, true) => Piece::WhiteKing,
            (true, false) => Piece::BlackMan,
            (true, true) => Piece::BlackKing,
        })
    }

    /// Returns the piece at `point`, or `None` for light or off-board squares.
    pub fn get_at(&self, point: Point) -> Option<Piece> {
        point_to_index(point).and_then(|index| self.get(index))
    }

    /// Stores `piece` on `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, piece: Piece) {
        let square = bit(index);
        if square == 0 {
            return;
        }
        self.occupied = with_bit(self.occupied, square, !piece.is_empty());
        self.black = with_bit(self.black, square, piece.is_black());
        self.king = with_bit(self.king, square, piece.is_king());
    }

    /// Stores a raw piece id. Negative ids clear the square.
    pub fn set_id(&mut self, index: usize, id: i32) {
        self.set(index, Piece::from_id(id));
    }

    /// Returns every square holding `piece`, in ascending index order.
    pub fn find(&self, piece: Piece) -> Vec<Point> {
        (0..NUM_SQUARES)
            .filter(|&index| self.get(index) == Some(piece))
            .filter_map(to_point)
            .collect()
    }

    /// Returns the indices of every piece of `color`, ascending.
    pub fn pieces(&self, color: Color) -> Vec<usize> {
        let mut mask = match color {
            Color::Black => self.occupied & self.black,
            Color::White => self.occupied & !self.black,
        };
        let mut out = Vec::with_capacity(mask.count_ones() as usize);
        while mask != 0 {
            out.push(mask.trailing_zeros() as usize);
            mask &= mask - 1;
        }
        out
    }

    /// Returns an independent copy of this board.
    pub fn copy(&self) -> Self {
        *self
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        let black = (self.occupied & self.black).count_ones() as u8;
        let white = (self.occupied & !self.black).count_ones() as u8;
        (black, white)
    }

    /// Converts board to `[u8; 32]` of piece ids, square 0 first.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (index, cell) in board.iter_mut().enumerate() {
            *cell = self.get(index).map_or(0, Piece::id);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a dark-square index into its `(x, y)` point.
/// Index 0 is (1, 0), index 1 is (3, 0), ... index 31 is (6, 7).
pub fn to_point(index: usize) -> Option<Point> {
    if index >= NUM_SQUARES {
        return None;
    }
    let y = (index / SQUARES_PER_ROW) as i8;
    let x = 2 * (index % SQUARES_PER_ROW) as i8 + (y + 1) % 2;
    Some(Point::new(x, y))
}

/// Converts `(x, y)` into a dark-square index. Light or off-board squares
/// yield `None`.
pub fn to_index(x: i8, y: i8) -> Option<usize> {
    point_to_index(Point::new(x, y))
}

pub fn point_to_index(point: Point) -> Option<usize> {
    if !point.is_playable() {
        return None;
    }
    Some(point.y as usize * SQUARES_PER_ROW + point.x as usize / 2)
}

/// Returns the square jumped over when moving from `a` to `b`.
///
/// Both points must be playable squares exactly two apart on each axis;
/// otherwise there is no middle.
pub fn middle(a: Point, b: Point) -> Option<Point> {
    if !a.is_playable() || !b.is_playable() {
        return None;
    }
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx.abs() != 2 || dy.abs() != 2 {
        return None;
    }
    Some(a.offset(dx / 2, dy / 2))
}

/// Index form of [`middle`].
pub fn middle_index(start: usize, end: usize) -> Option<usize> {
    let mid = middle(to_point(start)?, to_point(end)?)?;
    point_to_index(mid)
}

pub fn is_valid_index(index: usize) -> bool {
    index < NUM_SQUARES
}

fn bit(index: usize) -> u32 {
    if index < NUM_SQUARES { 1u32 << index } else { 0 }
}

fn with_bit(plane: u32, square: u32, set: bool) -> u32 {
    if set { plane | square } else { plane & !square }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t01_initial_board_has_twelve_men_per_side() {
        let board = Board::new();

        assert_eq!(board.count(), (12, 12));
        for index in 0..12 {
            assert_eq!(board.get(index), Some(Piece::BlackMan));
        }
        for index in 12..20 {
            assert_eq!(board.get(index), Some(Piece::Empty));
        }
        for index in 20..32 {
            assert_eq!(board.get(index), Some(Piece::WhiteMan));
        }
    }

    #[test]
    fn get_out_of_range_is_none() {
        let board = Board::new();

        assert_eq!(board.get(32), None);
        assert_eq!(board.get(usize::MAX), None);
        assert_eq!(board.get_at(Point::new(0, 0)), None);
        assert_eq!(board.get_at(Point::new(-1, 2)), None);
    }

    #[test]
    fn set_stores_every_piece_and_ignores_out_of_range() {
        let mut board = Board::empty();

        board.set(13, Piece::WhiteKing);
        board.set(14, Piece::BlackKing);
        board.set_id(15, 6);
        board.set_id(16, -1);
        board.set(40, Piece::BlackMan);

        assert_eq!(board.get(13), Some(Piece::WhiteKing));
        assert_eq!(board.get(14), Some(Piece::BlackKing));
        assert_eq!(board.get(15), Some(Piece::BlackMan));
        assert_eq!(board.get(16), Some(Piece::Empty));
        assert_eq!(board.count(), (2, 1));

        board.set(14, Piece::Empty);
        assert_eq!(board.get(14), Some(Piece::Empty));
        assert_eq!(board.count(), (1, 1));
    }

    #[test]
    fn index_and_point_conversions_are_inverse() {
        for index in 0..NUM_SQUARES {
            let point = to_point(index).unwrap();
            assert!(point.is_playable());
            assert_eq!(point_to_index(point), Some(index));
        }
        for y in 0..8 {
            for x in 0..8 {
                let point = Point::new(x, y);
                match point_to_index(point) {
                    Some(index) => assert_eq!(to_point(index), Some(point)),
                    None => assert_eq!(x % 2, y % 2),
                }
            }
        }
    }

    #[test]
    fn conversions_reject_invalid_input() {
        assert_eq!(to_point(32), None);
        assert_eq!(to_index(0, 0), None);
        assert_eq!(to_index(8, 1), None);
        assert_eq!(to_index(-1, 0), None);
        assert_eq!(to_point(0), Some(Point::new(1, 0)));
        assert_eq!(to_point(31), Some(Point::new(6, 7)));
        assert_eq!(to_index(0, 3), Some(12));
    }

    #[test]
    fn middle_requires_a_two_square_diagonal() {
        assert_eq!(middle(Point::new(1, 2), Point::new(3, 4)), Some(Point::new(2, 3)));
        assert_eq!(middle_index(13, 22), Some(17));
        assert_eq!(middle_index(8, 12), None);
        assert_eq!(middle(Point::new(1, 2), Point::new(5, 6)), None);
        assert_eq!(middle(Point::new(1, 2), Point::new(1, 4)), None);
        assert_eq!(middle(Point::new(0, 0), Point::new(2, 2)), None);
        assert_eq!(middle(Point::new(7, 6), Point::new(9, 8)), None);
        assert_eq!(middle_index(13, 40), None);
    }

    #[test]
    fn find_lists_matching_squares_in_index_order() {
        let board = Board::new();

        let black = board.find(Piece::BlackMan);
        assert_eq!(black.len(), 12);
        assert_eq!(black[0], Point::new(1, 0));
        assert_eq!(black[11], Point::new(7, 2));
        assert!(board.find(Piece::WhiteKing).is_empty());
        assert_eq!(board.pieces(Color::White), (20..32).collect::<Vec<_>>());
    }

    #[test]
    fn copies_are_independent() {
        let board = Board::new();
        let mut copy = board.copy();

        copy.set(0, Piece::Empty);
        copy.set(15, Piece::WhiteKing);

        assert_eq!(board.get(0), Some(Piece::BlackMan));
        assert_eq!(board.get(15), Some(Piece::Empty));
        assert_ne!(board, copy);
    }

    #[test]
    fn to_array_writes_piece_ids() {
        let cells = Board::new().to_array();

        assert_eq!(cells[0], 6);
        assert_eq!(cells[12], 0);
        assert_eq!(cells[31], 4);
    }
}
