use once_cell::sync::Lazy;

use crate::board::{self, Board, NUM_SQUARES};
use crate::types::Color;

/// Diagonal directions: the two advancing toward row 7 first, then the two
/// toward row 0.
pub(crate) const DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

type Targets = [[Option<usize>; 4]; NUM_SQUARES];

/// Per-square landing squares one step away along each of `DIRECTIONS`.
static STEP_TARGETS: Lazy<Targets> = Lazy::new(|| build_targets(1));

/// Per-square landing squares two steps away along each of `DIRECTIONS`.
static JUMP_TARGETS: Lazy<Targets> = Lazy::new(|| build_targets(2));

fn build_targets(distance: i8) -> Targets {
    let mut table = [[None; 4]; NUM_SQUARES];
    for (index, row) in table.iter_mut().enumerate() {
        let Some(from) = board::to_point(index) else {
            continue;
        };
        for (slot, (dx, dy)) in row.iter_mut().zip(DIRECTIONS) {
            *slot = board::point_to_index(from.offset(dx * distance, dy * distance));
        }
    }
    table
}

/// Endpoints reachable from `start` along the directions its piece may use.
fn geometric_targets(board: &Board, start: usize, table: &Targets) -> Vec<usize> {
    let Some(piece) = board.get(start) else {
        return Vec::new();
    };

    table[start]
        .iter()
        .zip(DIRECTIONS)
        .filter(|&(_, (_, dy))| piece.moves_along(dy))
        .filter_map(|(target, _)| *target)
        .collect()
}

/// Returns the empty squares one diagonal step from `start` that its piece
/// may move to.
pub fn move_candidates(board: &Board, start: usize) -> Vec<usize> {
    geometric_targets(board, start, &STEP_TARGETS)
        .into_iter()
        .filter(|&end| board.get(end).is_some_and(|piece| piece.is_empty()))
        .collect()
}

/// Returns the landing squares of every capture available to the piece on
/// `start`.
pub fn capture_candidates(board: &Board, start: usize) -> Vec<usize> {
    geometric_targets(board, start, &JUMP_TARGETS)
        .into_iter()
        .filter(|&end| is_valid_capture(board, start, end))
        .collect()
}

/// True when the piece on `start` can jump an opposing piece and land on
/// `end`. Direction and turn are not considered.
pub fn is_valid_capture(board: &Board, start: usize, end: usize) -> bool {
    if !board.get(end).is_some_and(|piece| piece.is_empty()) {
        return false;
    }
    let Some(mover) = board.get(start).and_then(|piece| piece.color()) else {
        return false;
    };
    let Some(mid) = board::middle_index(start, end) else {
        return false;
    };
    board
        .get(mid)
        .and_then(|piece| piece.color())
        .is_some_and(|captured| captured == mover.opponent())
}

/// True when any piece of `color` has a capture available.
pub fn has_capture(board: &Board, color: Color) -> bool {
    board
        .pieces(color)
        .into_iter()
        .any(|index| !capture_candidates(board, index).is_empty())
}

/// True when any piece of `color` has a step or a capture available.
pub fn has_any_move(board: &Board, color: Color) -> bool {
    board.pieces(color).into_iter().any(|index| {
        !move_candidates(board, index).is_empty() || !capture_candidates(board, index).is_empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn board_with(pieces: &[(usize, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(index, piece) in pieces {
            board.set(index, piece);
        }
        board
    }

    #[test]
    fn t01_initial_black_front_row_moves_forward_only() {
        let board = Board::new();

        assert_eq!(move_candidates(&board, 8), vec![13, 12]);
        assert_eq!(move_candidates(&board, 11), vec![15]);
        assert!(move_candidates(&board, 0).is_empty());
        assert_eq!(move_candidates(&board, 20), vec![16]);
    }

    #[test]
    fn empty_or_invalid_start_has_no_candidates() {
        let board = Board::new();

        assert!(move_candidates(&board, 14).is_empty());
        assert!(move_candidates(&board, 32).is_empty());
        assert!(capture_candidates(&board, 14).is_empty());
        assert!(capture_candidates(&board, 99).is_empty());
    }

    #[test]
    fn kings_step_in_all_four_directions() {
        let board = board_with(&[(13, Piece::WhiteKing)]);

        let mut moves = move_candidates(&board, 13);
        moves.sort_unstable();
        assert_eq!(moves, vec![8, 9, 16, 17]);
    }

    #[test]
    fn capture_requires_an_opposing_middle_and_empty_landing() {
        let board = board_with(&[
            (13, Piece::BlackMan),
            (17, Piece::WhiteMan),
            (16, Piece::BlackMan),
        ]);

        assert!(is_valid_capture(&board, 13, 22));
        assert!(!is_valid_capture(&board, 13, 20));
        assert!(!is_valid_capture(&board, 14, 22));
        assert!(!is_valid_capture(&board, 13, 17));
        assert_eq!(capture_candidates(&board, 13), vec![22]);

        let blocked = board_with(&[
            (13, Piece::BlackMan),
            (17, Piece::WhiteMan),
            (22, Piece::WhiteMan),
        ]);
        assert!(!is_valid_capture(&blocked, 13, 22));
    }

    #[test]
    fn capture_check_ignores_direction_but_candidates_do_not() {
        let board = board_with(&[(22, Piece::BlackMan), (17, Piece::WhiteMan)]);

        assert!(is_valid_capture(&board, 22, 13));
        assert!(capture_candidates(&board, 22).is_empty());

        let king = board_with(&[(22, Piece::BlackKing), (17, Piece::WhiteMan)]);
        assert_eq!(capture_candidates(&king, 22), vec![13]);
    }

    #[test]
    fn side_wide_queries() {
        let board = board_with(&[(13, Piece::BlackMan), (17, Piece::WhiteMan)]);

        assert!(has_capture(&board, Color::Black));
        assert!(has_capture(&board, Color::White));
        assert!(has_any_move(&board, Color::Black));

        let stuck = board_with(&[(4, Piece::BlackMan), (8, Piece::WhiteMan), (13, Piece::WhiteMan)]);
        assert!(!has_any_move(&stuck, Color::Black));
        assert!(has_any_move(&stuck, Color::White));
    }
}
